use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::{error, LevelFilter};

use stampver::{
    constants::{DEFAULT_ENCODE_SLACK, DEFAULT_MAX_STRING_ENTRIES},
    dump_resource, split_assignment, update_resource, CodecConfig, RawResourceFile, StoreError,
};

/// Read or update the VS_VERSION_INFO resource of a Windows binary.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// File holding the raw version resource.
    pub file: PathBuf,

    /// String entry to replace, as `<key>=<value>`. Prints the resource if omitted.
    #[arg(value_parser = parse_assignment)]
    pub assignment: Option<(String, String)>,

    /// Print the resource without modifying it.
    #[arg(long, conflicts_with = "assignment")]
    pub dump: bool,

    /// Maximum number of entries accepted in the string table.
    #[arg(long, default_value_t = DEFAULT_MAX_STRING_ENTRIES)]
    pub max_entries: usize,

    /// Bytes of headroom allowed on top of the original resource size.
    #[arg(long, default_value_t = DEFAULT_ENCODE_SLACK)]
    pub slack: usize,

    /// Increase log verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_assignment(assignment: &str) -> Result<(String, String), String> {
    split_assignment(assignment)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected <key>=<value>, got {:?}", assignment))
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_level(true)
        .format_target(false)
        .write_style(env_logger::WriteStyle::Auto)
        .init();
}

fn run(args: Args) -> Result<(), StoreError> {
    let config = CodecConfig::default()
        .with_max_string_entries(args.max_entries)
        .with_encode_slack(args.slack);

    match args.assignment {
        Some((key, value)) if !args.dump => {
            let update = update_resource(&mut RawResourceFile, &args.file, &key, &value, &config)?;
            println!("{}: {:?} -> {:?}", key, update.previous, value);
        }
        _ => {
            let version_info = dump_resource(&RawResourceFile, &args.file, &config)?;
            println!("{}", version_info.report());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.kind() {
                Some(kind) => error!("{} ({:?})", error, kind),
                None => error!("{}", error),
            }
            ExitCode::FAILURE
        }
    }
}
