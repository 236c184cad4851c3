use anyhow::{Context, Result};
use botbtag::{expand_path, lookup_file, BotbClient, LookupStrategy, DEFAULT_BASE_URL};
use std::path::PathBuf;

use clap::Parser;

/// Look up the BotB entry behind each file without touching its tags.
///
/// Prints the entry as json, one per line.
#[derive(Parser)]
struct Cli {
    /// How the lookup key is taken from each filename
    #[arg(short, long, value_enum, default_value_t = LookupStrategy::LeadingDigits)]
    strategy: LookupStrategy,

    /// BotB API root
    #[arg(long, env = "BOTBTAG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// files to look up
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();
    let client = BotbClient::new(&args.base_url);

    for raw in args.files.iter() {
        let file = expand_path(raw);
        let entry = lookup_file(&file, args.strategy, &client)
            .with_context(|| format!("{}", file.display()));
        match entry {
            Ok(entry) => println!("{}", serde_json::to_string(&entry)?),
            Err(err) => eprintln!("{err:#}"),
        }
    }

    Ok(())
}
