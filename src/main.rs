//! Botbtag looks up mp3s downloaded from Battle of the Bits and writes the
//! entry's title, artist, battle, year and format into their ID3 tags.

mod cli;
use anyhow::Result;
use botbtag::{BotbClient, Config, Id3Container, LookupStrategy, DEFAULT_BASE_URL};
use cli::{read_files_from_stdin, tag_files};
use std::path::PathBuf;
use termimad::{
    crossterm::style::{Attribute::Underlined, Color::DarkYellow},
    minimad::TextTemplate,
    MadSkin,
};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "botbtag", version)]
#[command(
    about = "Apply tag information from BotB to mp3s from BotB.",
    long_about = "Attempts to look up and apply tag information from BotB to mp3s from BotB. \
The filename should be in the original format from the BotB download. Or the first number \
in it ought to at least be its ID."
)]
struct Cli {
    /// Overwrite existing tags
    #[arg(short, long)]
    overwrite: bool,

    /// How the lookup key is taken from each filename
    #[arg(short, long, value_enum, default_value_t = LookupStrategy::LeadingDigits)]
    strategy: LookupStrategy,

    /// BotB API root
    #[arg(long, env = "BOTBTAG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Also read paths from stdin, one per line
    #[arg(long)]
    stdin: bool,

    /// mp3 files to tag
    #[arg(value_name = "FILE", required_unless_present = "stdin")]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();

    let mut skin = MadSkin::default();
    skin.bold.set_fg(DarkYellow);
    skin.italic.add_attr(Underlined);
    let text_template = TextTemplate::from("# ${app-name} v${app-version}");
    let mut expander = text_template.expander();
    expander
        .set("app-name", env!("CARGO_PKG_NAME"))
        .set("app-version", env!("CARGO_PKG_VERSION"));
    skin.print_expander(expander);

    let mut files = args.files;
    if args.stdin {
        files.extend(read_files_from_stdin());
    }

    let config = Config {
        strategy: args.strategy,
        overwrite: args.overwrite,
    };
    let client = BotbClient::new(&args.base_url);
    let tally = tag_files::tag_all(&skin, &files, &config, &client, &Id3Container);
    log::info!("{} tagged, {} failed", tally.tagged, tally.failed);

    Ok(())
}
