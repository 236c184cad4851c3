use botbtag::{expand_path, process_file, Config, EntrySource, TagContainer};
use std::path::PathBuf;
use termimad::{mad_print_inline, MadSkin};

/// How many files made it through.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub tagged: usize,
    pub failed: usize,
}

/// Tags every file in turn. A failure is reported on stderr and the next file
/// is tried.
pub fn tag_all(
    skin: &MadSkin,
    files: &[PathBuf],
    config: &Config,
    source: &impl EntrySource,
    container: &impl TagContainer,
) -> Tally {
    let mut tally = Tally::default();
    for raw in files {
        match process_file(&expand_path(raw), config, source, container) {
            Ok(entry) => {
                tally.tagged += 1;
                mad_print_inline!(skin, "**tagged** $0 as *$1*\n", raw.display(), &entry.title);
            }
            Err(err) => {
                tally.failed += 1;
                eprintln!("{}: {:#}", raw.display(), anyhow::Error::from(err));
            }
        }
    }
    tally
}
