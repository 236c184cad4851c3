//! Tags mp3s downloaded from Battle of the Bits with their entry's metadata.

pub mod botb;
pub mod error;
pub mod resolve;
pub mod tags;

use std::path::Path;

use log::info;

pub use botb::{pick_single, BotbClient, Entry, EntrySource, DEFAULT_BASE_URL};
pub use error::{Result, TagError};
pub use resolve::{expand_path, resolve_key, LookupKey, LookupStrategy};
pub use tags::{write_entry, Id3Container, TagContainer, TagField, TagHandle, WriteOptions};

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub strategy: LookupStrategy,
    pub overwrite: bool,
}

/// Resolves the file's key and fetches its entry, without touching the file.
///
/// Ids are loaded exactly; phrases are searched and must match exactly one
/// entry.
pub fn lookup_file(
    path: &Path,
    strategy: LookupStrategy,
    source: &impl EntrySource,
) -> Result<Entry> {
    match resolve_key(path, strategy)? {
        LookupKey::Id(id) => source.load(&id.to_string()),
        LookupKey::Token(token) => source.load(&token),
        LookupKey::Phrase(phrase) => pick_single(&phrase, source.search(&phrase)?),
    }
}

/// The complete process of tagging one file.
pub fn process_file(
    path: &Path,
    config: &Config,
    source: &impl EntrySource,
    container: &impl TagContainer,
) -> Result<Entry> {
    let entry = lookup_file(path, config.strategy, source)?;
    write_entry(
        container,
        path,
        &entry,
        WriteOptions {
            overwrite: config.overwrite,
        },
    )?;
    info!("tagged {} as entry {}", path.display(), entry.id);
    Ok(entry)
}
