use std::path::{Path, PathBuf};

use id3::{ErrorKind, Tag, TagLike, Version};
use log::debug;

use crate::{
    botb::Entry,
    error::{Result, TagError},
};

/// The textual fields written from an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Title,
    Artist,
    Album,
    Year,
    Genre,
}

/// Something that can open a file's tags for editing.
pub trait TagContainer {
    type Handle: TagHandle;

    fn open(&self, path: &Path) -> Result<Self::Handle>;
}

/// An opened set of tags. Dropping it releases whatever it holds, saved or not.
pub trait TagHandle {
    fn set_field(&mut self, field: TagField, value: &str);
    fn save(&mut self) -> Result<()>;
}

/// Options for [`write_entry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Accepted from the command line. Existing frames are replaced either way.
    pub overwrite: bool,
}

/// Applies an entry's title, artist, album, year and genre to the file at `path`.
pub fn write_entry<C: TagContainer>(
    container: &C,
    path: &Path,
    entry: &Entry,
    options: WriteOptions,
) -> Result<()> {
    debug!(
        "tagging {} from entry {} (overwrite={})",
        path.display(),
        entry.id,
        options.overwrite
    );
    let mut handle = container.open(path)?;
    handle.set_field(TagField::Title, &entry.title);
    handle.set_field(TagField::Artist, &entry.botbr.name);
    handle.set_field(TagField::Album, &entry.battle.title);
    handle.set_field(TagField::Year, &entry.year());
    handle.set_field(TagField::Genre, &entry.format.title);
    handle.save()
}

/// ID3v2 tags, written as v2.4.
#[derive(Debug, Default)]
pub struct Id3Container;

pub struct Id3Handle {
    path: PathBuf,
    tag: Tag,
}

impl TagContainer for Id3Container {
    type Handle = Id3Handle;

    /// Reads the file's ID3v2 tag. A file without one, audio or not, starts
    /// from an empty tag and gets one on save; only unreadable files and
    /// corrupt tags fail with [`TagError::TagOpen`].
    fn open(&self, path: &Path) -> Result<Id3Handle> {
        let tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(err) if matches!(err.kind, ErrorKind::NoTag) => Tag::new(),
            Err(source) => {
                return Err(TagError::TagOpen {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(Id3Handle {
            path: path.to_path_buf(),
            tag,
        })
    }
}

impl TagHandle for Id3Handle {
    fn set_field(&mut self, field: TagField, value: &str) {
        match field {
            TagField::Title => self.tag.set_title(value),
            TagField::Artist => self.tag.set_artist(value),
            TagField::Album => self.tag.set_album(value),
            TagField::Year => self.tag.set_text("TDRC", value),
            TagField::Genre => self.tag.set_genre(value),
        }
    }

    fn save(&mut self) -> Result<()> {
        self.tag
            .write_to_path(&self.path, Version::Id3v24)
            .map_err(|source| TagError::TagSave {
                path: self.path.clone(),
                source,
            })
    }
}
