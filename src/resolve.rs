//! Turning a downloaded file's name into something BotB can look up.
//!
//! BotB downloads have been named differently over time, so the way a key is
//! pulled out of a filename is a [`LookupStrategy`] picked up front. Every
//! strategy checks that the file exists first and never reads its contents.

use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use log::debug;

use crate::error::{Result, TagError};

/// How a lookup key is extracted from a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LookupStrategy {
    /// First run of digits in the file name is the entry id
    #[default]
    LeadingDigits,
    /// Second space separated token of the path is the entry id
    SpaceToken,
    /// Whatever follows ` - ` (minus `.mp3`) is searched for
    DelimiterPhrase,
}

/// What gets sent to BotB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    /// Numeric entry id, loaded exactly.
    Id(u64),
    /// Opaque entry id taken verbatim from the filename, loaded exactly.
    Token(String),
    /// Free text, searched for.
    Phrase(String),
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "{id}"),
            LookupKey::Token(token) => write!(f, "{token}"),
            LookupKey::Phrase(phrase) => write!(f, "{phrase}"),
        }
    }
}

/// Checks `path` exists, then extracts its key according to `strategy`.
pub fn resolve_key(path: &Path, strategy: LookupStrategy) -> Result<LookupKey> {
    ensure_exists(path)?;
    let key = match strategy {
        LookupStrategy::LeadingDigits => LookupKey::Id(leading_digits(path)?),
        LookupStrategy::SpaceToken => LookupKey::Token(space_token(path)?),
        LookupStrategy::DelimiterPhrase => LookupKey::Phrase(delimiter_phrase(path)?),
    };
    debug!("{} resolved to {key:?}", path.display());
    Ok(key)
}

fn ensure_exists(path: &Path) -> Result<()> {
    fs::metadata(path)
        .map(|_| ())
        .map_err(|source| TagError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// First contiguous run of ASCII digits in the base name, extension excluded.
fn leading_digits(path: &Path) -> Result<u64> {
    let name = file_name(path);
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let digits = stem
        .split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .ok_or_else(|| TagError::InvalidFilename(name.clone()))?;
    digits
        .parse()
        .map_err(|_| TagError::InvalidFilename(name.clone()))
}

/// Token at index 1 of the whole path split on single spaces. Needs at least
/// three tokens.
fn space_token(path: &Path) -> Result<String> {
    let full = path.to_string_lossy();
    let tokens: Vec<&str> = full.split(' ').collect();
    if tokens.len() < 3 {
        return Err(TagError::InvalidFilename(file_name(path)));
    }
    Ok(tokens[1].to_owned())
}

fn delimiter_phrase(path: &Path) -> Result<String> {
    let full = path.to_string_lossy();
    let (_, rest) = full
        .split_once(" - ")
        .ok_or_else(|| TagError::InvalidFilename(file_name(path)))?;
    Ok(rest.strip_suffix(".mp3").unwrap_or(rest).to_owned())
}

/// Paths as given, or with `~` and `$VARS` expanded when the path as given
/// doesn't exist. Anything that can't be expanded is kept verbatim.
pub fn expand_path(raw: &Path) -> PathBuf {
    if raw.exists() {
        return raw.to_path_buf();
    }
    let raw_str = raw.to_string_lossy();
    match shellexpand::full(&raw_str) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(err) => {
            debug!("not expanding {}: {err}", raw.display());
            raw.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn leading_digits_takes_first_run() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "42 Song Title.mp3");
        assert_eq!(
            resolve_key(&path, LookupStrategy::LeadingDigits).unwrap(),
            LookupKey::Id(42)
        );

        let path = touch(&dir, "track07-42.mp3");
        assert_eq!(
            resolve_key(&path, LookupStrategy::LeadingDigits).unwrap(),
            LookupKey::Id(7)
        );
    }

    #[test]
    fn leading_digits_ignores_directories() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("batch 2013");
        fs::create_dir(&sub).unwrap();
        let path = sub.join("Neon 77.mp3");
        File::create(&path).unwrap();
        assert_eq!(
            resolve_key(&path, LookupStrategy::LeadingDigits).unwrap(),
            LookupKey::Id(77)
        );
    }

    #[test]
    fn no_digits_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "Unknown.mp3");
        let err = resolve_key(&path, LookupStrategy::LeadingDigits).unwrap_err();
        assert!(matches!(err, TagError::InvalidFilename(name) if name == "Unknown.mp3"));
    }

    #[test]
    fn missing_file_is_reported_before_parsing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("12 gone.mp3");
        for strategy in [
            LookupStrategy::LeadingDigits,
            LookupStrategy::SpaceToken,
            LookupStrategy::DelimiterPhrase,
        ] {
            let err = resolve_key(&path, strategy).unwrap_err();
            assert!(matches!(err, TagError::FileNotFound { .. }), "{strategy:?}");
        }
    }

    #[test]
    fn digits_in_the_extension_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "Song.mp3");
        let err = resolve_key(&path, LookupStrategy::LeadingDigits).unwrap_err();
        assert!(matches!(err, TagError::InvalidFilename(_)));
    }

    #[test]
    fn existing_paths_with_dollars_are_kept_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = touch(&dir, "1234 $ong of $$$.mp3");
        assert_eq!(expand_path(&path), path);
        assert_eq!(
            resolve_key(&expand_path(&path), LookupStrategy::LeadingDigits).unwrap(),
            LookupKey::Id(1234)
        );
    }

    #[test]
    fn unexpandable_missing_path_is_reported_as_missing() {
        let dir = TempDir::new().unwrap();
        let raw = dir.path().join("5 $BOTBTAG_SURELY_UNSET_VAR.mp3");
        let path = expand_path(&raw);
        assert_eq!(path, raw);
        let err = resolve_key(&path, LookupStrategy::LeadingDigits).unwrap_err();
        assert!(matches!(err, TagError::FileNotFound { .. }));
    }

    #[test]
    fn home_is_expanded_for_missing_paths() {
        let home = std::env::var("HOME").unwrap_or_default();
        if home.is_empty() {
            return;
        }
        let path = expand_path(Path::new("~/botbtag-no-such-file.mp3"));
        assert_eq!(path, Path::new(&home).join("botbtag-no-such-file.mp3"));
    }

    #[test]
    fn space_token_is_second_token_verbatim() {
        let dir = TempDir::new().unwrap();
        // The whole path is split; the temp dir itself has no spaces.
        let path = touch(&dir, "123 456 Song.mp3");
        assert_eq!(
            resolve_key(&path, LookupStrategy::SpaceToken).unwrap(),
            LookupKey::Token("456".into())
        );
    }

    #[test]
    fn space_token_keeps_non_numeric_tokens() {
        assert_eq!(space_token(Path::new("x abc y")).unwrap(), "abc");
    }

    #[test]
    fn space_token_needs_three_tokens() {
        let err = space_token(Path::new("123 Song.mp3")).unwrap_err();
        assert!(matches!(err, TagError::InvalidFilename(_)));
    }

    #[test]
    fn delimiter_phrase_strips_one_mp3_suffix() {
        assert_eq!(
            delimiter_phrase(Path::new("42 - Cool Song.mp3")).unwrap(),
            "Cool Song"
        );
        assert_eq!(
            delimiter_phrase(Path::new("42 - Cool Song.mp3.mp3")).unwrap(),
            "Cool Song.mp3"
        );
        assert_eq!(
            delimiter_phrase(Path::new("42 - Cool Song.MP3")).unwrap(),
            "Cool Song.MP3"
        );
    }

    #[test]
    fn delimiter_phrase_splits_on_first_delimiter_only() {
        assert_eq!(
            delimiter_phrase(Path::new("a - b - c.mp3")).unwrap(),
            "b - c"
        );
    }

    #[test]
    fn missing_delimiter_is_an_error_not_a_panic() {
        let err = delimiter_phrase(Path::new("Cool Song.mp3")).unwrap_err();
        assert!(matches!(err, TagError::InvalidFilename(_)));
    }
}
