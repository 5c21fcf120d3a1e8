use crate::metadata::TrackMetadata;
use anyhow::{Context, Result};
use id3::{ErrorKind, Tag, TagLike};
use std::path::Path;

/// Source of per-file tag records.
pub trait TagReader {
    /// Reads the tags of one file. An error means the file is unreadable.
    fn read_tags(&self, path: &Path) -> Result<TrackMetadata>;
}

/// Reads ID3v2 tags from MP3 files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3TagReader;

impl TagReader for Id3TagReader {
    fn read_tags(&self, path: &Path) -> Result<TrackMetadata> {
        match Tag::read_from_path(path) {
            Ok(tag) => Ok(metadata_from_tag(&tag)),
            Err(err) if matches!(err.kind, ErrorKind::NoTag) => {
                log::trace!("No ID3 tag in {}", path.display());
                Ok(TrackMetadata::default())
            }
            Err(err) => {
                Err(err).with_context(|| format!("failed to read ID3 tag: {}", path.display()))
            }
        }
    }
}

fn metadata_from_tag(tag: &Tag) -> TrackMetadata {
    TrackMetadata {
        title: normalize(tag.title()),
        track: tag.track(),
        artist: normalize(tag.artist()),
        album: normalize(tag.album()),
        year: tag.year(),
        genre: normalize(tag.genre_parsed().as_deref()),
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
