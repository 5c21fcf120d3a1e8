use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Tag fields that a template can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Artist,
    Album,
    Title,
    Genre,
    Track,
}

impl Field {
    /// Order in which missing fields are reported.
    pub const CHECK_ORDER: [Field; 5] = [
        Field::Artist,
        Field::Album,
        Field::Title,
        Field::Genre,
        Field::Track,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Artist => "artist",
            Field::Album => "album",
            Field::Title => "title",
            Field::Genre => "genre",
            Field::Track => "track",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub track: Option<u32>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
}

impl TrackMetadata {
    /// Raw text of a field, or `None` when it is absent or blank.
    pub fn value(&self, field: Field) -> Option<Cow<'_, str>> {
        match field {
            Field::Artist => non_blank(self.artist.as_deref()).map(Cow::Borrowed),
            Field::Album => non_blank(self.album.as_deref()).map(Cow::Borrowed),
            Field::Title => non_blank(self.title.as_deref()).map(Cow::Borrowed),
            Field::Genre => non_blank(self.genre.as_deref()).map(Cow::Borrowed),
            Field::Track => self.track.map(|n| Cow::Owned(n.to_string())),
        }
    }

    pub fn has(&self, field: Field) -> bool {
        self.value(field).is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
