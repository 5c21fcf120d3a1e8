use crate::placement::PlaceOptions;
use crate::scanner::DEFAULT_PATTERN;
use crate::template::{RenderOptions, DEFAULT_TEMPLATE};
use std::path::PathBuf;

/// Run-wide settings, fixed before traversal starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub template: String,
    pub base_dir: PathBuf,
    pub target_dir: PathBuf,
    pub pattern: String,
    pub copy_instead_of_move: bool,
    pub dry_run: bool,
    pub replace_spaces: bool,
    pub allow_missing_album: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            base_dir: PathBuf::from("."),
            target_dir: PathBuf::from("."),
            pattern: DEFAULT_PATTERN.to_string(),
            copy_instead_of_move: false,
            dry_run: false,
            replace_spaces: false,
            allow_missing_album: true,
        }
    }
}

impl RunConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            allow_missing_album: self.allow_missing_album,
            replace_spaces: self.replace_spaces,
        }
    }

    pub fn place_options(&self) -> PlaceOptions {
        PlaceOptions {
            copy_instead_of_move: self.copy_instead_of_move,
            dry_run: self.dry_run,
        }
    }
}
