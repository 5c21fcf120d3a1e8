mod config;
mod metadata;
mod organizer;
mod placement;
mod sanitize;
mod scanner;
mod tag_reader;
mod template;

pub use config::RunConfig;
pub use metadata::{Field, TrackMetadata};
pub use organizer::{run, RunSummary};
pub use placement::{place, PlaceOptions, Placement, PlacementError};
pub use scanner::{list_files, FileEntry, FilePattern, DEFAULT_PATTERN};
pub use tag_reader::{Id3TagReader, TagReader};
pub use template::{
    parse_template, render, render_template, validate_template, RenderOptions, RenderResult,
    SkipReason, TemplateError, TemplatePart, DEFAULT_TEMPLATE,
};
