use crate::config::RunConfig;
use crate::placement::{place, PlaceOptions, Placement};
use crate::scanner::{list_files, FileEntry, FilePattern};
use crate::tag_reader::TagReader;
use crate::template::{parse_template, render, RenderOptions, RenderResult, TemplatePart};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    pub placed: usize,
    pub unchanged: usize,
    pub dry_run: usize,
    pub skipped: usize,
    pub unreadable: usize,
    pub failed: usize,
    pub traversal_errors: usize,
}

/// Processes every matching file below `config.base_dir`, one at a time.
///
/// Per-file problems are logged and counted. The only error returned is a
/// fatal one (invalid template, missing target directory), which stops the
/// run before any further file is handled.
pub fn run(config: &RunConfig, reader: &dyn TagReader) -> Result<RunSummary> {
    let parts = parse_template(&config.template)?;
    let pattern = FilePattern::new(&config.pattern);
    let render_options = config.render_options();
    let place_options = config.place_options();
    let mut summary = RunSummary::default();

    log::debug!(
        "Scanning {} for {} (template {:?})",
        config.base_dir.display(),
        config.pattern,
        config.template
    );

    for entry in list_files(&config.base_dir, &pattern) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::error!("{err:#}");
                summary.traversal_errors += 1;
                continue;
            }
        };
        summary.scanned += 1;
        process_file(
            &entry,
            &parts,
            config,
            reader,
            &render_options,
            &place_options,
            &mut summary,
        )?;
    }

    Ok(summary)
}

fn process_file(
    entry: &FileEntry,
    parts: &[TemplatePart],
    config: &RunConfig,
    reader: &dyn TagReader,
    render_options: &RenderOptions,
    place_options: &PlaceOptions,
    summary: &mut RunSummary,
) -> Result<()> {
    let tags = match reader.read_tags(&entry.full_path) {
        Ok(tags) => tags,
        Err(err) => {
            log::error!("File {} is not readable.", entry.full_path.display());
            log::debug!("{err:#}");
            summary.unreadable += 1;
            return Ok(());
        }
    };

    let file_name = entry
        .full_path
        .file_name()
        .unwrap_or_else(|| OsStr::new(&entry.short_name));
    let (relative_path, original_filename) = match render(parts, &tags, file_name, render_options)
    {
        RenderResult::Rendered {
            relative_path,
            original_filename,
        } => (relative_path, original_filename),
        RenderResult::Skipped(reason) => {
            log::warn!("Skipping {}: {reason}", entry.full_path.display());
            summary.skipped += 1;
            return Ok(());
        }
    };

    match place(
        &entry.full_path,
        &relative_path,
        &original_filename,
        &config.target_dir,
        place_options,
    ) {
        Ok(Placement::Unchanged) => summary.unchanged += 1,
        Ok(Placement::DryRun { .. }) => summary.dry_run += 1,
        Ok(Placement::Copied { .. } | Placement::Moved { .. }) => summary.placed += 1,
        Err(err) if err.is_fatal() => return Err(err.into()),
        Err(err) => {
            log::error!("{err}");
            summary.failed += 1;
        }
    }

    Ok(())
}
