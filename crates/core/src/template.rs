use crate::metadata::{Field, TrackMetadata};
use crate::sanitize::{replace_whitespace, sanitize_component};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use thiserror::Error;

pub const DEFAULT_TEMPLATE: &str = "%a/%A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Placeholder(Field),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("{0} info missing")]
    MissingField(Field),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub allow_missing_album: bool,
    pub replace_spaces: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    Rendered {
        relative_path: String,
        original_filename: OsString,
    },
    Skipped(SkipReason),
}

pub fn validate_template(input: &str) -> Result<(), TemplateError> {
    parse_template(input).map(|_| ())
}

/// Splits a template into literal runs and placeholders in a single scan.
///
/// Recognized placeholders are `%a` (artist), `%A` (album), `%t` (title),
/// `%g` (genre) and `%n` (track). `%%` stands for a literal `%`; any other
/// `%` sequence is kept as written.
pub fn parse_template(input: &str) -> Result<Vec<TemplatePart>, TemplateError> {
    if input.is_empty() {
        return Err(TemplateError::Empty);
    }

    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            literal.push(ch);
            continue;
        }

        let field = match chars.peek() {
            Some('a') => Some(Field::Artist),
            Some('A') => Some(Field::Album),
            Some('t') => Some(Field::Title),
            Some('g') => Some(Field::Genre),
            Some('n') => Some(Field::Track),
            Some('%') => {
                chars.next();
                literal.push('%');
                continue;
            }
            _ => None,
        };

        match field {
            Some(field) => {
                chars.next();
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                parts.push(TemplatePart::Placeholder(field));
            }
            None => literal.push('%'),
        }
    }

    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }

    Ok(parts)
}

/// Renders parsed template parts against one file's tags.
///
/// Missing fields are checked in [`Field::CHECK_ORDER`] and only for
/// placeholders the template uses; the first one found skips the file.
pub fn render(
    parts: &[TemplatePart],
    tags: &TrackMetadata,
    original_filename: &OsStr,
    options: &RenderOptions,
) -> RenderResult {
    let used: HashSet<Field> = parts
        .iter()
        .filter_map(|part| match part {
            TemplatePart::Placeholder(field) => Some(*field),
            TemplatePart::Literal(_) => None,
        })
        .collect();

    for field in Field::CHECK_ORDER {
        if !used.contains(&field) || tags.has(field) {
            continue;
        }
        if field == Field::Album && options.allow_missing_album {
            continue;
        }
        return RenderResult::Skipped(SkipReason::MissingField(field));
    }

    let mut output = String::new();
    for part in parts {
        match part {
            TemplatePart::Literal(s) => output.push_str(s),
            TemplatePart::Placeholder(field) => {
                if let Some(value) = tags.value(*field) {
                    output.push_str(&sanitize_component(&value));
                }
            }
        }
    }

    if options.replace_spaces {
        output = replace_whitespace(&output);
    }

    RenderResult::Rendered {
        relative_path: output,
        original_filename: original_filename.to_os_string(),
    }
}

pub fn render_template(
    template: &str,
    tags: &TrackMetadata,
    original_filename: &OsStr,
    options: &RenderOptions,
) -> Result<RenderResult, TemplateError> {
    let parts = parse_template(template)?;
    Ok(render(&parts, tags, original_filename, options))
}
