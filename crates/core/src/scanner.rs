use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_PATTERN: &str = "*.mp3";

/// A file discovered below the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub short_name: String,
    pub containing_dir: PathBuf,
    pub full_path: PathBuf,
}

/// Shell-style file name pattern supporting `*` and `?`, matched ASCII
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    pattern: Vec<char>,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.chars().map(|c| c.to_ascii_lowercase()).collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<char> = name.chars().map(|c| c.to_ascii_lowercase()).collect();
        wildcard_match(&self.pattern, &name)
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

/// Lazily lists files under `root` whose name matches `pattern`.
///
/// Entries come out sorted by file name within each directory. Traversal
/// errors are yielded in place and do not end the iteration.
pub fn list_files<'a>(
    root: &'a Path,
    pattern: &'a FilePattern,
) -> impl Iterator<Item = Result<FileEntry>> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    return Some(Err(err).with_context(|| {
                        format!("failed to scan directory: {}", root.display())
                    }))
                }
            };
            if entry.file_type().is_dir() {
                return None;
            }

            let short_name = entry.file_name().to_string_lossy().to_string();
            if !pattern.matches(&short_name) {
                return None;
            }

            let full_path = entry.into_path();
            let containing_dir = full_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            Some(Ok(FileEntry {
                short_name,
                containing_dir,
                full_path,
            }))
        })
}

fn wildcard_match(pattern: &[char], name: &[char]) -> bool {
    let (mut p, mut n) = (0usize, 0usize);
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    n = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
