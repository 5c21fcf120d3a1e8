use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceOptions {
    pub copy_instead_of_move: bool,
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Source already sits at its target path.
    Unchanged,
    DryRun { from: PathBuf, to: PathBuf },
    Copied { from: PathBuf, to: PathBuf },
    Moved { from: PathBuf, to: PathBuf },
}

#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("target directory does not exist: {}", .0.display())]
    TargetRootMissing(PathBuf),
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to transfer {} to {}: {source}", from.display(), to.display())]
    Transfer {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PlacementError {
    /// Whether the whole run has to stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PlacementError::TargetRootMissing(_))
    }
}

/// Places `source` at `target_root/relative_path/original_filename`.
pub fn place(
    source: &Path,
    relative_path: &str,
    original_filename: &OsStr,
    target_root: &Path,
    options: &PlaceOptions,
) -> Result<Placement, PlacementError> {
    if !target_root.is_dir() {
        return Err(PlacementError::TargetRootMissing(target_root.to_path_buf()));
    }

    let target_dir = join_relative(target_root, relative_path);
    let target_file = target_dir.join(original_filename);

    ensure_dir(&target_dir, options.dry_run)?;

    if is_same_file(source, &target_dir, original_filename) {
        log::debug!("{} is already in place", source.display());
        return Ok(Placement::Unchanged);
    }

    if options.dry_run {
        log::info!("{} -> {}", source.display(), target_file.display());
        return Ok(Placement::DryRun {
            from: source.to_path_buf(),
            to: target_file,
        });
    }

    let transfer = if options.copy_instead_of_move {
        copy_file(source, &target_file).map(|()| Placement::Copied {
            from: source.to_path_buf(),
            to: target_file.clone(),
        })
    } else {
        move_file(source, &target_file).map(|()| Placement::Moved {
            from: source.to_path_buf(),
            to: target_file.clone(),
        })
    };

    let placement = transfer.map_err(|source_err| PlacementError::Transfer {
        from: source.to_path_buf(),
        to: target_file.clone(),
        source: source_err,
    })?;
    log::info!("{} -> {}", source.display(), target_file.display());
    Ok(placement)
}

/// Joins a rendered path below `root`, dropping root, prefix, `.` and `..`
/// components so the result stays under `root`.
fn join_relative(root: &Path, relative_path: &str) -> PathBuf {
    let mut out = root.to_path_buf();
    for component in Path::new(relative_path).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::RootDir
            | Component::Prefix(_)
            | Component::CurDir
            | Component::ParentDir => {}
        }
    }
    out
}

fn ensure_dir(dir: &Path, dry_run: bool) -> Result<(), PlacementError> {
    if dir.is_dir() {
        return Ok(());
    }
    log::debug!("Creating directory {}", dir.display());
    if dry_run {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| PlacementError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn is_same_file(source: &Path, target_dir: &Path, file_name: &OsStr) -> bool {
    let (Ok(source), Ok(dir)) = (fs::canonicalize(source), fs::canonicalize(target_dir)) else {
        return false;
    };
    source == dir.join(file_name)
}

/// Copies through a temporary file in the destination directory, which is
/// persisted under the final name once the copy completed.
fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
    let dest_dir = destination
        .parent()
        .ok_or_else(|| io::Error::other("cannot determine destination directory"))?;
    let dest_name = destination
        .file_name()
        .map(|v| v.to_string_lossy().to_string())
        .ok_or_else(|| io::Error::other("cannot determine destination file name"))?;

    let mut source_file = fs::File::open(source)?;
    let mut temp_file = tempfile::Builder::new()
        .prefix(&format!(".tagmover.{dest_name}"))
        .suffix(".tmp")
        .tempfile_in(dest_dir)?;
    io::copy(&mut source_file, &mut temp_file)?;

    let permissions = source_file.metadata()?.permissions();
    temp_file.as_file().set_permissions(permissions)?;

    temp_file
        .into_temp_path()
        .persist(destination)
        .map_err(|err| err.error)?;
    Ok(())
}

/// Renames when possible, otherwise copies and removes the source once the
/// copy succeeded.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    if fs::rename(source, destination).is_ok() {
        return Ok(());
    }
    copy_file(source, destination)?;
    fs::remove_file(source)?;
    log::trace!("Removed {}", source.display());
    Ok(())
}
