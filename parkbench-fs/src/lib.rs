//! Filesystem helpers for Parkbench built on `cap-std` and `camino`.
//!
//! Every helper opens the nearest directory with ambient authority and then
//! works relative to that capability, so callers can pass absolute or
//! relative UTF-8 paths alike.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::warn;
use std::io;
use std::path::Component;

/// Suffix for the scratch file written before an atomic replace.
const SCRATCH_SUFFIX: &str = ".partial";

/// Suffix for the marker file that holds a [`FileLock`].
const LOCK_SUFFIX: &str = ".lock";

/// Open a UTF-8 file path for reading.
///
/// # Errors
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory containing `path` and return it with the file name.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} should name a file")))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether `path` exists and is a regular file.
///
/// A missing file or parent directory yields `Ok(false)`.
///
/// # Errors
/// Propagates I/O errors other than [`io::ErrorKind::NotFound`].
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Read a UTF-8 file, returning `None` when it does not exist yet.
///
/// # Errors
/// Propagates I/O errors other than a missing file.
pub fn read_to_string_if_exists(path: &Utf8Path) -> io::Result<Option<String>> {
    if !file_is_file(path)? {
        return Ok(None);
    }
    let (dir, name) = open_dir_and_file(path)?;
    dir.read_to_string(name.as_str()).map(Some)
}

/// Create every missing ancestor directory of `path`.
///
/// # Errors
/// Propagates failures to open the anchor directory or create children.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (anchor, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&relative)
}

/// Replace the contents of `path` without exposing a half-written file.
///
/// The bytes land in a sibling scratch file first, which is then renamed over
/// the target. Missing parent directories are created.
///
/// # Errors
/// Propagates failures to create directories, write, or rename.
pub fn write_atomically(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    let scratch = format!(".{name}{SCRATCH_SUFFIX}");
    dir.write(scratch.as_str(), contents)?;
    dir.rename(scratch.as_str(), &dir, name.as_str())
}

/// Exclusive claim on a file, held by a sibling `.{name}.lock` marker.
///
/// The marker is removed when the guard drops. Only cooperating callers that
/// also go through [`lock_file`] are excluded.
#[derive(Debug)]
pub struct FileLock {
    dir: fs_utf8::Dir,
    marker: String,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(err) = self.dir.remove_file(self.marker.as_str()) {
            warn!("failed to release lock marker {}: {err}", self.marker);
        }
    }
}

/// Claim `path` for a read-modify-write cycle.
///
/// Missing parent directories are created so a lock can be taken before the
/// file itself exists.
///
/// # Errors
/// Returns [`io::ErrorKind::AlreadyExists`] while another [`FileLock`] holds
/// `path`, and propagates other failures to create the marker.
pub fn lock_file(path: &Utf8Path) -> io::Result<FileLock> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    let marker = marker_name(&name);
    let mut options = fs_utf8::OpenOptions::new();
    options.write(true).create_new(true);
    dir.open_with(marker.as_str(), &options)?;
    Ok(FileLock { dir, marker })
}

/// Path of the marker that [`lock_file`] creates for `path`.
#[must_use]
pub fn lock_marker(path: &Utf8Path) -> Utf8PathBuf {
    path.with_file_name(marker_name(path.file_name().unwrap_or_default()))
}

fn marker_name(name: &str) -> String {
    format!(".{name}{LOCK_SUFFIX}")
}

/// Split a directory path into an ambient anchor and the remaining relative
/// components.
///
/// Absolute paths anchor at their root (or drive prefix on Windows); relative
/// paths anchor at the current directory.
fn split_anchor(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let mut components = std_path.components();
    let anchor = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            // Skip the root separator that follows a drive prefix.
            if matches!(components.clone().next(), Some(Component::RootDir)) {
                components.next();
            }
            Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => {
            components = std_path.components();
            Utf8PathBuf::from(".")
        }
    };
    let relative = Utf8PathBuf::from_path_buf(components.as_path().to_path_buf())
        .map_err(|_| io::Error::other(format!("{path} is not valid UTF-8")))?;
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}
