//! Persists generated files under an output root.
//! A failed write removes everything the writer created before it and puts
//! back the previous content of files it overwrote.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::processor::GeneratedFiles;

/// Writes a [`GeneratedFiles`] map to disk and tracks what it created.
#[derive(Debug)]
pub struct Writer {
    root: PathBuf,
    created_dirs: Vec<PathBuf>,
    created_files: Vec<PathBuf>,
    overwritten: Vec<Backup>,
}

/// Content and permissions of a file that existed before the writer replaced it.
#[derive(Debug)]
struct Backup {
    path: PathBuf,
    content: Vec<u8>,
    permissions: fs::Permissions,
}

impl Writer {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            created_dirs: Vec::new(),
            created_files: Vec::new(),
            overwritten: Vec::new(),
        }
    }

    /// Writes every file of `files` below the root.
    ///
    /// # Arguments
    /// * `files` - Destination paths, relative to the root, with their content
    ///
    /// # Errors
    /// * `Error::IoError` if a directory or file cannot be created. Files and
    ///   directories created by this call are removed and overwritten files get
    ///   their previous content back before the error is returned.
    pub fn write_all(&mut self, files: &GeneratedFiles) -> Result<()> {
        for (destination, content) in files {
            if let Err(e) = self.write_file(destination, content) {
                self.rollback();
                return Err(e);
            }
        }
        Ok(())
    }

    fn write_file(&mut self, destination: &str, content: &[u8]) -> Result<()> {
        let path = self.root.join(destination);
        if let Some(parent) = path.parent() {
            self.create_dirs(parent)?;
        }

        if path.is_file() {
            let backup = Backup {
                content: fs::read(&path)?,
                permissions: fs::metadata(&path)?.permissions(),
                path: path.clone(),
            };
            debug!("Overwriting file: {}", path.display());
            fs::write(&path, content)?;
            self.overwritten.push(backup);
        } else {
            debug!("Writing file: {}", path.display());
            fs::write(&path, content)?;
            self.created_files.push(path.clone());
        }

        set_mode(&path, is_executable(destination))
    }

    /// Creates `dir` and its missing ancestors one level at a time.
    fn create_dirs(&mut self, dir: &Path) -> Result<()> {
        let missing: Vec<&Path> = dir
            .ancestors()
            .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
            .collect();

        for dir in missing.into_iter().rev() {
            debug!("Creating directory: {}", dir.display());
            fs::create_dir(dir)?;
            self.created_dirs.push(dir.to_path_buf());
        }
        Ok(())
    }

    /// Restores overwritten files, removes created files, then removes created
    /// directories deepest first.
    fn rollback(&mut self) {
        warn!(
            "Rolling back {} file(s), {} directory(ies) and {} overwritten file(s).",
            self.created_files.len(),
            self.created_dirs.len(),
            self.overwritten.len()
        );

        for backup in self.overwritten.drain(..).rev() {
            let restored = fs::write(&backup.path, &backup.content)
                .and_then(|_| fs::set_permissions(&backup.path, backup.permissions));
            if let Err(e) = restored {
                warn!("Failed to restore {}: {}", backup.path.display(), e);
            }
        }

        for file in self.created_files.drain(..).rev() {
            if let Err(e) = fs::remove_file(&file) {
                warn!("Failed to remove {}: {}", file.display(), e);
            }
        }
        for dir in self.created_dirs.drain(..).rev() {
            if let Err(e) = fs::remove_dir(&dir) {
                warn!("Failed to remove {}: {}", dir.display(), e);
            }
        }
    }

    pub fn created_files(&self) -> &[PathBuf] {
        &self.created_files
    }

    pub fn created_dirs(&self) -> &[PathBuf] {
        &self.created_dirs
    }

    /// Files that existed before and were replaced by this writer.
    pub fn overwritten_files(&self) -> Vec<&Path> {
        self.overwritten.iter().map(|b| b.path.as_path()).collect()
    }
}

/// Whether a destination is written with the executable bit: shell scripts
/// anywhere, and extension-less files directly under `scripts/`.
pub fn is_executable(destination: &str) -> bool {
    if destination.ends_with(".sh") {
        return true;
    }
    match destination.strip_prefix("scripts/") {
        Some(name) => !name.contains('/') && !name.contains('.'),
        None => false,
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, executable: bool) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if executable { 0o755 } else { 0o644 };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _executable: bool) -> Result<()> {
    Ok(())
}

/// Ensures the output directory is safe to write to.
///
/// # Arguments
/// * `output_dir` - Target directory for the generated project
/// * `force` - Whether an existing directory may be written into
///
/// # Returns
/// * `Result<PathBuf>` - The validated output directory
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists and `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}
