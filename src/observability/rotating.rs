//! Size-rotated append-only trace file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the file grows past 5 MB.
const ROTATE_AFTER_BYTES: u64 = 5 * 1024 * 1024;

/// Rotated generations kept next to the live file (`.1` is the newest).
const KEPT_GENERATIONS: usize = 2;

/// Appends lines to a file, rolling it over to numbered backups when it gets
/// too large.
///
/// `notehub-otlp.json` becomes `notehub-otlp.json.1`, the old `.1` becomes
/// `.2`, and anything past [`KEPT_GENERATIONS`] is deleted.
pub struct RotatingFile {
    path: PathBuf,
    limit: u64,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, ROTATE_AFTER_BYTES)
    }

    pub const fn with_limit(path: PathBuf, limit: u64) -> Self {
        Self {
            path,
            limit,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` and a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, written, or rotated, or if the lock
    /// was poisoned.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.limit) {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        if let Some(file) = guard.as_mut() {
            writeln!(file, "{line}")?;
            file.flush()?;
        }
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        let oldest = generation(&self.path, KEPT_GENERATIONS);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for n in (1..KEPT_GENERATIONS).rev() {
            let from = generation(&self.path, n);
            if from.exists() {
                fs::rename(&from, generation(&self.path, n + 1))?;
            }
        }

        if self.path.exists() {
            fs::rename(&self.path, generation(&self.path, 1))?;
        }
        Ok(())
    }
}

fn generation(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let file = RotatingFile::new(path.clone());

        file.append_line("{\"a\":1}").unwrap();
        file.append_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_and_prunes_generations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let file = RotatingFile::with_limit(path.clone(), 4);

        for line in ["first", "second", "third", "fourth"] {
            file.append_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fourth\n");
        assert_eq!(fs::read_to_string(generation(&path, 1)).unwrap(), "third\n");
        assert_eq!(fs::read_to_string(generation(&path, 2)).unwrap(), "second\n");
        assert!(!generation(&path, 3).exists());
    }
}
