use super::{FileAccess, StorageBackend};
use crate::error::{QuireError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "quire.json";

/// Keeps the whole collection in one JSON file.
pub struct FsBackend {
    root: PathBuf,
    file_name: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_DATA_FILE.to_string(),
        }
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(unavailable)?;
        }
        Ok(())
    }
}

fn unavailable(err: std::io::Error) -> QuireError {
    QuireError::StorageUnavailable(err.to_string())
}

impl StorageBackend for FsBackend {
    fn save(&self, serialized: &str) -> Result<()> {
        self.ensure_dir()?;

        // Never leave a half-written data file behind.
        let tmp_file = self.root.join(format!(".quire-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, serialized).map_err(unavailable)?;
        if let Err(e) = fs::rename(&tmp_file, self.data_path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(unavailable(e));
        }
        Ok(())
    }

    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(self.data_path()) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable(e)),
        }
    }

    fn location(&self) -> String {
        self.data_path().display().to_string()
    }
}

/// Plain filesystem reads and writes. Has no dialogs of its own, so the
/// pickers return whatever path it was preconfigured with.
#[derive(Debug, Default, Clone)]
pub struct FsFileAccess {
    save_target: Option<PathBuf>,
    open_target: Option<PathBuf>,
}

impl FsFileAccess {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_save_target(mut self, path: PathBuf) -> Self {
        self.save_target = Some(path);
        self
    }

    pub fn with_open_target(mut self, path: PathBuf) -> Self {
        self.open_target = Some(path);
        self
    }
}

impl FileAccess for FsFileAccess {
    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(QuireError::Io)?;
            }
        }
        fs::write(path, content).map_err(QuireError::Io)
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(QuireError::Io)
    }

    fn pick_save_path(&self, suggested_name: &str) -> Option<PathBuf> {
        self.save_target
            .as_ref()
            .map(|target| {
                if target.is_dir() {
                    target.join(suggested_name)
                } else {
                    target.clone()
                }
            })
    }

    fn pick_open_path(&self) -> Option<PathBuf> {
        self.open_target.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("nested"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_dir_and_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("nested")).with_file_name("doc.json");

        backend.save("{\"a\":1}").unwrap();
        backend.save("{\"a\":2}").unwrap();

        assert_eq!(backend.load().unwrap().as_deref(), Some("{\"a\":2}"));
        let leftovers: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn save_into_unwritable_root_reports_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        // A regular file where the directory should be.
        let backend = FsBackend::new(blocker.join("sub"));
        assert!(matches!(
            backend.save("{}"),
            Err(QuireError::StorageUnavailable(_))
        ));
    }

    #[test]
    fn file_access_round_trip_and_pickers() {
        let dir = tempfile::tempdir().unwrap();
        let access = FsFileAccess::new().with_save_target(dir.path().to_path_buf());

        let target = access.pick_save_path("out.json").unwrap();
        assert_eq!(target, dir.path().join("out.json"));
        access.write_file(&target, "hello").unwrap();
        assert_eq!(access.read_file(&target).unwrap(), "hello");
        assert!(access.pick_open_path().is_none());
        assert!(access.read_file(&dir.path().join("missing")).is_err());
    }
}
