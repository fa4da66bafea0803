use crate::config::constants::files;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat directory of `<basename>.bak` files, one slot per basename.
///
/// Files with the same name in different directories share a slot; the store
/// remembers which path wrote each slot last so a clobbered slot is never
/// restored into the wrong file.
#[derive(Debug)]
pub struct BackupStore {
    dir: PathBuf,
    owners: HashMap<PathBuf, PathBuf>,
}

impl BackupStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            owners: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_for(&self, path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        self.dir
            .join(format!("{}.{}", name, files::BACKUP_EXTENSION))
    }

    /// Write `content` to the slot for `path`, overwriting whatever was there
    pub fn save(&mut self, path: &Path, content: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let slot = self.slot_for(path);
        fs::write(&slot, content)?;
        if let Some(previous) = self.owners.insert(slot.clone(), path.to_path_buf()) {
            if previous != path {
                debug!(
                    slot = %slot.display(),
                    previous = %previous.display(),
                    "backup slot reassigned"
                );
            }
        }
        Ok(slot)
    }

    /// Whether `slot` still holds the backup written for `path`
    pub fn is_owned_by(&self, slot: &Path, path: &Path) -> bool {
        self.owners.get(slot).is_some_and(|owner| owner == path) && slot.is_file()
    }

    pub fn read(&self, slot: &Path) -> io::Result<String> {
        fs::read_to_string(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn slot_tracks_last_writer() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = BackupStore::new(temp_dir.path().join(".backups"));
        let first = Path::new("/repo/a/config.toml");
        let second = Path::new("/repo/b/config.toml");

        let slot = store.save(first, "first").unwrap();
        assert!(slot.ends_with("config.toml.bak"));
        assert!(store.is_owned_by(&slot, first));

        let same_slot = store.save(second, "second").unwrap();
        assert_eq!(slot, same_slot);
        assert!(!store.is_owned_by(&slot, first));
        assert!(store.is_owned_by(&slot, second));
        assert_eq!(store.read(&slot).unwrap(), "second");
    }
}
