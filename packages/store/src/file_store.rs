//! # Filesystem-backed storage
//!
//! [`FileStorage`] is the [`KeyValueStorage`] used by native builds. Each key
//! becomes one JSON file, which keeps the on-disk layout readable and lets a
//! single store be reset by deleting its file.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── auth-storage.json
//! ├── meeting-storage.json
//! └── token.json
//! ```
//!
//! ## Platform data directories
//!
//! Callers pass `dirs::data_dir().join("itda")`:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/itda/` |
//! | Linux | `~/.local/share/itda/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\itda\` |

use std::path::PathBuf;

use crate::persist::KeyValueStorage;

/// Filesystem-backed storage for native persistence.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn item_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers, but never let one escape the base dir.
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base.join(format!("{name}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.item_path(key)).ok()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!("Failed to create storage dir {}: {}", self.base.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.item_path(key), value) {
            tracing::warn!("Failed to write storage key {}: {}", key, e);
        }
    }

    fn remove_item(&self, key: &str) {
        let _ = std::fs::remove_file(self.item_path(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::MeetingState;
    use crate::persist::{restore, save};

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!("itda_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let storage = FileStorage::new(dir.clone());
        let mut state = MeetingState::default();
        state.selected_category = "카페".to_string();
        save(&storage, &state);

        // Re-open from same directory
        let reopened = FileStorage::new(dir.clone());
        let restored: MeetingState = restore(&reopened);
        assert_eq!(restored.selected_category, "카페");
        assert!(dir.join("meeting-storage.json").exists());

        reopened.remove_item("meeting-storage");
        assert!(reopened.get_item("meeting-storage").is_none());

        // Cleanup
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_keys_stay_inside_base() {
        let storage = FileStorage::new(PathBuf::from("/tmp/itda"));
        assert_eq!(
            storage.item_path("../escape"),
            PathBuf::from("/tmp/itda/___escape.json")
        );
    }
}
