//! File-backed preference store for native hosts.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::prefs::{PrefsStore, PrefsStoreFuture};

type PrefMap = BTreeMap<String, String>;

const PREFS_FILE_NAME: &str = "prefs.json";

fn load_pref_map(path: &Path) -> Result<PrefMap, String> {
    if !path.exists() {
        return Ok(PrefMap::new());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(PrefMap::new());
    }
    serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse prefs map {}: {err}", path.display()))
}

fn save_pref_map(path: &Path, map: &PrefMap) -> Result<(), String> {
    let serialized = serde_json::to_string_pretty(map)
        .map_err(|err| format!("failed to serialize prefs map: {err}"))?;
    fs::write(path, serialized).map_err(|err| format!("failed to write {}: {err}", path.display()))
}

fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        Err("Preference key must not be empty".to_string())
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Preference store backed by a single JSON map file under a root directory.
///
/// Every operation re-reads the map so several stores rooted at the same directory stay
/// consistent with each other.
pub struct FilePrefsStore {
    file: PathBuf,
}

impl FilePrefsStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the root directory cannot be created.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, String> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .map_err(|err| format!("failed to create prefs dir {}: {err}", root.display()))?;
        Ok(Self {
            file: root.join(PREFS_FILE_NAME),
        })
    }

    /// Path of the backing map file.
    pub fn file_path(&self) -> &Path {
        &self.file
    }

    fn load(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        let map = load_pref_map(&self.file)?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_pref_map(&self.file)?;
        map.insert(key.to_string(), raw.to_string());
        save_pref_map(&self.file, &map)
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        validate_key(key)?;
        let mut map = load_pref_map(&self.file)?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        save_pref_map(&self.file, &map)
    }
}

impl PrefsStore for FilePrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { self.load(key) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.save(key, raw) })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move { self.delete(key) })
    }
}
