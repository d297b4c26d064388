use crate::error::DishDiveError;
use crate::model::Theme;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Storage key for the persisted theme preference.
pub const THEME_KEY: &str = "dishdive_theme";

/// Minimal string key-value store, injected so settings never touch
/// ambient storage directly.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), DishDiveError>;
}

/// File-backed store: one file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key))
            .ok()
            .map(|v| v.trim().to_string())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DishDiveError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(key), value)?;
        Ok(())
    }
}

/// In-memory store, mainly for tests and embedding hosts that persist
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DishDiveError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Process-wide user settings. Read once at startup; the theme is written
/// back on every toggle, last write wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    theme: Theme,
}

impl Settings {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let theme = store
            .get(THEME_KEY)
            .map(|v| Theme::from_stored(&v))
            .unwrap_or_default();
        debug!("Loaded theme preference: {}", theme.as_str());
        Settings { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist the new value.
    pub fn toggle_theme(
        &mut self,
        store: &mut dyn PreferenceStore,
    ) -> Result<Theme, DishDiveError> {
        self.theme = self.theme.toggled();
        store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }
}
