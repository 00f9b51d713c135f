//! Settings management for the freight CLI
//!
//! Settings live in a JSON document. Keys missing from the stored document
//! are filled from the defaults, so older or hand-edited files keep working.

use crate::error::{CliError, Result};
use freight_pipeline::export::{
    BatchMode, BatchOptions, ExportOptions, DEFAULT_FILENAME_PATTERN, DEFAULT_ROWS_PER_FILE,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ============================================================================
// Settings Constants
// ============================================================================

/// Directory under the user config dir holding the settings file
pub const APP_DIR_NAME: &str = "freight-matrix";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Rows per batch file for fresh settings
pub const DEFAULT_BATCH_ROWS: usize = 100_000;

/// Every key accepted by [`Settings::get`] and [`Settings::set`]
pub const KEYS: [&str; 9] = [
    "export.folder",
    "export.open_folder_after",
    "export.filename_pattern",
    "export.formats.csv",
    "export.formats.json",
    "batch.enabled",
    "batch.mode",
    "batch.rows_per_file",
    "batch.group_column",
];

/// Persisted CLI settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
    pub batch: BatchSettings,
}

/// Where and how files are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub folder: PathBuf,
    pub open_folder_after: bool,
    pub filename_pattern: String,
    pub formats: FormatSettings,
}

/// Output formats to write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    pub csv: bool,
    pub json: bool,
}

/// How records are split across files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    pub enabled: bool,

    /// Anything other than `"rows"` selects group mode
    #[serde(deserialize_with = "lenient_mode")]
    pub mode: BatchMode,

    /// Values that are not integers fall back to 1000
    #[serde(deserialize_with = "lenient_rows")]
    pub rows_per_file: usize,

    pub group_column: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            folder: cwd.join("export"),
            open_folder_after: true,
            filename_pattern: DEFAULT_FILENAME_PATTERN.to_string(),
            formats: FormatSettings::default(),
        }
    }
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            csv: false,
            json: true,
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: BatchMode::Rows,
            rows_per_file: DEFAULT_BATCH_ROWS,
            group_column: "postcode".to_string(),
        }
    }
}

impl Settings {
    /// Build the options handed to the exporter
    pub fn to_export_options(&self) -> ExportOptions {
        ExportOptions {
            folder: self.export.folder.clone(),
            write_csv: self.export.formats.csv,
            write_json: self.export.formats.json,
            filename_pattern: self.export.filename_pattern.clone(),
            batch: BatchOptions {
                enabled: self.batch.enabled,
                mode: self.batch.mode,
                rows_per_file: self.batch.rows_per_file.max(1),
                group_column: self.batch.group_column.clone(),
            },
        }
    }

    /// Read a value by dotted key, e.g. `batch.mode`
    pub fn get(&self, key: &str) -> Result<Value> {
        let pointer = pointer_for(key)?;
        let doc = serde_json::to_value(self)?;
        doc.pointer(&pointer)
            .cloned()
            .ok_or_else(|| CliError::config(format!("Unknown config key: {}", key)))
    }

    /// Set a value by dotted key.
    ///
    /// `raw` is taken literally for text settings and parsed as JSON
    /// (`true`, `250`) for the others.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let pointer = pointer_for(key)?;
        check_strict(key, raw)?;

        let mut doc = serde_json::to_value(&*self)?;
        let slot = doc
            .pointer_mut(&pointer)
            .ok_or_else(|| CliError::config(format!("Unknown config key: {}", key)))?;

        *slot = if slot.is_string() {
            Value::String(raw.to_string())
        } else {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        };

        *self = serde_json::from_value(doc)
            .map_err(|e| CliError::config(format!("Invalid value for {}: {}", key, e)))?;
        Ok(())
    }
}

fn pointer_for(key: &str) -> Result<String> {
    if !KEYS.contains(&key) {
        return Err(CliError::config(format!("Unknown config key: {}", key)));
    }
    Ok(format!("/{}", key.replace('.', "/")))
}

/// Stricter than the load rules: `set` rejects values that load would coerce
fn check_strict(key: &str, raw: &str) -> Result<()> {
    match key {
        "batch.mode" => {
            raw.parse::<BatchMode>()?;
        },
        "batch.rows_per_file" => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => {},
            _ => {
                return Err(CliError::config(format!(
                    "batch.rows_per_file must be a positive integer, got '{}'",
                    raw
                )))
            },
        },
        _ => {},
    }
    Ok(())
}

/// Render a settings value for display (strings without quotes)
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn lenient_mode<'de, D>(deserializer: D) -> std::result::Result<BatchMode, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(mode_from_value(&value))
}

fn lenient_rows<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(rows_from_value(&value))
}

fn mode_from_value(value: &Value) -> BatchMode {
    match value.as_str() {
        Some(s) if s.trim().eq_ignore_ascii_case("rows") => BatchMode::Rows,
        _ => BatchMode::Group,
    }
}

/// Integer-like values truncate and clamp to at least 1; anything else is 1000
fn rows_from_value(value: &Value) -> usize {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };

    match parsed {
        Some(n) => usize::try_from(n.max(1)).unwrap_or(DEFAULT_ROWS_PER_FILE),
        None => DEFAULT_ROWS_PER_FILE,
    }
}

/// Deep merge: keys missing from `stored` are copied from `defaults`,
/// nested objects merge recursively, and stored values win.
pub fn merge_defaults(stored: Value, defaults: &Value) -> Value {
    match (stored, defaults) {
        (Value::Object(mut map), Value::Object(default_map)) => {
            for (key, default_value) in default_map {
                let merged = match map.remove(key) {
                    Some(value) => merge_defaults(value, default_value),
                    None => default_value.clone(),
                };
                map.insert(key.clone(), merged);
            }
            Value::Object(map)
        },
        (stored, _) => stored,
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistence for [`Settings`]
pub trait SettingsStore {
    /// Load settings, falling back to defaults when nothing usable is stored
    fn load(&self) -> Settings;

    /// Persist settings
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings stored as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `path` when given, otherwise the per-user default location
    pub fn resolve(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// `<config_dir>/freight-matrix/settings.json`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CliError::config("Could not determine config directory"))?;
        Ok(dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(&self.path)?;
        let stored: Value = serde_json::from_str(&text)?;
        let defaults = serde_json::to_value(Settings::default())?;
        let settings = serde_json::from_value(merge_defaults(stored, &defaults))?;
        Ok(Some(settings))
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Settings {
        match self.read() {
            Ok(Some(settings)) => {
                debug!(path = %self.path.display(), "Loaded settings");
                settings
            },
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable settings file");
                Settings::default()
            },
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("nested").join(SETTINGS_FILE_NAME))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.export.open_folder_after);
        assert!(settings.export.folder.ends_with("export"));
        assert_eq!(settings.export.filename_pattern, "{base}_{batch}_{group}_{ts}.{ext}");
        assert!(!settings.export.formats.csv);
        assert!(settings.export.formats.json);
        assert!(settings.batch.enabled);
        assert_eq!(settings.batch.mode, BatchMode::Rows);
        assert_eq!(settings.batch.rows_per_file, 100_000);
        assert_eq!(settings.batch.group_column, "postcode");
    }

    #[test]
    fn test_merge_defaults_fills_missing_keys() {
        let defaults = json!({"a": 1, "b": {"c": 2, "d": 3}});
        let stored = json!({"b": {"c": 20}, "extra": true});

        let merged = merge_defaults(stored, &defaults);
        assert_eq!(merged, json!({"a": 1, "b": {"c": 20, "d": 3}, "extra": true}));
    }

    #[test]
    fn test_merge_defaults_keeps_stored_scalars() {
        let defaults = json!({"b": {"c": 2}});
        assert_eq!(merge_defaults(json!({"b": 5}), &defaults), json!({"b": 5}));
        assert_eq!(merge_defaults(json!([1]), &defaults), json!([1]));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store(&dir).load(), Settings::default());
    }

    #[test]
    fn test_corrupt_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.load(), Settings::default());
    }

    #[test]
    fn test_partial_file_is_merged() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(
            store.path(),
            r#"{"export": {"formats": {"csv": true}}, "batch": {"mode": "group"}}"#,
        )
        .unwrap();

        let settings = store.load();
        assert!(settings.export.formats.csv);
        assert!(settings.export.formats.json);
        assert_eq!(settings.batch.mode, BatchMode::Group);
        assert_eq!(settings.batch.rows_per_file, 100_000);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let mut settings = Settings::default();
        settings.export.folder = PathBuf::from("/tmp/freight-out");
        settings.batch.rows_per_file = 250;
        store.save(&settings).unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n  \"batch\""));
        assert_eq!(store.load(), settings);
    }

    #[test]
    fn test_lenient_rows_per_file() {
        assert_eq!(rows_from_value(&json!(25)), 25);
        assert_eq!(rows_from_value(&json!("40")), 40);
        assert_eq!(rows_from_value(&json!(5.7)), 5);
        assert_eq!(rows_from_value(&json!(0)), 1);
        assert_eq!(rows_from_value(&json!(-3)), 1);
        assert_eq!(rows_from_value(&json!("abc")), 1000);
        assert_eq!(rows_from_value(&json!(null)), 1000);
    }

    #[test]
    fn test_lenient_mode() {
        assert_eq!(mode_from_value(&json!("rows")), BatchMode::Rows);
        assert_eq!(mode_from_value(&json!(" ROWS ")), BatchMode::Rows);
        assert_eq!(mode_from_value(&json!("group")), BatchMode::Group);
        assert_eq!(mode_from_value(&json!("pages")), BatchMode::Group);
        assert_eq!(mode_from_value(&json!(3)), BatchMode::Group);
    }

    #[test]
    fn test_get_and_set() {
        let mut settings = Settings::default();

        settings.set("export.formats.csv", "true").unwrap();
        assert_eq!(settings.get("export.formats.csv").unwrap(), json!(true));

        settings.set("batch.rows_per_file", "500").unwrap();
        assert_eq!(settings.batch.rows_per_file, 500);

        settings.set("batch.mode", "group").unwrap();
        assert_eq!(settings.batch.mode, BatchMode::Group);

        settings.set("batch.group_column", "123").unwrap();
        assert_eq!(settings.batch.group_column, "123");

        settings.set("export.filename_pattern", "{base}.{ext}").unwrap();
        assert_eq!(display_value(&settings.get("export.filename_pattern").unwrap()), "{base}.{ext}");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("export.colour", "red").is_err());
        assert!(settings.set("batch.mode", "pages").is_err());
        assert!(settings.set("batch.rows_per_file", "0").is_err());
        assert!(settings.set("batch.rows_per_file", "many").is_err());
        assert!(settings.set("export.open_folder_after", "maybe").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_every_key_is_readable() {
        let settings = Settings::default();
        for key in KEYS {
            assert!(settings.get(key).is_ok(), "{}", key);
        }
    }

    #[test]
    fn test_to_export_options() {
        let mut settings = Settings::default();
        settings.batch.rows_per_file = 0;
        settings.export.formats.csv = true;

        let options = settings.to_export_options();
        assert!(options.write_csv);
        assert!(options.write_json);
        assert!(options.batch.enabled);
        assert_eq!(options.batch.rows_per_file, 1);
        assert_eq!(options.folder, settings.export.folder);
    }
}
