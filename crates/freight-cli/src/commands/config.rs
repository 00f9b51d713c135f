//! `freight config` command implementation
//!
//! Reads and writes the persisted settings file.

use crate::config::{display_value, JsonFileStore, Settings, SettingsStore, KEYS};
use crate::error::Result;
use colored::Colorize;
use std::fmt::Write;

/// Print one setting
pub fn get(store: &dyn SettingsStore, key: &str) -> Result<()> {
    let settings = store.load();
    println!("{}", display_value(&settings.get(key)?));
    Ok(())
}

/// Change one setting and save
pub fn set(store: &dyn SettingsStore, key: &str, value: &str) -> Result<()> {
    let mut settings = store.load();
    settings.set(key, value)?;
    store.save(&settings)?;

    println!("{} Set {} = {}", "✓".green(), key, display_value(&settings.get(key)?));
    Ok(())
}

/// Show all settings and where they are stored
pub fn show(store: &JsonFileStore) -> Result<()> {
    println!("{}", "Freight Matrix Settings:".cyan().bold());
    println!();
    print!("{}", render_settings(&store.load())?);
    println!();
    println!("{:<26} {}", "Settings file:", store.path().display());
    Ok(())
}

/// Restore and save the defaults
pub fn reset(store: &dyn SettingsStore) -> Result<()> {
    store.save(&Settings::default())?;
    println!("{} Settings restored to defaults", "✓".green());
    Ok(())
}

/// One `key value` line per setting
pub fn render_settings(settings: &Settings) -> Result<String> {
    let mut out = String::new();
    for key in KEYS {
        let _ = writeln!(out, "{:<26} {}", format!("{}:", key), display_value(&settings.get(key)?));
    }
    Ok(out)
}
