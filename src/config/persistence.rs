//! Disk persistence for user settings.
//!
//! Settings live in a single JSON file. A missing file means defaults; a file
//! that exists but cannot be read or parsed is reported, never silently
//! replaced.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use super::Settings;

pub fn default_settings_path() -> PathBuf {
    // ~/.rusty-guard/settings.json
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    home.join(".rusty-guard").join("settings.json")
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create settings directory: {}", parent.display()))?;
    }
    Ok(())
}

fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    ensure_parent_dir(path)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).with_context(|| format!("Failed to write temp file: {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| {
        format!(
            "Failed to replace {} with {}",
            path.display(),
            tmp.display()
        )
    })?;
    Ok(())
}

pub fn load(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let settings: Settings =
        serde_json::from_str(&raw).with_context(|| format!("Invalid settings JSON at {}", path.display()))?;
    Ok(settings)
}

pub fn load_or_default(path: &Path) -> anyhow::Result<Settings> {
    if !path.exists() {
        tracing::debug!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    load(path)
}

pub fn save(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    let data = serde_json::to_vec_pretty(settings).context("Failed to serialize settings")?;
    write_atomic(path, &data)
}
