//! Persistent application settings.
//!
//! Settings live in `<config_dir>/tidyframe/config.json`. Set
//! `TIDYFRAME_CONFIG` to read and write a different file instead.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "TIDYFRAME_CONFIG";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Rows shown by `head` when no count is given
    pub preview_row_limit: u32,
    /// Upper bound for any preview request
    pub max_preview_rows: u32,
    /// Where cleaned files are written. Defaults to next to the input file.
    pub output_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            preview_row_limit: 4,
            max_preview_rows: 20,
            output_dir: None,
        }
    }
}

impl AppSettings {
    /// Number of rows to preview for a request, defaulted and capped.
    pub fn preview_rows(&self, requested: Option<u32>) -> usize {
        requested
            .unwrap_or(self.preview_row_limit)
            .min(self.max_preview_rows) as usize
    }

    /// Destination for the cleaned version of `input`.
    pub fn cleaned_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = format!("cleaned_{stem}.csv");
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => input.with_file_name(file_name),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    crate::utils::standard_paths().config_dir.join("config.json")
}

/// Reads settings from `path`, or returns defaults when the file is missing
/// or unreadable.
pub fn load_app_config_from(path: &Path) -> AppSettings {
    if path.exists()
        && let Ok(content) = std::fs::read_to_string(path)
    {
        match serde_json::from_str::<AppSettings>(&content) {
            Ok(settings) => return settings,
            Err(e) => tracing::warn!("Ignoring invalid config {}: {e}", path.display()),
        }
    }
    AppSettings::default()
}

pub fn load_app_config() -> AppSettings {
    load_app_config_from(&get_config_path())
}

/// Writes `settings` to `path` as pretty JSON, creating parent directories.
///
/// # Errors
///
/// [`AppError::Config`] when `max_preview_rows` is zero, or an I/O error when
/// the file cannot be written.
pub fn save_app_config_to(settings: &AppSettings, path: &Path) -> Result<()> {
    if settings.max_preview_rows == 0 {
        return Err(AppError::Config(
            "max_preview_rows must be at least 1".to_owned(),
        ));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Saves to the file returned by [`get_config_path`].
///
/// # Errors
///
/// See [`save_app_config_to`].
pub fn save_app_config(settings: &AppSettings) -> Result<()> {
    save_app_config_to(settings, &get_config_path())
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]
    use super::*;

    fn temp_config(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tidyframe_cfg_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_preview_rows_default_and_cap() {
        let settings = AppSettings::default();
        assert_eq!(settings.preview_rows(None), 4);
        assert_eq!(settings.preview_rows(Some(7)), 7);
        assert_eq!(settings.preview_rows(Some(500)), 20);
    }

    #[test]
    fn test_cleaned_path() {
        let mut settings = AppSettings::default();
        let input = Path::new("uploads/sales.csv");
        assert_eq!(
            settings.cleaned_path(input),
            PathBuf::from("uploads/cleaned_sales.csv")
        );

        settings.output_dir = Some(PathBuf::from("out"));
        assert_eq!(
            settings.cleaned_path(input),
            PathBuf::from("out/cleaned_sales.csv")
        );
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config("roundtrip.json");
        let settings = AppSettings {
            preview_row_limit: 10,
            max_preview_rows: 15,
            output_dir: Some(PathBuf::from("/tmp/out")),
        };
        save_app_config_to(&settings, &path).unwrap();
        assert_eq!(load_app_config_from(&path), settings);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let path = temp_config("partial.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "preview_row_limit": 8 }"#).unwrap();
        let loaded = load_app_config_from(&path);
        assert_eq!(loaded.preview_row_limit, 8);
        assert_eq!(loaded.max_preview_rows, 20);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_or_missing_file_gives_defaults() {
        assert_eq!(
            load_app_config_from(Path::new("/nonexistent/tidyframe.json")),
            AppSettings::default()
        );

        let path = temp_config("broken.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(load_app_config_from(&path), AppSettings::default());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_zero_row_cap_rejected() {
        let settings = AppSettings {
            max_preview_rows: 0,
            ..AppSettings::default()
        };
        let err = save_app_config_to(&settings, &temp_config("zero.json")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
