use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default taskboard data directory: ~/.taskboard
pub fn get_taskboard_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".taskboard"))
}

/// Load and post-process a config file at an explicit path.
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<AppConfig>(&s)?;
    finish(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskboard/config.toml (highest)
    let data_dir = get_taskboard_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let cfg: AppConfig = if user_config.exists() {
        let s = std::fs::read_to_string(&user_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    finish(cfg)
}

fn finish(mut cfg: AppConfig) -> anyhow::Result<AppConfig> {
    // Default the log directory into the taskboard data directory.
    if cfg
        .logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .is_none()
    {
        if let Ok(data_dir) = get_taskboard_data_dir() {
            let logs_dir = data_dir.join("logs");
            cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
        }
    }

    // Environment variable overrides (Priority 0: highest)
    if let Ok(v) = std::env::var("TASKBOARD_BASE_URL") {
        if !v.trim().is_empty() {
            cfg.api.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("TASKBOARD_API_KEY") {
        if !v.trim().is_empty() {
            cfg.api.api_key = v;
        }
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"https://api.example.org\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.api.base_url, "https://api.example.org");
        assert_eq!(cfg.api.page_size, 10);
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.logging.file);
        assert_eq!(cfg.tui.update_interval_ms, 100);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:3000");
        assert!(cfg.api.api_key.is_empty());
        assert_eq!(cfg.api.timeout_ms, 10_000);
    }

    #[test]
    fn unknown_path_is_an_error() {
        assert!(load_from_path(Path::new("/nonexistent/config.toml")).is_err());
    }
}
