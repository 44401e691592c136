//! Configuration loading and path resolution.
//!
//! Supports BLOQUEO_HOME and BLOQUEO_HOSTS_FILE env vars (used by tests).

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Polling period of the watch loop when nothing else is configured.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Paths for bloqueo's own files.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl AppPaths {
    /// Build paths from base directory (e.g. ProjectDirs config dir or BLOQUEO_HOME).
    pub fn from_base(base: PathBuf) -> Self {
        let config_file = base.join("config.toml");
        Self {
            config_dir: base,
            config_file,
        }
    }

    /// Paths for testing: use a temp dir as base.
    pub fn for_test(base: impl AsRef<Path>) -> Self {
        Self::from_base(base.as_ref().to_path_buf())
    }

    /// Get default paths (respects BLOQUEO_HOME).
    pub fn default_paths() -> Self {
        let base = if let Ok(home) = std::env::var("BLOQUEO_HOME") {
            PathBuf::from(home)
        } else if let Some(dirs) = directories::ProjectDirs::from("com", "bloqueo", "bloqueo") {
            dirs.config_dir().to_path_buf()
        } else {
            PathBuf::from(".bloqueo")
        };
        Self::from_base(base)
    }
}

/// Optional config.toml structure.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Hosts file to edit instead of the platform one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
    /// Default watch interval in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervalo: Option<u64>,
}

impl Config {
    /// Load config from paths (with shared lock when file exists).
    pub fn load(paths: &AppPaths) -> Result<Config> {
        if !paths.config_file.is_file() {
            return Ok(Config::default());
        }
        let mut file = fs::OpenOptions::new()
            .read(true)
            .open(&paths.config_file)
            .with_context(|| format!("open {}", paths.config_file.display()))?;
        fs2::FileExt::lock_shared(&file)?;
        use std::io::Read;
        let mut s = String::new();
        file.read_to_string(&mut s)?;
        let cfg: Config = toml::from_str(&s)
            .with_context(|| format!("parse {}", paths.config_file.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid {}", paths.config_file.display()))?;
        Ok(cfg)
    }

    /// Write config.toml under an exclusive lock. Refuses values `load` would reject.
    pub fn save(&self, paths: &AppPaths) -> Result<()> {
        self.validate()?;
        let body = toml::to_string_pretty(self).context("serialize config")?;
        fs::create_dir_all(&paths.config_dir)
            .with_context(|| format!("create {}", paths.config_dir.display()))?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&paths.config_file)
            .with_context(|| format!("open {} for writing", paths.config_file.display()))?;
        fs2::FileExt::lock_exclusive(&file)?;
        use std::io::Write;
        file.write_all(body.as_bytes())
            .with_context(|| format!("write {}", paths.config_file.display()))?;
        Ok(())
    }

    /// The watch interval must be at least one second.
    fn validate(&self) -> Result<()> {
        if self.intervalo == Some(0) {
            anyhow::bail!("intervalo must be at least 1 second");
        }
        Ok(())
    }

    /// Hosts file to use: BLOQUEO_HOSTS_FILE, then config, then the platform path.
    pub fn hosts_path(&self) -> PathBuf {
        if let Some(path) = std::env::var_os("BLOQUEO_HOSTS_FILE") {
            return PathBuf::from(path);
        }
        self.hosts_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::platform::HOSTS_PATH))
    }

    /// Watch interval: explicit flag, then config, then the default. Never below 1.
    pub fn interval_secs(&self, flag: Option<u64>) -> u64 {
        flag.or(self.intervalo).unwrap_or(DEFAULT_INTERVAL_SECS).max(1)
    }
}
