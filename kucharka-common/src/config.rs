//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the data folder
pub const DATA_FOLDER_ENV: &str = "KUCHARKA_DATA_FOLDER";

/// Recipe collection file inside the data folder
pub const RECIPES_FILE_NAME: &str = "recipes.json";

/// Ingredient list file inside the data folder
pub const INGREDIENTS_FILE_NAME: &str = "ingredients.json";

/// Contents of `config.toml`
///
/// Every key is optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    pub data_folder: Option<PathBuf>,
    pub port: Option<u16>,
    /// Base URL the front end talks to
    pub server_url: Option<String>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a specific TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }

    /// Load the platform config file.
    ///
    /// Missing or broken files never stop startup: a broken file is logged and
    /// the defaults are used.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }
}

/// `<config_dir>/kucharka/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("kucharka").join("config.toml"))
}

/// OS-dependent default data folder
pub fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/kucharka
        dirs::data_local_dir()
            .map(|d| d.join("kucharka"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/kucharka"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/kucharka
        dirs::data_dir()
            .map(|d| d.join("kucharka"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/kucharka"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\kucharka
        dirs::data_local_dir()
            .map(|d| d.join("kucharka"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\kucharka"))
    } else {
        PathBuf::from("./kucharka_data")
    }
}

/// Data folder resolution, in priority order:
/// 1. Command-line argument
/// 2. `KUCHARKA_DATA_FOLDER` environment variable
/// 3. `data_folder` key of the TOML config
/// 4. OS-dependent default
#[derive(Debug, Clone, Default)]
pub struct DataFolderResolver {
    cli_arg: Option<PathBuf>,
    toml: TomlConfig,
}

impl DataFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>, toml: TomlConfig) -> Self {
        Self { cli_arg, toml }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml.data_folder {
            return path.clone();
        }

        default_data_folder()
    }
}

/// Locates and prepares the storage files inside a data folder
#[derive(Debug, Clone)]
pub struct DataFolderInitializer {
    data_folder: PathBuf,
}

impl DataFolderInitializer {
    pub fn new(data_folder: PathBuf) -> Self {
        Self { data_folder }
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    pub fn recipes_path(&self) -> PathBuf {
        self.data_folder.join(RECIPES_FILE_NAME)
    }

    pub fn ingredients_path(&self) -> PathBuf {
        self.data_folder.join(INGREDIENTS_FILE_NAME)
    }

    /// Create the data folder if missing (idempotent)
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_folder).map_err(|e| {
            Error::Config(format!(
                "Cannot create data folder {}: {}",
                self.data_folder.display(),
                e
            ))
        })
    }
}
