//! Runtime configuration: provider endpoints, timeouts, search geometry.
//!
//! Every field has a default, so an empty or partial TOML file is valid.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sent with every outbound request (Nominatim requires one).
    pub user_agent: String,
    pub server: ServerConfig,
    pub places: PlacesConfig,
    pub translation: TranslationConfig,
    pub classifier: ClassifierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: "medbridge/0.1 (hospital-finder)".into(),
            server: ServerConfig::default(),
            places: PlacesConfig::default(),
            translation: TranslationConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed browser origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            cors_origins: vec![
                "http://localhost:3000".into(),
                "http://127.0.0.1:3000".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Nominatim search endpoint.
    pub url: String,
    /// Free-text query sent with the bounding box.
    pub query: String,
    /// Maximum records requested per search.
    pub limit: u32,
    /// Half the side of the search box, in degrees.
    pub box_half_width_deg: f64,
    /// Results farther than this are dropped.
    pub radius_km: f64,
    pub timeout_secs: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            url: "https://nominatim.openstreetmap.org/search".into(),
            query: "hospital".into(),
            limit: 30,
            box_half_width_deg: 0.4,
            radius_km: 20.0,
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub libretranslate_url: String,
    pub google_url: String,
    pub timeout_secs: u64,
    /// Extra phrases merged over the built-in dictionary.
    pub phrases_path: Option<PathBuf>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            libretranslate_url: "https://libretranslate.de/translate".into(),
            google_url: "https://translate.googleapis.com/translate_a/single".into(),
            timeout_secs: 10,
            phrases_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// JSON disease-profile artifact. Without one, /predict reports unavailable.
    pub artifact_path: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `explicit` if given, else the first of `./medbridge.toml`
    /// and `~/.medbridge/config.toml` that exists, else defaults.
    ///
    /// Returns the path actually used alongside the config.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        for candidate in Self::search_paths() {
            if candidate.is_file() {
                let cfg = Self::from_file(&candidate)?;
                return Ok((cfg, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("medbridge.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".medbridge").join("config.toml"));
        }
        paths
    }
}
