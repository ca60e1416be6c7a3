use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::utils::errors::TalosError;

pub const MODRINTH_API_URL_PROD: &str = "https://api.modrinth.com/v2";
pub const DEFAULT_GAME_VERSION: &str = "1.16.5";

const API_BASE_URL_ENV: &str = "TALOS_API_BASE_URL";
const GAME_VERSION_ENV: &str = "TALOS_GAME_VERSION";
const LOADER_ENV: &str = "TALOS_LOADER";

/// Target environment every resolved mod must be compatible with.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResolveConfig {
    pub api_base_url: String,
    pub game_version: String,
    pub loader: ModLoader,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModLoader {
    #[serde(rename = "forge")]
    Forge,
    #[default]
    #[serde(rename = "fabric")]
    Fabric,
    #[serde(rename = "quilt")]
    Quilt,
    #[serde(rename = "neoforge")]
    NeoForge,
}

impl ModLoader {
    /// Loader name as it appears in a Modrinth version's `loaders` list.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forge => "forge",
            Self::Fabric => "fabric",
            Self::Quilt => "quilt",
            Self::NeoForge => "neoforge",
        }
    }
}

impl std::fmt::Display for ModLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ModLoader {
    type Err = TalosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forge" => Ok(Self::Forge),
            "fabric" => Ok(Self::Fabric),
            "quilt" => Ok(Self::Quilt),
            "neoforge" => Ok(Self::NeoForge),
            _ => Err(TalosError::InvalidModLoader(s.to_string())),
        }
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            api_base_url: MODRINTH_API_URL_PROD.to_string(),
            game_version: DEFAULT_GAME_VERSION.to_string(),
            loader: ModLoader::default(),
        }
    }
}

impl ResolveConfig {
    pub fn new(api_base_url: String, game_version: String, loader: ModLoader) -> Self {
        Self {
            api_base_url,
            game_version,
            loader,
        }
    }

    /// Defaults overlaid with `TALOS_*` environment variables (a `.env` file is honored).
    pub fn from_env() -> Result<Self> {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }
        if let Some(version) = lookup(GAME_VERSION_ENV).filter(|v| !v.trim().is_empty()) {
            config.game_version = version.trim().to_string();
        }
        if let Some(loader) = lookup(LOADER_ENV).filter(|v| !v.trim().is_empty()) {
            config.loader = loader.parse::<ModLoader>()?;
        }

        Ok(config)
    }

    /// Applies command-line overrides on top of the current values.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        game_version: Option<String>,
        loader: Option<ModLoader>,
    ) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        if let Some(version) = game_version {
            self.game_version = version;
        }
        if let Some(loader) = loader {
            self.loader = loader;
        }
        self
    }
}
