use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_API_KEY_ENV, DEFAULT_DATA_DIR, DEFAULT_MAX_TOKENS,
    DEFAULT_RESPONDER_MODEL, DEFAULT_RESPONDER_URL, DEFAULT_TEMPERATURE, ENV_PREFIX,
    HTTP_REQUEST_TIMEOUT_SECS, LOCAL_CONFIG_PATH,
};
use crate::jurisdictions::{Jurisdiction, JurisdictionRegistry};
use crate::utils::JuristError;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the constitution text files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Language-model responder configuration
    #[serde(default)]
    pub responder: ResponderSettings,

    /// Supported jurisdictions, in selector order. The first one is the default.
    #[serde(default = "default_jurisdictions")]
    pub jurisdictions: Vec<Jurisdiction>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            responder: ResponderSettings::default(),
            jurisdictions: default_jurisdictions(),
        }
    }
}

impl Config {
    /// Build the jurisdiction registry, refusing to start without one
    pub fn registry(&self) -> Result<JurisdictionRegistry, JuristError> {
        JurisdictionRegistry::new(self.jurisdictions.clone())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_jurisdictions() -> Vec<Jurisdiction> {
    vec![
        Jurisdiction::new("JP", "Japan", "japan_constitution.txt"),
        Jurisdiction::new("MC", "Monaco", "monaco_constitution.txt"),
    ]
}

/// Settings for the chat-completions responder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderSettings {
    /// Base URL of an OpenAI-compatible endpoint
    pub base_url: String,
    /// Model name sent with every request
    pub model: String,
    /// Environment variable containing the API key
    pub api_key_env: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// HTTP client timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ResponderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RESPONDER_URL.to_string(),
            model: DEFAULT_RESPONDER_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Load configuration from multiple sources
///
/// Later sources win: defaults, global config, project config, `explicit`, then
/// `JURIST_` environment variables (`__` separates nested keys).
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let global_config = get_config_dir().ok().map(|dir| dir.join("config.toml"));
    let local_config = PathBuf::from(LOCAL_CONFIG_PATH);

    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file {} does not exist", path.display());
        }
    }

    build_figment(global_config.as_deref(), &local_config, explicit)
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Failed to load configuration")
}

/// File layers only, so tests can exercise merging without touching the environment
fn build_figment(global: Option<&Path>, local: &Path, explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    // Add global config if it exists
    if let Some(global) = global.filter(|p| p.exists()) {
        figment = figment.merge(Toml::file(global));
    }

    // Add project config if it exists
    if local.exists() {
        figment = figment.merge(Toml::file(local));
    }

    if let Some(explicit) = explicit {
        figment = figment.merge(Toml::file(explicit));
    }

    figment
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", CONFIG_DIR_NAME) {
        Ok(proj_dirs.config_dir().to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file and the data directory if they don't exist
pub fn init_config() -> Result<()> {
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    } else {
        println!("Configuration already exists at: {}", config_file.display());
    }

    let config = load_config(None)?;
    if !config.data_dir.exists() {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("Failed to create data directory {}", config.data_dir.display())
        })?;
        println!("Created data directory at: {}", config.data_dir.display());
    }
    for jurisdiction in &config.jurisdictions {
        println!(
            "  Place the constitution of {} at {}",
            jurisdiction.name,
            config.data_dir.join(&jurisdiction.document).display()
        );
    }

    Ok(())
}
