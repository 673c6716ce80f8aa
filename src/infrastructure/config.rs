use crate::domain::config::{ClientConfig, SessionConfig};
use crate::domain::error::{BatfishError, BatfishResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables that override file settings
pub const ENV_HOST: &str = "BATFISH_HOST";
pub const ENV_PORT: &str = "BATFISH_PORT";
pub const ENV_API_KEY: &str = "BATFISH_API_KEY";
pub const ENV_SSL: &str = "BATFISH_SSL";

/// Configuration manager
///
/// Layers, lowest first: built-in defaults, the global file, the nearest
/// project file, then environment overrides.
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> BatfishResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Load configuration from files and the environment
    pub fn load_config(&self) -> BatfishResult<ClientConfig> {
        let mut config = ClientConfig::default();

        if self.global_config_path.exists() {
            config = self.load_config_from_path(&self.global_config_path)?;
        }

        // Project settings replace the global session section wholesale
        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                let project_config = self.load_config_from_path(project_path)?;
                config.session = project_config.session;
            }
        }

        let env: HashMap<String, String> = std::env::vars().collect();
        apply_env_overrides(&mut config.session, &env)?;

        Ok(config)
    }

    /// Get global configuration path
    fn get_global_config_path() -> BatfishResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            BatfishError::Configuration("Could not determine home directory".to_string())
        })?;

        Ok(home.join(".config").join("batfish").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".batfish").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> BatfishResult<ClientConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            BatfishError::Configuration(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());

        toml::from_str(&content).map_err(|e| {
            BatfishError::Configuration(format!("Failed to parse config file {}: {}", path.display(), e))
        })
    }

    /// Save configuration to specific path, creating parent directories
    pub fn save_config_to_path(&self, path: &Path, config: &ClientConfig) -> BatfishResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BatfishError::Configuration(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| {
            BatfishError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            BatfishError::Configuration(format!("Failed to write config file {}: {}", path.display(), e))
        })
    }

    /// Create a default project configuration under `path/.batfish`
    pub fn init_project_config(&self, path: &Path) -> BatfishResult<PathBuf> {
        let config_file = path.join(".batfish").join("config.toml");

        if config_file.exists() {
            return Err(BatfishError::Configuration(
                "Project configuration already exists".to_string(),
            ));
        }

        self.save_config_to_path(&config_file, &ClientConfig::default())?;
        Ok(config_file)
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}

/// Apply `BATFISH_*` overrides from an environment snapshot
pub fn apply_env_overrides(
    session: &mut SessionConfig,
    env: &HashMap<String, String>,
) -> BatfishResult<()> {
    if let Some(host) = env.get(ENV_HOST) {
        session.host = host.clone();
    }
    if let Some(port) = env.get(ENV_PORT) {
        session.port = port.parse().map_err(|_| {
            BatfishError::Configuration(format!("{} must be a port number, got '{}'", ENV_PORT, port))
        })?;
    }
    if let Some(api_key) = env.get(ENV_API_KEY) {
        session.api_key = api_key.clone();
    }
    if let Some(ssl) = env.get(ENV_SSL) {
        session.ssl = match ssl.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(BatfishError::Configuration(format!(
                    "{} must be true or false, got '{}'",
                    ENV_SSL, ssl
                )))
            }
        };
    }
    Ok(())
}
