use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "APP__";
const MODULES_ENV_PREFIX: &str = "APP__MODULES__";
const ENV_SEPARATOR: &str = "__";

/// Module keys whose values are masked in printed configuration.
const SECRET_KEYS: &[&str] = &["password", "secret", "token"];
const REDACTED: &str = "********";

/// Process configuration: strongly-typed global sections plus a per-module
/// configuration bag that each module deserializes into its own typed struct.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Base directory for relative paths (log files). Normalized to an absolute path on load.
    #[serde(default)]
    pub home_dir: String,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
    /// Directory containing per-module YAML files (optional).
    #[serde(default)]
    pub modules_dir: Option<String>,
    /// Per-module configuration bag: module_name → arbitrary JSON/YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "logs/dhl24.log", empty disables file output
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/dhl24-export.log".to_string(),
            file_level: "debug".to_string(),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            home_dir: String::new(),
            logging: Some(default_logging_config()),
            modules_dir: None,
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        // Optional sections stay None unless YAML/ENV provides them.
        let base = AppConfig {
            home_dir: String::new(),
            logging: None,
            modules_dir: None,
            modules: HashMap::new(),
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path.as_ref()))
            // Module overrides are applied below with their raw text.
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split(ENV_SEPARATOR)
                    .filter(|key| !key.starts_with("modules.")),
            );

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| "Failed to extract config from figment".to_string())?;

        normalize_home_dir_inplace(&mut config).context("Failed to resolve home_dir")?;

        if let Some(dir) = config.modules_dir.clone() {
            merge_module_files(&mut config.modules, dir)?;
        }

        // Example: APP__MODULES__DHL24__PASSWORD=secret maps to modules.dhl24.password
        apply_module_env_overrides(&mut config.modules);

        Ok(config)
    }

    /// Load configuration from file or fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c = Self::default();
                normalize_home_dir_inplace(&mut c).context("Failed to resolve home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Deserialize the section of module `name` into its typed configuration.
    pub fn module_config<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let raw = self
            .modules
            .get(name)
            .ok_or_else(|| anyhow!("Missing configuration section 'modules.{}'", name))?;
        serde_json::from_value(raw.clone())
            .with_context(|| format!("Invalid configuration section 'modules.{}'", name))
    }

    /// Copy of the configuration with module secrets masked, for printing.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.modules.values_mut().for_each(mask_secrets);
        config
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            default_section.console_level = match args.verbose {
                0 => default_section.console_level.clone(), // keep
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            };
        }
    }
}

/// Command line arguments relevant to configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub verbose: u8,
}

const DEFAULT_SUBDIR: &str = ".dhl24-export";

/// Expand `~`, fall back to `$HOME/.dhl24-export` when empty, and create the directory.
fn normalize_home_dir_inplace(config: &mut AppConfig) -> Result<()> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let raw = config.home_dir.trim();

    let resolved = if raw.is_empty() {
        home.map(|h| h.join(DEFAULT_SUBDIR))
            .ok_or_else(|| anyhow!("HOME is not set and home_dir is empty"))?
    } else if let Some(rest) = raw.strip_prefix("~/") {
        home.map(|h| h.join(rest))
            .ok_or_else(|| anyhow!("HOME is not set, cannot expand '{}'", raw))?
    } else {
        let p = PathBuf::from(raw);
        if p.is_absolute() {
            p
        } else {
            std::env::current_dir()?.join(p)
        }
    };

    std::fs::create_dir_all(&resolved)
        .with_context(|| format!("Failed to create home_dir '{}'", resolved.display()))?;
    config.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}

fn merge_module_files(
    bag: &mut HashMap<String, serde_json::Value>,
    dir: impl AsRef<Path>,
) -> Result<()> {
    use std::fs;
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if ext != "yml" && ext != "yaml" {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        let raw = fs::read_to_string(&path)?;
        let val: serde_yaml::Value = serde_yaml::from_str(&raw)
            .with_context(|| format!("Invalid module file '{}'", path.display()))?;
        bag.insert(name, serde_json::to_value(val)?);
    }
    Ok(())
}

/// Environment values are text. Parsing them here would turn `0012345` into
/// `12345`, so each module's typed config reads them instead.
fn apply_module_env_overrides(bag: &mut HashMap<String, serde_json::Value>) {
    use figment::providers::Env;

    let env = Env::prefixed(MODULES_ENV_PREFIX).split(ENV_SEPARATOR);
    for (key, raw) in env.iter() {
        let mut path = key.as_str().split('.');
        let Some(module) = path.next() else {
            continue;
        };
        let rest: Vec<&str> = path.collect();
        let node = bag
            .entry(module.to_string())
            .or_insert(serde_json::Value::Null);
        set_path(node, &rest, raw);
    }
}

fn set_path(node: &mut serde_json::Value, path: &[&str], raw: String) {
    let Some((head, rest)) = path.split_first() else {
        *node = serde_json::Value::String(raw);
        return;
    };
    if !node.is_object() {
        *node = serde_json::Value::Object(serde_json::Map::new());
    }
    if let serde_json::Value::Object(map) = node {
        let child = map
            .entry(head.to_string())
            .or_insert(serde_json::Value::Null);
        set_path(child, rest, raw);
    }
}

fn mask_secrets(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if SECRET_KEYS.contains(&key.as_str()) && !child.is_null() {
                    *child = serde_json::Value::String(REDACTED.to_string());
                } else {
                    mask_secrets(child);
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(mask_secrets),
        _ => {}
    }
}
