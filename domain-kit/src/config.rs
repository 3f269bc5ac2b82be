//! Configuration file parsing and management.
//!
//! Settings are layered, each layer overriding the one before it:
//!
//! 1. Built-in defaults (`KitConfig::default()`)
//! 2. `$XDG_CONFIG_HOME/domain-kit/config.toml`
//! 3. `~/.domain-kit.toml`
//! 4. `./domain-kit.toml` or `./.domain-kit.toml`
//! 5. `DK_*` environment variables
//!
//! ```toml
//! [endpoints]
//! tld_list_url = "https://data.iana.org/TLD/tlds-alpha-by-domain.txt"
//! rank_url_template = "http://onemillion.hightower.space/onemillion/{domain}"
//!
//! [whois]
//! command = "whois"
//!
//! [tls]
//! port = 443
//! ```

use crate::error::DomainError;
use crate::types::{KitConfig, DOMAIN_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration loaded from TOML files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Remote endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<EndpointsConfig>,

    /// WHOIS program settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whois: Option<WhoisConfig>,

    /// Certificate lookup settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EndpointsConfig {
    /// Source of the IANA TLD list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tld_list_url: Option<String>,

    /// Ranking service URL containing `{domain}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_url_template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WhoisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TlsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl FileConfig {
    /// Overlay the values present in this file onto `base`.
    pub fn apply_to(&self, mut base: KitConfig) -> KitConfig {
        if let Some(endpoints) = &self.endpoints {
            if let Some(url) = &endpoints.tld_list_url {
                base.tld_list_url = url.clone();
            }
            if let Some(template) = &endpoints.rank_url_template {
                base.rank_url_template = template.clone();
            }
        }
        if let Some(command) = self.whois.as_ref().and_then(|w| w.command.as_ref()) {
            base.whois_command = command.clone();
        }
        if let Some(port) = self.tls.as_ref().and_then(|t| t.port) {
            base.tls_port = port;
        }
        base
    }
}

/// Configuration discovery and loading.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Directory searched for the local config file
    local_dir: PathBuf,
    /// Home directory, if known
    home_dir: Option<PathBuf>,
    /// XDG config directory, if known
    xdg_dir: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a manager that searches the current directory, `$HOME` and
    /// `$XDG_CONFIG_HOME` (falling back to `~/.config`).
    pub fn new() -> Self {
        let home_dir = env::var_os("HOME").map(PathBuf::from);
        let xdg_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| home_dir.as_ref().map(|home| home.join(".config")));

        Self {
            local_dir: PathBuf::from("."),
            home_dir,
            xdg_dir,
        }
    }

    /// Create a manager that searches explicit directories.
    pub fn with_dirs<P: Into<PathBuf>>(local_dir: P, home_dir: Option<PathBuf>, xdg_dir: Option<PathBuf>) -> Self {
        Self {
            local_dir: local_dir.into(),
            home_dir,
            xdg_dir,
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// `DomainError::File` if the file cannot be read, `DomainError::Config`
    /// if it is not valid TOML or fails validation.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, DomainError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DomainError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content)
            .map_err(|e| DomainError::config(format!("Failed to parse TOML configuration: {}", e)))?;

        validate_file_config(&config)?;

        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Discover and merge every configuration file, lowest precedence first.
    ///
    /// Missing files are skipped; a file that exists but is broken is an error.
    pub fn discover_and_load(&self) -> Result<FileConfig, DomainError> {
        let mut merged = FileConfig::default();

        for path in self.candidate_paths() {
            let config = self.load_file(&path)?;
            merged = merge_configs(merged, config);
        }

        Ok(merged)
    }

    /// Existing config files in precedence order (lowest first).
    pub fn candidate_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(xdg) = &self.xdg_dir {
            let path = xdg.join("domain-kit").join("config.toml");
            if path.exists() {
                paths.push(path);
            }
        }

        if let Some(home) = &self.home_dir {
            let path = home.join(".domain-kit.toml");
            if path.exists() {
                paths.push(path);
            }
        }

        let local = ["domain-kit.toml", ".domain-kit.toml"]
            .iter()
            .map(|name| self.local_dir.join(name))
            .find(|path| path.exists());
        if let Some(path) = local {
            paths.push(path);
        }

        paths
    }

    /// Resolve the effective configuration: defaults, files, then environment.
    pub fn load(&self) -> Result<KitConfig, DomainError> {
        let files = self.discover_and_load()?;
        let config = load_env_config().apply_to(files.apply_to(KitConfig::default()));
        validate_kit_config(&config)?;
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge two configurations; values from `higher` win field by field.
pub fn merge_configs(lower: FileConfig, higher: FileConfig) -> FileConfig {
    FileConfig {
        endpoints: match (lower.endpoints, higher.endpoints) {
            (Some(mut lower_ep), Some(higher_ep)) => {
                if higher_ep.tld_list_url.is_some() {
                    lower_ep.tld_list_url = higher_ep.tld_list_url;
                }
                if higher_ep.rank_url_template.is_some() {
                    lower_ep.rank_url_template = higher_ep.rank_url_template;
                }
                Some(lower_ep)
            }
            (lower_ep, higher_ep) => higher_ep.or(lower_ep),
        },
        whois: match (lower.whois, higher.whois) {
            (Some(lower_w), Some(higher_w)) => Some(WhoisConfig {
                command: higher_w.command.or(lower_w.command),
            }),
            (lower_w, higher_w) => higher_w.or(lower_w),
        },
        tls: match (lower.tls, higher.tls) {
            (Some(lower_t), Some(higher_t)) => Some(TlsConfig {
                port: higher_t.port.or(lower_t.port),
            }),
            (lower_t, higher_t) => higher_t.or(lower_t),
        },
    }
}

fn validate_url(field: &str, url: &str) -> Result<(), DomainError> {
    if url.trim().is_empty() {
        return Err(DomainError::config(format!("'{}' cannot be empty", field)));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(DomainError::config(format!(
            "'{}' must be an http:// or https:// URL, got '{}'",
            field, url
        )));
    }
    Ok(())
}

fn validate_rank_template(template: &str) -> Result<(), DomainError> {
    validate_url("rank_url_template", template)?;
    if !template.contains(DOMAIN_PLACEHOLDER) {
        return Err(DomainError::config(format!(
            "'rank_url_template' must contain {}",
            DOMAIN_PLACEHOLDER
        )));
    }
    Ok(())
}

fn validate_file_config(config: &FileConfig) -> Result<(), DomainError> {
    if let Some(endpoints) = &config.endpoints {
        if let Some(url) = &endpoints.tld_list_url {
            validate_url("tld_list_url", url)?;
        }
        if let Some(template) = &endpoints.rank_url_template {
            validate_rank_template(template)?;
        }
    }

    if let Some(command) = config.whois.as_ref().and_then(|w| w.command.as_ref()) {
        if command.trim().is_empty() {
            return Err(DomainError::config("WHOIS command cannot be empty"));
        }
    }

    if config.tls.as_ref().and_then(|t| t.port) == Some(0) {
        return Err(DomainError::config("TLS port must be between 1 and 65535"));
    }

    Ok(())
}

/// Validate a fully resolved configuration.
pub fn validate_kit_config(config: &KitConfig) -> Result<(), DomainError> {
    validate_url("tld_list_url", &config.tld_list_url)?;
    validate_rank_template(&config.rank_url_template)?;
    if config.whois_command.trim().is_empty() {
        return Err(DomainError::config("WHOIS command cannot be empty"));
    }
    if config.tls_port == 0 {
        return Err(DomainError::config("TLS port must be between 1 and 65535"));
    }
    Ok(())
}

/// Settings taken from `DK_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub tld_list_url: Option<String>,
    pub rank_url_template: Option<String>,
    pub whois_command: Option<String>,
    pub tls_port: Option<u16>,
}

impl EnvConfig {
    /// Overlay the variables that were set onto `base`.
    pub fn apply_to(&self, mut base: KitConfig) -> KitConfig {
        if let Some(url) = &self.tld_list_url {
            base.tld_list_url = url.clone();
        }
        if let Some(template) = &self.rank_url_template {
            base.rank_url_template = template.clone();
        }
        if let Some(command) = &self.whois_command {
            base.whois_command = command.clone();
        }
        if let Some(port) = self.tls_port {
            base.tls_port = port;
        }
        base
    }
}

/// Load configuration from the process environment.
///
/// Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    load_env_config_from(|key| env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup.
pub fn load_env_config_from<F>(lookup: F) -> EnvConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_config = EnvConfig::default();

    // DK_TLD_LIST_URL - IANA list location
    if let Some(url) = lookup("DK_TLD_LIST_URL") {
        match validate_url("DK_TLD_LIST_URL", &url) {
            Ok(()) => {
                debug!(value = %url, "using DK_TLD_LIST_URL");
                env_config.tld_list_url = Some(url);
            }
            Err(e) => warn!(error = %e, "ignoring invalid DK_TLD_LIST_URL"),
        }
    }

    // DK_RANK_URL_TEMPLATE - ranking service
    if let Some(template) = lookup("DK_RANK_URL_TEMPLATE") {
        match validate_rank_template(&template) {
            Ok(()) => {
                debug!(value = %template, "using DK_RANK_URL_TEMPLATE");
                env_config.rank_url_template = Some(template);
            }
            Err(e) => warn!(error = %e, "ignoring invalid DK_RANK_URL_TEMPLATE"),
        }
    }

    // DK_WHOIS_COMMAND - whois program
    if let Some(command) = lookup("DK_WHOIS_COMMAND") {
        if command.trim().is_empty() {
            warn!("ignoring empty DK_WHOIS_COMMAND");
        } else {
            debug!(value = %command, "using DK_WHOIS_COMMAND");
            env_config.whois_command = Some(command.trim().to_string());
        }
    }

    // DK_TLS_PORT - certificate port
    if let Some(val) = lookup("DK_TLS_PORT") {
        match val.trim().parse::<u16>() {
            Ok(port) if port > 0 => {
                debug!(port, "using DK_TLS_PORT");
                env_config.tls_port = Some(port);
            }
            _ => warn!(value = %val, "ignoring invalid DK_TLS_PORT, must be 1-65535"),
        }
    }

    env_config
}
