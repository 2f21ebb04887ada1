//! Profile configuration for plugctl.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `plugctl_core::PlugConfig`. The CLI layers its
//! flag overrides on top of what this crate resolves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use plugctl_core::{Credentials, DeviceAddress, Generation, PlugConfig};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "plugctl";

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "PLUGCTL_CONFIG";

/// Prefix for per-key overrides, nested keys split on `__`
/// (`PLUGCTL_CONFIG_DEFAULTS__TIMEOUT=5`).
pub const CONFIG_ENV_PREFIX: &str = "PLUGCTL_CONFIG_";

pub const PASSWORD_ENV: &str = "PLUGCTL_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl From<keyring::Error> for ConfigError {
    fn from(err: keyring::Error) -> Self {
        Self::Keyring(err.to_string())
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named plug profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

/// Values applied to every profile that does not set its own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub generation: Generation,

    /// Request timeout in seconds. Unset keeps the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// A named plug.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Host, `host:port`, or `http://[user:pass@]host[:port]`.
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<Generation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Plaintext password. Prefer the keyring or `password_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_env: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Labels attached to metrics output.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.available_profiles(),
            })
    }

    /// Comma-separated profile names, or `(none)`.
    pub fn available_profiles(&self) -> String {
        if self.profiles.is_empty() {
            "(none)".into()
        } else {
            self.profiles
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// The explicitly requested profile, else `default_profile`, else `default`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `$PLUGCTL_CONFIG`, else the platform
/// config directory.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    ProjectDirs::from("com", "plugctl", "plugctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("plugctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(CONFIG_ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )?)
}

/// Resolve a profile password without CLI flags.
///
/// Order: the profile's `password_env` variable, `PLUGCTL_PASSWORD`, the
/// system keyring, then the plaintext `password` field.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's password_env -> env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. Global env var
    if let Ok(val) = std::env::var(PASSWORD_ENV) {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 4. Plaintext in config
    profile.password.clone().map(SecretString::from)
}

/// Username plus resolved password, when the profile names a user and a
/// non-empty password can be found.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Option<Credentials> {
    let username = profile.username.as_deref()?;
    let password = resolve_password(profile, profile_name)?;
    Credentials::new(username, password)
}

/// Store a profile password in the system keyring.
pub fn store_password(profile_name: &str, password: &SecretString) -> Result<(), ConfigError> {
    if password.expose_secret().is_empty() {
        return Err(ConfigError::Validation {
            field: "password".into(),
            reason: "value cannot be empty".into(),
        });
    }
    keyring_entry(profile_name)?.set_password(password.expose_secret())?;
    Ok(())
}

// ── Translation to core ─────────────────────────────────────────────

/// Build a `PlugConfig` from a profile, falling back to `defaults`.
///
/// Credentials resolved for the profile replace any embedded in the
/// address URL; without them the URL's own credentials are kept.
pub fn profile_to_plug_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<PlugConfig, ConfigError> {
    let mut address =
        DeviceAddress::parse(&profile.address).map_err(|e| ConfigError::Validation {
            field: "address".into(),
            reason: e.to_string(),
        })?;

    if let Some(creds) = resolve_credentials(profile, profile_name) {
        address = address.with_credentials(Some(creds));
    }

    let generation = profile.generation.unwrap_or(defaults.generation);

    let mut config = PlugConfig {
        address,
        generation,
        transport: plugctl_core::TransportConfig::default(),
    };
    if let Some(secs) = profile.timeout.or(defaults.timeout) {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}
