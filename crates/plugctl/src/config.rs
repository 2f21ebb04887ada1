//! CLI configuration: thin wrapper around `plugctl_config`.
//!
//! Adds the resolution step that layers `GlobalOpts` flag overrides
//! (--address, --generation, --username, ...) over the active profile.

use std::collections::BTreeMap;
use std::time::Duration;

use secrecy::SecretString;

use plugctl_config::{Config, Profile, config_path, profile_to_plug_config, resolve_password};
use plugctl_core::{Credentials, Generation, PlugConfig};

use crate::cli::{GenerationArg, GlobalOpts};
use crate::error::CliError;

impl From<GenerationArg> for Generation {
    fn from(arg: GenerationArg) -> Self {
        match arg {
            GenerationArg::Gen1 => Generation::Gen1,
            GenerationArg::Gen2 => Generation::Gen2,
        }
    }
}

/// A plug configuration plus the profile's metrics labels.
#[derive(Debug)]
pub struct ResolvedPlug {
    pub config: PlugConfig,
    pub labels: BTreeMap<String, String>,
}

/// Resolve the target plug from the config file, profile, and CLI overrides.
///
/// Fails before any network activity when no address can be found.
pub fn resolve_plug(global: &GlobalOpts, cfg: &Config) -> Result<ResolvedPlug, CliError> {
    let profile_name = cfg.active_profile_name(global.profile.as_deref());
    let profile = cfg.profiles.get(&profile_name);

    // 1. Address (flag > env > profile)
    let mut config = match (profile, global.address.as_deref()) {
        (Some(p), None) => profile_to_plug_config(p, &profile_name, &cfg.defaults)?,
        (Some(p), Some(address)) => {
            let overridden = Profile {
                address: address.to_owned(),
                ..p.clone()
            };
            profile_to_plug_config(&overridden, &profile_name, &cfg.defaults)?
        }
        (None, Some(address)) => {
            let adhoc = Profile {
                address: address.to_owned(),
                ..Profile::default()
            };
            profile_to_plug_config(&adhoc, &profile_name, &cfg.defaults)?
        }
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: cfg.available_profiles(),
            });
        }
        (None, None) => {
            return Err(CliError::NoAddress {
                path: config_path().display().to_string(),
            });
        }
    };

    // 2. Credentials: flags replace whatever the profile resolved
    if global.username.is_some() || global.password.is_some() {
        let username = global
            .username
            .clone()
            .or_else(|| profile.and_then(|p| p.username.clone()));
        let password = global
            .password
            .clone()
            .map(SecretString::from)
            .or_else(|| profile.and_then(|p| resolve_password(p, &profile_name)));

        if let (Some(username), Some(password)) = (username, password) {
            if let Some(creds) = Credentials::new(username, password) {
                config.address = config.address.with_credentials(Some(creds));
            }
        }
    }

    // 3. Generation and timeout
    if let Some(generation) = global.generation {
        config.generation = generation.into();
    }
    if let Some(secs) = global.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    tracing::debug!(
        profile = %profile_name,
        address = %config.address,
        generation = %config.generation,
        "resolved plug"
    );

    Ok(ResolvedPlug {
        config,
        labels: profile.map(|p| p.labels.clone()).unwrap_or_default(),
    })
}
