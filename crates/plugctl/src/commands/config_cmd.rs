//! Config subcommand handlers.

use secrecy::SecretString;

use plugctl_config::{Profile, config_path, load_config, load_config_or_default, save_config};
use plugctl_core::Generation;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

const SETTABLE_KEYS: &str = "address, generation, username, password_env, timeout, label.<key>";

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = load_config_or_default();
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            })?;
            print!("{rendered}");
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config_path().display());
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = load_config_or_default();
            let default = cfg.active_profile_name(None);
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: plugctl config set address <host>");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if *name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = load_config()?;
            cfg.profile(&name)?;
            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = load_config()?;
            let profile_name = cfg.active_profile_name(global.profile.as_deref());
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();

            set_key(profile, &key, value)?;

            let path = save_config(&cfg)?;
            if !global.quiet {
                eprintln!(
                    "✓ Set {key} on profile '{profile_name}' ({})",
                    path.display()
                );
            }
            Ok(())
        }

        // ── SetPassword ─────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = load_config()?;
            let profile_name = profile
                .or_else(|| global.profile.clone())
                .unwrap_or_else(|| cfg.active_profile_name(None));
            cfg.profile(&profile_name)?;

            let secret = SecretString::from(rpassword::prompt_password("Password: ")?);
            plugctl_config::store_password(&profile_name, &secret)?;

            if !global.quiet {
                eprintln!("✓ Password stored in system keyring for profile '{profile_name}'");
            }
            Ok(())
        }
    }
}

fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    if let Some(label) = key.strip_prefix("label.") {
        if label.is_empty() {
            return Err(CliError::Validation {
                field: key.into(),
                reason: "label name cannot be empty".into(),
            });
        }
        profile.labels.insert(label.to_owned(), value);
        return Ok(());
    }

    match key {
        "address" => profile.address = value,
        "generation" => {
            let generation: Generation = value.parse().map_err(|_| CliError::Validation {
                field: "generation".into(),
                reason: format!("'{value}' is not one of gen1, gen2"),
            })?;
            profile.generation = Some(generation);
        }
        "username" => profile.username = Some(value),
        "password_env" | "password-env" => profile.password_env = Some(value),
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {SETTABLE_KEYS}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use plugctl_config::Config;

    use super::*;

    #[test]
    fn set_known_keys() {
        let mut profile = Profile::default();
        set_key(&mut profile, "address", "10.0.0.5".into()).unwrap();
        set_key(&mut profile, "generation", "rpc".into()).unwrap();
        set_key(&mut profile, "timeout", "4".into()).unwrap();
        set_key(&mut profile, "label.location", "office".into()).unwrap();

        assert_eq!(profile.address, "10.0.0.5");
        assert_eq!(profile.generation, Some(Generation::Gen2));
        assert_eq!(profile.timeout, Some(4));
        assert_eq!(profile.labels.get("location").map(String::as_str), Some("office"));
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut profile = Profile::default();
        assert!(matches!(
            set_key(&mut profile, "generation", "gen9".into()),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            set_key(&mut profile, "timeout", "soon".into()),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            set_key(&mut profile, "colour", "blue".into()),
            Err(CliError::Validation { ref field, .. }) if field == "colour"
        ));
        assert!(matches!(
            set_key(&mut profile, "label.", "x".into()),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn empty_config_shows_default_profile_only() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(rendered.contains("default_profile = \"default\""));
    }
}
