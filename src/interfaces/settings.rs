use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::{envvars, keys};
use crate::helpers::base_path;
use crate::interfaces::settings_store::{SettingsStoreError, StoreRO};

const SETTINGS_DB: &str = "settings.db";

pub fn store_path() -> PathBuf {
    base_path::DATA_DIR.join(SETTINGS_DB)
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(
        "no hub configured; pass --hub, set {} or run 'settings-set {} <url>'",
        envvars::HUB_URL,
        keys::HUB_URL
    )]
    MissingHubUrl,
    #[error(transparent)]
    Store(#[from] SettingsStoreError),
}

/// Everything the service client needs to reach a hub.
#[derive(Clone, Debug, PartialEq)]
pub struct HubSettings {
    pub hub_url: String,
    pub auth_token: Option<String>,
}

impl HubSettings {
    pub fn new(hub_url: impl Into<String>) -> Self {
        Self {
            hub_url: hub_url.into(),
            auth_token: None,
        }
    }

    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Resolves settings from, in order: the explicit override, environment
    /// variables, then the settings store at `store_path`.
    pub fn resolve(hub_override: Option<&str>, store_path: &Path) -> Result<Self, SettingsError> {
        let store = StoreRO::open(store_path)?;
        let lookup = |envvar: &str, key: &str| -> Result<Option<String>, SettingsError> {
            if let Ok(value) = env::var(envvar) {
                return Ok(Some(value));
            }
            match &store {
                Some(store) => Ok(store.get::<String>(key)?),
                None => Ok(None),
            }
        };

        let hub_url = match hub_override {
            Some(hub) => hub.to_string(),
            None => lookup(envvars::HUB_URL, keys::HUB_URL)?.ok_or(SettingsError::MissingHubUrl)?,
        };
        let auth_token = lookup(envvars::AUTH_TOKEN, keys::AUTH_TOKEN)?;
        log::debug!("Using hub {hub_url}");

        Ok(match auth_token {
            Some(token) => Self::new(hub_url).with_auth_token(token),
            None => Self::new(hub_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::settings_store::StoreRW;

    #[test]
    fn env_takes_precedence_over_store() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join(SETTINGS_DB);
        let store = StoreRW::open(&path).unwrap();
        store.set(keys::HUB_URL, "https://stored.example.net").unwrap();
        store.set(keys::AUTH_TOKEN, "stored-token").unwrap();

        temp_env::with_vars(
            [
                (envvars::HUB_URL, Some("https://env.example.net")),
                (envvars::AUTH_TOKEN, None),
            ],
            || {
                let settings = HubSettings::resolve(None, &path).unwrap();
                assert_eq!(settings.hub_url, "https://env.example.net");
                assert_eq!(settings.auth_token.as_deref(), Some("stored-token"));
            },
        );
    }

    #[test]
    fn override_wins_and_missing_hub_fails() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join(SETTINGS_DB);

        temp_env::with_vars(
            [
                (envvars::HUB_URL, None::<&str>),
                (envvars::AUTH_TOKEN, None),
            ],
            || {
                assert!(matches!(
                    HubSettings::resolve(None, &path),
                    Err(SettingsError::MissingHubUrl)
                ));
                let settings = HubSettings::resolve(Some("https://cli.example.net"), &path).unwrap();
                assert_eq!(settings, HubSettings::new("https://cli.example.net"));
            },
        );
    }
}
