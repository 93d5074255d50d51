//! Configuration for the `AuthZ` policy module.

use std::path::Path;

use anyhow::Context;
use authn_state::AuthenticationSchemes;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `AUTHZ_POLICY__HANDLER_MODE=enforce`
/// or `AUTHZ_POLICY__SCHEMES__USER=OIDC`.
pub const ENV_PREFIX: &str = "AUTHZ_POLICY__";

/// Configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthzPolicyConfig {
    /// Labels of the two supported authentication schemes.
    pub schemes: AuthenticationSchemes,

    /// How requirement handlers decide.
    pub handler_mode: HandlerMode,
}

/// Requirement handler mode.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HandlerMode {
    /// Well-formed requirements never block; malformed ones fail.
    #[default]
    Passthrough,
    /// Requirements are matched against the grants on the authentication state.
    Enforce,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("authentication scheme labels must not be blank")]
    BlankScheme,

    #[error("user and client schemes must differ, both are '{0}'")]
    DuplicateScheme(String),
}

impl AuthzPolicyConfig {
    /// Load defaults, then the optional YAML file, then `AUTHZ_POLICY__*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        Self::from_figment(&figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract and validate configuration from an assembled figment.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> anyhow::Result<Self> {
        let cfg: Self = figment
            .extract()
            .context("failed to extract authz policy configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// [`ConfigError`] if a scheme label is blank or both labels are equal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [user, client] = self.schemes.names();
        if user.trim().is_empty() || client.trim().is_empty() {
            return Err(ConfigError::BlankScheme);
        }
        if user == client {
            return Err(ConfigError::DuplicateScheme(user.to_owned()));
        }
        Ok(())
    }
}
