//! Credential resolution: a login file on disk, falling back to the
//! `LOGIN_INFO_*` environment variables when the file is absent.

use crate::error::{ConfigError, CoreError};
use crate::types::Credentials;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ENV_CLIENT_ID: &str = "LOGIN_INFO_CLIENT_ID";
pub const ENV_SECRET: &str = "LOGIN_INFO_SECRET";
pub const ENV_USERNAME: &str = "LOGIN_INFO_USERNAME";
pub const ENV_PASSWORD: &str = "LOGIN_INFO_PASSWORD";

/// Where a set of credentials came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCredentials {
    FromFile {
        path: PathBuf,
        credentials: Credentials,
    },
    FromEnvironment(Credentials),
}

impl ResolvedCredentials {
    pub fn credentials(&self) -> &Credentials {
        match self {
            ResolvedCredentials::FromFile { credentials, .. } => credentials,
            ResolvedCredentials::FromEnvironment(credentials) => credentials,
        }
    }

    pub fn into_credentials(self) -> Credentials {
        match self {
            ResolvedCredentials::FromFile { credentials, .. } => credentials,
            ResolvedCredentials::FromEnvironment(credentials) => credentials,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CredentialResolver {
    login_file: PathBuf,
}

impl CredentialResolver {
    pub fn new(login_file: impl Into<PathBuf>) -> Self {
        Self {
            login_file: login_file.into(),
        }
    }

    pub fn login_file(&self) -> &Path {
        &self.login_file
    }

    /// Resolves against the process environment.
    pub fn resolve(&self) -> Result<ResolvedCredentials, CoreError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves using `lookup` in place of the process environment.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<ResolvedCredentials, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.login_file.is_file() {
            let credentials = read_login_file(&self.login_file)?;
            info!("Loaded credentials from {}", self.login_file.display());
            return Ok(ResolvedCredentials::FromFile {
                path: self.login_file.clone(),
                credentials,
            });
        }

        debug!(
            "Login file {} not found, falling back to environment",
            self.login_file.display()
        );
        let credentials = credentials_from_env(lookup)?;
        info!("Loaded credentials from environment");
        Ok(ResolvedCredentials::FromEnvironment(credentials))
    }
}

fn read_login_file(path: &Path) -> Result<Credentials, CoreError> {
    // Bytes, so a non-UTF-8 file is a format problem rather than an IO one.
    let raw = std::fs::read(path)?;
    serde_json::from_slice(&raw).map_err(|e| {
        CoreError::Config(ConfigError::InvalidFormat {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    })
}

fn credentials_from_env<F>(lookup: F) -> Result<Credentials, CoreError>
where
    F: Fn(&str) -> Option<String>,
{
    let require = |var_name: &str| {
        lookup(var_name).ok_or_else(|| {
            CoreError::Config(ConfigError::MissingEnvironmentVariable {
                var_name: var_name.to_string(),
            })
        })
    };

    Ok(Credentials {
        client_id: require(ENV_CLIENT_ID)?,
        secret: require(ENV_SECRET)?,
        username: require(ENV_USERNAME)?,
        password: require(ENV_PASSWORD)?,
    })
}
