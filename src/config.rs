use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::ContractError;

pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";

// seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

static PETSTORE_URL: once_cell::sync::Lazy<String> = once_cell::sync::Lazy::new(|| {
    std::env::var("PETSTORE_URL").unwrap_or(String::from(DEFAULT_BASE_URL))
});

static PETSTORE_CONFIG: once_cell::sync::Lazy<Option<String>> =
    once_cell::sync::Lazy::new(|| std::env::var("PETSTORE_CONFIG").ok());

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SuiteConfig {
    pub base_url: String,
    pub timeout: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        SuiteConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SuiteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        SuiteConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ContractError> {
        let cfg: SuiteConfig = serde_yaml::from_str(yaml)
            .map_err(|err| ContractError::Config(format!("invalid suite config: {err}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|err| {
            ContractError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_yaml(&yaml)
    }

    // PETSTORE_URL wins over the file
    pub fn from_env() -> Result<Self, ContractError> {
        let mut cfg = match PETSTORE_CONFIG.as_deref() {
            Some(path) => Self::from_file(path)?,
            None => SuiteConfig::default(),
        };
        if std::env::var_os("PETSTORE_URL").is_some() {
            cfg.base_url = PETSTORE_URL.to_string();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn base_url(&self) -> Result<Url, ContractError> {
        let mut url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(ContractError::Config(format!(
                "base url {} cannot carry a path",
                self.base_url
            )));
        }
        // keep the last segment when joining relative paths
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    fn validate(&self) -> Result<(), ContractError> {
        if self.timeout == 0 {
            return Err(ContractError::Config("timeout must be positive".into()));
        }
        self.base_url().map(|_| ())
    }
}
