//! User configuration from `~/.s3snip/conf.json`.
//!
//! Loaded once at startup. No validation happens here: a missing key simply
//! becomes an empty field and the upload stage fails against it later.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory under the user's home that holds the config file.
pub const CONFIG_DIR: &str = ".s3snip";
pub const CONFIG_FILE: &str = "conf.json";

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "awsRegion")]
    pub region: String,
    #[serde(rename = "awsAccessKey")]
    pub access_key: String,
    #[serde(rename = "awsSecretKey")]
    pub secret_key: String,
    #[serde(rename = "awsBucket")]
    pub bucket: String,
    /// Loaded but not used by the pipeline.
    #[serde(rename = "bitlyAccessToken")]
    pub short_link_token: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("access_key", &mask(&self.access_key))
            .field("secret_key", &mask(&self.secret_key))
            .field("bucket", &self.bucket)
            .field("short_link_token", &self.short_link_token.as_deref().map(mask))
            .finish()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "***"
    }
}

/// Source of the user's home directory.
pub trait HomeDir {
    fn home_dir(&self) -> Option<PathBuf>;
}

/// The current user's real home directory.
pub struct UserHome;

impl HomeDir for UserHome {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// A fixed directory standing in for home.
impl HomeDir for PathBuf {
    fn home_dir(&self) -> Option<PathBuf> {
        Some(self.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load the config from `<home>/.s3snip/conf.json`.
pub fn load_config(home: &dyn HomeDir) -> Result<Config, ConfigError> {
    let home = home.home_dir().ok_or(ConfigError::NoHomeDir)?;
    load_config_from(&home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config from an explicit file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let file = std::fs::File::open(path).map_err(|source| ConfigError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = serde_json::from_reader(std::io::BufReader::new(file)).map_err(
        |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
    )?;

    log::info!(
        "[CONFIG] Loaded {} (region {:?}, bucket {:?})",
        path.display(),
        config.region,
        config.bucket
    );
    Ok(config)
}
