use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const ACCESS_TOKEN_KEY: &str = "tmdb_access_token";
const API_KEY_KEY: &str = "tmdb_api_key";
const ACCOUNT_ID_KEY: &str = "tmdb_account_id";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

/// The three secrets a sync run needs.
#[derive(Clone)]
pub struct TmdbCredentials {
    /// v4 read/write bearer token
    pub access_token: String,
    /// v3 API key
    pub api_key: String,
    /// v4 account object id
    pub account_id: String,
}

impl std::fmt::Debug for TmdbCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbCredentials")
            .field("access_token", &"***")
            .field("api_key", &"***")
            .field("account_id", &self.account_id)
            .finish()
    }
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    /// Overlay values from `TMDB_ACCESS_TOKEN`, `TMDB_API_KEY` and
    /// `TMDB_ACCOUNT_ID`. Environment wins over the file.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let pairs = [
            ("TMDB_ACCESS_TOKEN", ACCESS_TOKEN_KEY),
            ("TMDB_API_KEY", API_KEY_KEY),
            ("TMDB_ACCOUNT_ID", ACCOUNT_ID_KEY),
        ];
        for (env_name, key) in pairs {
            if let Some(value) = lookup(env_name).filter(|v| !v.trim().is_empty()) {
                self.set(key.to_string(), value);
            }
        }
    }

    pub fn get_access_token(&self) -> Option<&String> {
        self.get(ACCESS_TOKEN_KEY)
    }

    pub fn set_access_token(&mut self, token: String) {
        self.set(ACCESS_TOKEN_KEY.to_string(), token);
    }

    pub fn get_api_key(&self) -> Option<&String> {
        self.get(API_KEY_KEY)
    }

    pub fn set_api_key(&mut self, key: String) {
        self.set(API_KEY_KEY.to_string(), key);
    }

    pub fn get_account_id(&self) -> Option<&String> {
        self.get(ACCOUNT_ID_KEY)
    }

    pub fn set_account_id(&mut self, account_id: String) {
        self.set(ACCOUNT_ID_KEY.to_string(), account_id);
    }

    /// All three credentials, or an error naming the first one missing.
    pub fn tmdb_credentials(&self) -> Result<TmdbCredentials> {
        let require = |value: Option<&String>, env_name: &str| {
            value
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Missing credential: set {} or run 'ondeck config init'", env_name))
        };
        Ok(TmdbCredentials {
            access_token: require(self.get_access_token(), "TMDB_ACCESS_TOKEN")?,
            api_key: require(self.get_api_key(), "TMDB_API_KEY")?,
            account_id: require(self.get_account_id(), "TMDB_ACCOUNT_ID")?,
        })
    }
}
