use color_eyre::eyre::eyre;
use color_eyre::Result;
use ondeck_config::{Config, CredentialStore, PathManager, TmdbCredentials};
use ondeck_sources::TmdbClient;
use std::sync::Arc;

pub mod config;
pub mod daemon;
pub mod lists;
pub mod prompts;
pub mod sync;
pub mod sync_ui;

/// Load and validate `config.toml`. A missing file means defaults.
pub(crate) fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

/// Credentials file overlaid with the `TMDB_*` environment variables.
pub(crate) fn load_credential_store(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    store.apply_env();
    Ok(store)
}

pub(crate) fn load_credentials(path_manager: &PathManager) -> Result<TmdbCredentials> {
    load_credential_store(path_manager)?
        .tmdb_credentials()
        .map_err(|e| eyre!("{}", e))
}

pub(crate) fn build_client(config: &Config, credentials: &TmdbCredentials) -> Arc<TmdbClient> {
    Arc::new(TmdbClient::from_config(&config.tmdb, credentials))
}
