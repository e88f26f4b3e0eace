pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{
    default_allowed_providers, default_scheduler_config, Config, ConfigError, EligibilityConfig,
    ListsConfig, PacingConfig, SchedulerConfig, TmdbConfig,
};
pub use credentials::{CredentialStore, TmdbCredentials};
pub use paths::{container_base_path, PathManager};
