use serde::{Deserialize, Serialize};
use std::fmt;

/// How strict the provider gate is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Free, ad-supported, or an allow-listed subscription
    #[default]
    Free,
    /// As `Free`, plus rentals
    Rent,
    /// No provider gate; every released, unwatched collection part qualifies
    All,
}

impl ProviderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderMode::Free => "free",
            ProviderMode::Rent => "rent",
            ProviderMode::All => "all",
        }
    }
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
