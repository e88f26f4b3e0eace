use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityKind {
    /// Free without ads
    Free,
    /// Free with ads
    Ads,
    /// Subscription
    Flatrate,
    Rent,
    Buy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    pub provider_name: String,
    #[serde(default)]
    pub provider_id: Option<u32>,
}

impl Provider {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            provider_name: name.into(),
            provider_id: None,
        }
    }
}

/// Offers for one region. A kind counts as present when its key exists in
/// the payload, even with an empty provider list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionAvailability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<Vec<Provider>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ads: Option<Vec<Provider>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flatrate: Option<Vec<Provider>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<Vec<Provider>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy: Option<Vec<Provider>>,
}

impl RegionAvailability {
    pub fn providers(&self, kind: AvailabilityKind) -> Option<&[Provider]> {
        let list = match kind {
            AvailabilityKind::Free => &self.free,
            AvailabilityKind::Ads => &self.ads,
            AvailabilityKind::Flatrate => &self.flatrate,
            AvailabilityKind::Rent => &self.rent,
            AvailabilityKind::Buy => &self.buy,
        };
        list.as_deref()
    }

    pub fn has(&self, kind: AvailabilityKind) -> bool {
        self.providers(kind).is_some()
    }

    pub fn with(mut self, kind: AvailabilityKind, providers: Vec<Provider>) -> Self {
        let slot = match kind {
            AvailabilityKind::Free => &mut self.free,
            AvailabilityKind::Ads => &mut self.ads,
            AvailabilityKind::Flatrate => &mut self.flatrate,
            AvailabilityKind::Rent => &mut self.rent,
            AvailabilityKind::Buy => &mut self.buy,
        };
        *slot = Some(providers);
        self
    }
}

/// Per-region watch-provider offers for a single movie.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchAvailability {
    #[serde(default)]
    pub regions: HashMap<String, RegionAvailability>,
}

impl WatchAvailability {
    pub fn region(&self, code: &str) -> Option<&RegionAvailability> {
        self.regions.get(code)
    }

    pub fn with_region(mut self, code: impl Into<String>, region: RegionAvailability) -> Self {
        self.regions.insert(code.into(), region);
        self
    }
}
