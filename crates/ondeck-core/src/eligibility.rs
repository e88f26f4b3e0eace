use ondeck_models::{AvailabilityKind, ProviderMode, WatchAvailability};
use std::collections::HashSet;

/// Whether a movie can be watched in the configured region without buying it.
#[derive(Debug, Clone)]
pub struct ProviderGate {
    mode: ProviderMode,
    region: String,
    allowed_providers: HashSet<String>,
}

impl ProviderGate {
    pub fn new(mode: ProviderMode, region: impl Into<String>, allowed_providers: impl IntoIterator<Item = String>) -> Self {
        Self {
            mode,
            region: region.into(),
            allowed_providers: allowed_providers.into_iter().collect(),
        }
    }

    pub fn mode(&self) -> ProviderMode {
        self.mode
    }

    /// `all` mode never looks at providers, so callers can skip the lookup.
    pub fn needs_availability(&self) -> bool {
        self.mode != ProviderMode::All
    }

    /// Presence of an offer kind is what counts, not its provider list.
    /// Free or ad-supported anywhere in the region passes. Rental passes in
    /// `rent` mode. Otherwise a subscription on an allow-listed provider is
    /// required. No entry for the region fails.
    pub fn passes(&self, availability: &WatchAvailability) -> bool {
        if self.mode == ProviderMode::All {
            return true;
        }
        let Some(region) = availability.region(&self.region) else {
            return false;
        };

        if region.has(AvailabilityKind::Free) || region.has(AvailabilityKind::Ads) {
            return true;
        }
        if self.mode == ProviderMode::Rent && region.has(AvailabilityKind::Rent) {
            return true;
        }

        region
            .providers(AvailabilityKind::Flatrate)
            .map(|providers| {
                providers
                    .iter()
                    .any(|p| self.allowed_providers.contains(&p.provider_name))
            })
            .unwrap_or(false)
    }
}

/// Fixed genre policy applied when `genre_filter` is on.
pub struct GenreGate;

const HORROR_COMPANIONS: [&str; 4] = ["Action", "Adventure", "Comedy", "Romance"];

impl GenreGate {
    /// Animation needs Drama alongside it. Horror needs one of Action,
    /// Adventure, Comedy or Romance.
    pub fn passes(genres: &[&str]) -> bool {
        let has = |name: &str| genres.iter().any(|g| *g == name);

        if has("Animation") && !has("Drama") {
            return false;
        }
        if has("Horror") && !HORROR_COMPANIONS.iter().any(|g| has(g)) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone)]
pub struct EligibilityPolicy {
    provider_gate: ProviderGate,
    genre_filter: bool,
}

impl EligibilityPolicy {
    pub fn new(provider_gate: ProviderGate, genre_filter: bool) -> Self {
        Self {
            provider_gate,
            genre_filter,
        }
    }

    pub fn mode(&self) -> ProviderMode {
        self.provider_gate.mode()
    }

    pub fn needs_availability(&self) -> bool {
        self.provider_gate.needs_availability()
    }

    pub fn passes_genres(&self, genres: &[&str]) -> bool {
        !self.genre_filter || GenreGate::passes(genres)
    }

    /// `availability` may be `None` only when [`needs_availability`] is false;
    /// otherwise a missing lookup counts as not available.
    ///
    /// [`needs_availability`]: EligibilityPolicy::needs_availability
    pub fn is_eligible(&self, availability: Option<&WatchAvailability>, genres: &[&str]) -> bool {
        if !self.passes_genres(genres) {
            return false;
        }
        match availability {
            Some(availability) => self.provider_gate.passes(availability),
            None => !self.needs_availability(),
        }
    }
}
