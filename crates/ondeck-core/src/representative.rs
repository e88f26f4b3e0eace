use chrono::NaiveDate;
use ondeck_models::{CollectionPart, MovieId, ProviderMode};
use std::collections::HashSet;

/// How many parts of a franchise may qualify at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionPick {
    /// Only the next part to watch
    First,
    /// Every released, unwatched part after the watched streak
    All,
}

impl CollectionPick {
    pub fn for_mode(mode: ProviderMode) -> Self {
        match mode {
            ProviderMode::All => CollectionPick::All,
            ProviderMode::Free | ProviderMode::Rent => CollectionPick::First,
        }
    }
}

/// Pick the part(s) of a collection that are next in line.
///
/// Undated parts are ignored and the rest are scanned by ascending release
/// date. Leading watched parts are skipped; the first unwatched part ends that
/// streak. From there on, a part released after `today` stops the scan and
/// watched parts are passed over. Ties on release date keep payload order.
pub fn select_representatives(
    parts: &[CollectionPart],
    watched: &HashSet<MovieId>,
    today: NaiveDate,
    pick: CollectionPick,
) -> Vec<MovieId> {
    let mut dated: Vec<(NaiveDate, MovieId)> = parts
        .iter()
        .filter_map(|part| part.release_date.map(|date| (date, part.id)))
        .collect();
    dated.sort_by_key(|(date, _)| *date);

    let mut continuing_streak = true;
    let mut picked = Vec::new();
    for (release_date, id) in dated {
        let is_watched = watched.contains(&id);
        if !is_watched {
            continuing_streak = false;
        }
        if continuing_streak || is_watched {
            continue;
        }
        if release_date > today {
            break;
        }

        picked.push(id);
        if pick == CollectionPick::First {
            break;
        }
    }

    picked
}
