use super::*;
use crate::eligibility::ProviderGate;
use crate::testing::{free_in_us, offered_in_us, part, today, FakeMetadata, RecordingProgress};
use ondeck_config::default_allowed_providers;
use ondeck_models::AvailabilityKind;

fn policy(mode: ProviderMode, genre_filter: bool) -> EligibilityPolicy {
    EligibilityPolicy::new(ProviderGate::new(mode, "US", default_allowed_providers()), genre_filter)
}

fn input(number_one: &[MovieId], watched: &[MovieId], excluded: &[MovieId]) -> ResolveInput {
    ResolveInput {
        number_one: number_one.iter().copied().collect(),
        watched: watched.iter().copied().collect(),
        excluded: excluded.iter().copied().collect(),
    }
}

async fn resolve(metadata: &FakeMetadata, mode: ProviderMode, genre_filter: bool, input: &ResolveInput) -> Resolution {
    EligibilityResolver::new(metadata, policy(mode, genre_filter), "On Deck")
        .with_today(today())
        .resolve(input)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_watched_standalone_never_on_deck() {
    let metadata = FakeMetadata::new()
        .with_movie(1, "Seen", &["Action"])
        .with_movie(2, "Unseen", &["Action"])
        .with_providers(1, free_in_us())
        .with_providers(2, free_in_us());

    let resolution = resolve(&metadata, ProviderMode::Free, false, &input(&[1, 2], &[1], &[])).await;

    assert_eq!(resolution.buckets.on_deck(), &BTreeSet::from([2]));
    assert_eq!(resolution.buckets.get("Action"), Some(&BTreeSet::from([2])));
    assert_eq!(resolution.movies_considered, 2);
    assert_eq!(metadata.count("providers 1"), 0);
}

#[tokio::test]
async fn test_collection_fetched_once_per_run() {
    let metadata = FakeMetadata::new()
        .with_collection_movie(10, "Part One", 500)
        .with_collection_movie(11, "Part Two", 500)
        .with_collection(500, vec![part(10, "2001-01-01", &["Adventure"]), part(11, "2003-01-01", &["Adventure"])])
        .with_providers(10, free_in_us());

    let resolution = resolve(&metadata, ProviderMode::Free, false, &input(&[10, 11], &[], &[])).await;

    assert_eq!(metadata.count("collection 500"), 1);
    assert_eq!(resolution.collections_resolved, 1);
    assert_eq!(resolution.movies_considered, 2);
    assert_eq!(resolution.buckets.on_deck(), &BTreeSet::from([10]));
    assert_eq!(resolution.buckets.get("Adventure"), Some(&BTreeSet::from([10])));
}

#[tokio::test]
async fn test_collection_representative_uses_catalog_genres() {
    let metadata = FakeMetadata::new()
        .with_collection_movie(21, "Sequel", 600)
        .with_collection(
            600,
            vec![
                part(20, "1984-01-01", &["Horror"]),
                part(21, "1987-01-01", &["Horror", "Comedy"]),
                part(22, "2099-01-01", &["Horror"]),
            ],
        )
        .with_providers(21, free_in_us());

    let resolution = resolve(&metadata, ProviderMode::Free, true, &input(&[21], &[20], &[])).await;

    assert_eq!(resolution.buckets.on_deck(), &BTreeSet::from([21]));
    assert_eq!(resolution.buckets.get("Horror"), Some(&BTreeSet::from([21])));
    assert_eq!(resolution.buckets.get("Comedy"), Some(&BTreeSet::from([21])));
}

#[tokio::test]
async fn test_genre_filter_rejects_before_provider_lookup() {
    let metadata = FakeMetadata::new()
        .with_movie(30, "Cartoon", &["Animation", "Comedy"])
        .with_movie(31, "Scary", &["Horror", "Thriller"])
        .with_providers(30, free_in_us())
        .with_providers(31, free_in_us());

    let resolution = resolve(&metadata, ProviderMode::Free, true, &input(&[30, 31], &[], &[])).await;

    assert!(resolution.buckets.on_deck().is_empty());
    assert_eq!(metadata.count("providers"), 0);

    let resolution = resolve(&metadata, ProviderMode::Free, false, &input(&[30, 31], &[], &[])).await;
    assert_eq!(resolution.buckets.on_deck(), &BTreeSet::from([30, 31]));
}

#[tokio::test]
async fn test_all_mode_skips_provider_lookup() {
    let metadata = FakeMetadata::new()
        .with_movie(40, "Buy Only", &["Drama"])
        .with_providers(40, offered_in_us(AvailabilityKind::Buy, "Apple TV"));

    let resolution = resolve(&metadata, ProviderMode::All, false, &input(&[40], &[], &[])).await;

    assert_eq!(resolution.buckets.on_deck(), &BTreeSet::from([40]));
    assert_eq!(metadata.count("providers"), 0);
}

#[tokio::test]
async fn test_rent_only_movie_depends_on_mode() {
    let metadata = FakeMetadata::new()
        .with_movie(50, "Rental", &["Thriller"])
        .with_providers(50, offered_in_us(AvailabilityKind::Rent, "Apple TV"));

    let free = resolve(&metadata, ProviderMode::Free, false, &input(&[50], &[], &[])).await;
    assert!(free.buckets.on_deck().is_empty());

    let rent = resolve(&metadata, ProviderMode::Rent, false, &input(&[50], &[], &[])).await;
    assert_eq!(rent.buckets.on_deck(), &BTreeSet::from([50]));
}

#[tokio::test]
async fn test_excluded_movies_only_qualify_in_all_mode() {
    let metadata = FakeMetadata::new()
        .with_movie(60, "Hero", &["Action"])
        .with_collection_movie(61, "Hero Returns", 700)
        .with_collection(700, vec![part(61, "2012-01-01", &["Action"]), part(62, "2014-01-01", &["Action"])])
        .with_providers(60, free_in_us())
        .with_providers(62, free_in_us());

    let excluded = input(&[60, 61], &[61], &[60, 62]);

    let free = resolve(&metadata, ProviderMode::Free, false, &excluded).await;
    assert!(free.buckets.on_deck().is_empty());
    assert_eq!(free.skipped_excluded, 2);
    assert_eq!(metadata.count("movie 60"), 0);

    let all = resolve(&metadata, ProviderMode::All, false, &excluded).await;
    assert_eq!(all.buckets.on_deck(), &BTreeSet::from([60, 62]));
    assert_eq!(all.skipped_excluded, 0);
}

#[tokio::test]
async fn test_all_mode_collects_every_released_part() {
    let metadata = FakeMetadata::new()
        .with_collection_movie(70, "First", 800)
        .with_collection(
            800,
            vec![
                part(70, "2000-01-01", &["Western"]),
                part(71, "2002-01-01", &["Western"]),
                part(72, "2004-01-01", &["Western"]),
                part(73, "2099-01-01", &["Western"]),
            ],
        );

    let resolution = resolve(&metadata, ProviderMode::All, false, &input(&[70], &[70, 72], &[])).await;
    assert_eq!(resolution.buckets.on_deck(), &BTreeSet::from([71]));

    let resolution = resolve(&metadata, ProviderMode::All, false, &input(&[70], &[], &[])).await;
    assert_eq!(resolution.buckets.on_deck(), &BTreeSet::from([70, 71, 72]));
}

#[tokio::test]
async fn test_missing_movie_is_skipped() {
    let metadata = FakeMetadata::new()
        .with_movie(81, "Still Here", &["Drama"])
        .with_providers(81, free_in_us());

    let resolution = resolve(&metadata, ProviderMode::Free, false, &input(&[80, 81], &[], &[])).await;

    assert_eq!(resolution.buckets.on_deck(), &BTreeSet::from([81]));
    assert_eq!(resolution.movies_considered, 1);
}

#[tokio::test]
async fn test_missing_collection_fails_the_run() {
    let metadata = FakeMetadata::new().with_collection_movie(90, "Orphan", 999);

    let err = EligibilityResolver::new(&metadata, policy(ProviderMode::Free, false), "On Deck")
        .with_today(today())
        .resolve(&input(&[90], &[], &[]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("collection 999"), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_progress_reported_in_ascending_id_order() {
    let metadata = FakeMetadata::new()
        .with_movie(3, "Third", &[])
        .with_movie(1, "First", &[])
        .with_movie(2, "Second", &[]);
    let progress = RecordingProgress::default();

    EligibilityResolver::new(&metadata, policy(ProviderMode::All, false), "On Deck")
        .with_today(today())
        .with_progress(&progress)
        .resolve(&input(&[3, 1, 2], &[], &[]))
        .await
        .unwrap();

    assert_eq!(
        progress.events(),
        vec!["(1 of 3): First", "(2 of 3): Second", "(3 of 3): Third"]
    );
}

#[tokio::test]
async fn test_resolution_is_repeatable() {
    let metadata = FakeMetadata::new()
        .with_movie(1, "One", &["Comedy", "Romance"])
        .with_movie(2, "Two", &["Comedy"])
        .with_providers(1, free_in_us())
        .with_providers(2, offered_in_us(AvailabilityKind::Flatrate, "Netflix"));
    let input = input(&[1, 2], &[], &[]);

    let first = resolve(&metadata, ProviderMode::Free, false, &input).await;
    let second = resolve(&metadata, ProviderMode::Free, false, &input).await;
    assert_eq!(first.buckets, second.buckets);
    assert_eq!(first.genre_names.len(), 10);
}
