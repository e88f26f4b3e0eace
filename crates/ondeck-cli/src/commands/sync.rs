use super::sync_ui::SyncUI;
use super::{build_client, load_config, load_credentials};
use crate::output::{new_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use ondeck_config::PathManager;
use ondeck_core::{SyncOptions, SyncOrchestrator, SyncResult};
use ondeck_models::ProviderMode;
use serde_json::json;
use std::sync::Arc;

pub async fn run_sync(mode: Option<ProviderMode>, genre_filter: bool, dry_run: bool, output: &Output) -> Result<()> {
    tracing::debug!("Sync command started");

    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    let credentials = load_credentials(&path_manager)?;

    // --mode replaces the configured mode; --genre-filter can only switch the filter on.
    let mut options = SyncOptions::from_config(&config);
    if let Some(mode) = mode {
        options.mode = mode;
    }
    options.genre_filter |= genre_filter;
    options.dry_run = dry_run;

    let client = build_client(&config, &credentials);
    let ui = Arc::new(SyncUI::new(output.is_quiet() || !output.is_human()));
    let orchestrator = SyncOrchestrator::new(client.clone(), client, credentials.account_id.clone(), config)
        .with_options(options)
        .with_progress(ui);

    let result = orchestrator
        .sync()
        .await
        .map_err(|e| eyre!("Sync operation failed: {:#}", e))?;

    report(&result, output);
    Ok(())
}

fn report(result: &SyncResult, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "success": result.failures.is_empty(),
            "dry_run": result.dry_run,
            "movies_considered": result.movies_considered,
            "movies_on_deck": result.movies_on_deck,
            "collections_resolved": result.collections_resolved,
            "skipped_excluded": result.skipped_excluded,
            "lists_written": result.lists_written,
            "lists_failed": result.lists_failed,
            "lists_skipped": result.lists_skipped,
            "failures": result.failures.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
            "lists": result.buckets,
            "duration_seconds": result.duration.as_secs_f64(),
        }));
        return;
    }

    if result.dry_run {
        let mut table = new_table();
        table.set_header(vec![Cell::new("List"), Cell::new("Movies"), Cell::new("TMDB ids")]);
        for (name, ids) in result.buckets.write_order() {
            let preview: Vec<String> = ids.iter().take(8).map(|id| id.to_string()).collect();
            let suffix = if ids.len() > 8 { ", ..." } else { "" };
            table.add_row(vec![
                Cell::new(name),
                Cell::new(ids.len()),
                Cell::new(format!("{}{}", preview.join(", "), suffix)),
            ]);
        }
        output.table(&table);
        output.info(format!(
            "Dry run: {} lists would be rewritten, nothing was written",
            result.buckets.len()
        ));
        return;
    }

    for failure in &result.failures {
        output.warn(failure.to_string());
    }
    for skipped in &result.lists_skipped {
        output.warn(format!("No list named {}, skipped", skipped));
    }
    output.success(format!(
        "Sync completed: {} of {} movies on deck, {} lists written in {:.1}s",
        result.movies_on_deck,
        result.movies_considered,
        result.lists_written.len(),
        result.duration.as_secs_f64()
    ));
}
