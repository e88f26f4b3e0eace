use super::{build_client, load_config, load_credentials};
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use ondeck_config::{default_scheduler_config, PathManager};
use ondeck_core::SyncOrchestrator;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

/// One orchestrator shared by every tick. The mutex keeps runs from overlapping.
#[derive(Clone)]
struct SyncRunner {
    orchestrator: Arc<SyncOrchestrator>,
    running: Arc<Mutex<()>>,
}

impl SyncRunner {
    fn new(orchestrator: SyncOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Errors are logged, never propagated: the next tick tries again.
    async fn run(&self, trigger: &'static str) -> bool {
        let Ok(_guard) = self.running.try_lock() else {
            warn!(operation = "scheduled_sync_skipped", trigger, "Previous sync still running, skipping");
            return false;
        };

        info!(operation = "scheduled_sync_start", trigger, "Starting sync");
        match self.orchestrator.sync().await {
            Ok(result) => {
                info!(
                    operation = "scheduled_sync_complete",
                    trigger,
                    movies_on_deck = result.movies_on_deck,
                    lists_written = result.lists_written.len(),
                    lists_failed = result.lists_failed.len(),
                    duration_ms = result.duration.as_millis() as u64,
                    "Sync completed"
                );
                true
            }
            Err(e) => {
                error!(operation = "scheduled_sync_error", trigger, error = %format!("{:#}", e), "Sync failed");
                false
            }
        }
    }
}

pub async fn run_daemon(schedule_override: Option<String>, no_startup_sync: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    let credentials = load_credentials(&path_manager)?;

    let scheduler_config = config.scheduler.clone().unwrap_or_else(default_scheduler_config);
    let schedule = schedule_override.unwrap_or(scheduler_config.schedule);
    let run_on_startup = !no_startup_sync && scheduler_config.run_on_startup;

    let client = build_client(&config, &credentials);
    let runner = SyncRunner::new(SyncOrchestrator::new(client.clone(), client, credentials.account_id, config));

    let mut scheduler = JobScheduler::new()
        .await
        .map_err(|e| eyre!("Failed to create scheduler: {}", e))?;
    let job_runner = runner.clone();
    let job = Job::new_async(schedule.as_str(), move |_id, _scheduler| {
        let runner = job_runner.clone();
        Box::pin(async move {
            runner.run("schedule").await;
        })
    })
    .map_err(|e| eyre!("Invalid schedule '{}': {}", schedule, e))?;
    scheduler
        .add(job)
        .await
        .map_err(|e| eyre!("Failed to register sync job: {}", e))?;

    if run_on_startup {
        info!(operation = "scheduler_startup", "Running initial sync on startup");
        runner.run("startup").await;
    }

    scheduler
        .start()
        .await
        .map_err(|e| eyre!("Failed to start scheduler: {}", e))?;
    info!(
        operation = "scheduler_started",
        schedule = %schedule,
        log_file = %path_manager.daemon_log_file().display(),
        "Scheduler started"
    );
    output.info(format!("Daemon running on schedule '{}'. Press Ctrl-C to stop.", schedule));

    tokio::signal::ctrl_c().await?;
    info!(operation = "scheduler_stopping", "Shutdown signal received");
    scheduler
        .shutdown()
        .await
        .map_err(|e| eyre!("Failed to stop scheduler: {}", e))?;
    output.success("Daemon stopped");
    Ok(())
}
