use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use ondeck_core::SyncProgress;
use std::io::IsTerminal;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Progress bars on a terminal, structured log lines everywhere else.
pub struct SyncUI {
    _multi: MultiProgress,
    movies: ProgressBar,
    lists: ProgressBar,
    interactive: bool,
}

impl SyncUI {
    /// `suppressed` forces log-line mode (quiet or JSON output).
    pub fn new(suppressed: bool) -> Self {
        let interactive = !suppressed && is_interactive();
        let multi = MultiProgress::new();

        let (movies, lists) = if interactive {
            (multi.add(new_bar("Looking up movies...")), multi.add(new_bar("Waiting to write lists...")))
        } else {
            tracing::debug!(
                operation = "ui_init",
                mode = "non_interactive",
                "Progress bars disabled, using structured logging"
            );
            (ProgressBar::hidden(), ProgressBar::hidden())
        };

        Self {
            _multi: multi,
            movies,
            lists,
            interactive,
        }
    }
}

impl SyncProgress for SyncUI {
    fn movie_started(&self, index: usize, total: usize, title: &str) {
        if self.interactive {
            self.movies.set_length(total as u64);
            self.movies.set_position(index as u64);
            self.movies.set_message(title.to_string());
        } else {
            tracing::info!(
                operation = "progress",
                phase = "lookup",
                current = index,
                total = total,
                "({} of {}): {}",
                index,
                total,
                title
            );
        }
    }

    fn movies_finished(&self, eligible: usize) {
        if self.interactive {
            self.movies.finish_with_message(format!("{} movies on deck", eligible));
        }
    }

    fn list_started(&self, index: usize, total: usize, name: &str) {
        if self.interactive {
            self.lists.set_length(total as u64);
            self.lists.set_position(index as u64);
            self.lists.set_message(format!("Populating {}", name));
        } else {
            tracing::info!(
                operation = "progress",
                phase = "write",
                current = index,
                total = total,
                "({} of {}): Populating {}",
                index,
                total,
                name
            );
        }
    }

    fn lists_finished(&self) {
        if self.interactive {
            self.lists.finish_with_message("Lists written");
        }
    }
}

fn new_bar(message: &'static str) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
    let bar = ProgressBar::new(0);
    bar.set_style(style);
    bar.set_message(message);
    bar
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
