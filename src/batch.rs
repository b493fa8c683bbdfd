use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::extract::DocumentSource;
use crate::input::UrlEntry;
use crate::metrics::{MetricsEngine, MetricsVector};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Analyzed(MetricsVector),
    FetchFailed(String),
    AnalysisFailed(String),
}

impl EntryOutcome {
    /// Failures become the all-zero vector.
    pub fn metrics(&self) -> MetricsVector {
        match self {
            EntryOutcome::Analyzed(m) => *m,
            EntryOutcome::FetchFailed(_) | EntryOutcome::AnalysisFailed(_) => {
                MetricsVector::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub entry: UrlEntry,
    pub outcome: EntryOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total: usize,
    pub analyzed: usize,
    /// Analyzed, but no words were found on the page.
    pub empty: usize,
    pub fetch_failed: usize,
    pub analysis_failed: usize,
}

impl BatchStats {
    pub fn from_rows(rows: &[ResultRow]) -> Self {
        rows.iter().fold(
            BatchStats {
                total: rows.len(),
                ..Default::default()
            },
            |mut stats, row| {
                match row.outcome {
                    EntryOutcome::Analyzed(m) => {
                        stats.analyzed += 1;
                        if m.is_zero() {
                            stats.empty += 1;
                        }
                    }
                    EntryOutcome::FetchFailed(_) => stats.fetch_failed += 1,
                    EntryOutcome::AnalysisFailed(_) => stats.analysis_failed += 1,
                }
                stats
            },
        )
    }

    pub fn print(&self) {
        info!(
            total = self.total,
            analyzed = self.analyzed,
            empty = self.empty,
            fetch_failed = self.fetch_failed,
            analysis_failed = self.analysis_failed,
            "batch finished"
        );
        println!(
            "Processed {} URLs: {} analyzed, {} fetch failures, {} analysis failures",
            self.total, self.analyzed, self.fetch_failed, self.analysis_failed
        );
        if self.empty > 0 {
            println!("  {} pages had no extractable text", self.empty);
        }
        if self.fetch_failed + self.analysis_failed > 0 {
            println!("  (failed rows are written with all-zero metrics)");
        }
    }
}

/// One row per entry, in input order, whatever the worker count.
pub struct BatchDriver<'a> {
    source: &'a dyn DocumentSource,
    engine: &'a MetricsEngine,
    workers: usize,
    progress: bool,
}

impl<'a> BatchDriver<'a> {
    pub fn new(source: &'a dyn DocumentSource, engine: &'a MetricsEngine) -> Self {
        BatchDriver {
            source,
            engine,
            workers: 1,
            progress: false,
        }
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub fn run(&self, entries: &[UrlEntry]) -> Vec<ResultRow> {
        let pb = self.progress_bar(entries.len());
        let rows = self.dispatch(entries, &pb);
        pb.finish_and_clear();
        rows
    }

    #[cfg(feature = "rayon")]
    fn dispatch(&self, entries: &[UrlEntry], pb: &ProgressBar) -> Vec<ResultRow> {
        if self.workers > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
            {
                Ok(pool) => {
                    return pool.install(|| {
                        entries
                            .par_iter()
                            .map(|entry| self.process_tracked(entry, pb))
                            .collect()
                    })
                }
                Err(e) => warn!(error = %e, "worker pool unavailable, processing sequentially"),
            }
        }
        self.sequential(entries, pb)
    }

    #[cfg(not(feature = "rayon"))]
    fn dispatch(&self, entries: &[UrlEntry], pb: &ProgressBar) -> Vec<ResultRow> {
        if self.workers > 1 {
            warn!(workers = self.workers, "built without rayon, processing sequentially");
        }
        self.sequential(entries, pb)
    }

    fn sequential(&self, entries: &[UrlEntry], pb: &ProgressBar) -> Vec<ResultRow> {
        entries
            .iter()
            .map(|entry| self.process_tracked(entry, pb))
            .collect()
    }

    fn process_tracked(&self, entry: &UrlEntry, pb: &ProgressBar) -> ResultRow {
        let row = self.process(entry);
        pb.inc(1);
        row
    }

    fn process(&self, entry: &UrlEntry) -> ResultRow {
        let outcome = match self.source.fetch(&entry.url) {
            Err(e) => {
                warn!(id = %entry.id, url = %entry.url, error = %e, "extraction failed");
                EntryOutcome::FetchFailed(e.to_string())
            }
            Ok(document) => match self.engine.analyze(&document.text()) {
                Ok(metrics) => EntryOutcome::Analyzed(metrics),
                Err(e) => {
                    warn!(id = %entry.id, url = %entry.url, error = %e, "analysis failed");
                    EntryOutcome::AnalysisFailed(e.to_string())
                }
            },
        };
        ResultRow {
            entry: entry.clone(),
            outcome,
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        pb
    }
}
