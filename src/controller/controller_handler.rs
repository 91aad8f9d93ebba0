use crate::configuration::config::Config;
use crate::configuration::types::DateRange;
use crate::error_handling::types::*;
use crate::log_parsing::LineClassifier;
use crate::log_source::{discover_logs, open_log, LogFile};
use crate::report::write_report;
use crate::session_tracking::SessionTracker;
use chrono::NaiveDate;
use log::{error, info};
use std::io::BufRead;
use std::path::Path;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub files_processed: usize,
    pub lines_processed: usize,
    pub players: usize,
    pub unmatched_leaves: usize,
    /// Players whose session was still open at the end of the last file.
    pub still_online: Vec<String>,
    pub range: Option<DateRange>,
}

/// Drives one analysis run: log discovery, line feeding and report writing.
pub struct Controller {
    pub config: Config,
    tracker: SessionTracker,
    lines_processed: usize,
}

impl Controller {
    pub fn new(config: Config) -> Result<Self, AnalysisError> {
        config.validate().map_err(|e| {
            error!("Invalid configuration: {}", e);
            AnalysisError::ConfigurationError(e)
        })?;
        let tracker = SessionTracker::new(LineClassifier::new(config.header_width));
        Ok(Self {
            config,
            tracker,
            lines_processed: 0,
        })
    }

    /// Processes every discovered log file and writes the report.
    ///
    /// Nothing is written when any file fails to process.
    pub fn run(&mut self) -> Result<AnalysisSummary, AnalysisError> {
        let logs = discover_logs(&self.config.log_dir, &self.config.excluded_prefixes)?;

        for log_file in &logs {
            self.process_file(log_file)?;
        }

        let range = self.resolve_range(&logs);
        match &range {
            Some(range) => {
                let players = self.tracker.finalize();
                write_report(self.config.format, &self.config.output, &players, range)?;
            }
            None => info!("No log files and no date range, nothing to report"),
        }

        Ok(self.summary(logs.len(), range))
    }

    pub fn process_file(&mut self, log_file: &LogFile) -> Result<(), AnalysisError> {
        info!("Processing {}", log_file.path.display());
        let reader = open_log(log_file)?;
        self.process_reader(log_file.day, reader, &log_file.path)
    }

    /// Feeds every line of `reader` to the tracker as the log of `day`.
    ///
    /// `origin` only names the source in errors.
    pub fn process_reader<R: BufRead>(
        &mut self,
        day: NaiveDate,
        reader: R,
        origin: &Path,
    ) -> Result<(), AnalysisError> {
        self.tracker
            .begin_day(day)
            .map_err(|source| tracker_error(origin, 0, source))?;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|error| {
                AnalysisError::LogSourceError(LogSourceError::UnreadableFile {
                    path: origin.to_path_buf(),
                    error,
                })
            })?;
            self.tracker
                .process_line(line.trim_end())
                .map_err(|source| tracker_error(origin, index + 1, source))?;
            self.lines_processed += 1;
        }
        Ok(())
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// Configured bounds, missing ones taken from the first and last log day.
    fn resolve_range(&self, logs: &[LogFile]) -> Option<DateRange> {
        let start = self.config.start_date.or(logs.first().map(|log| log.day))?;
        let end = self.config.end_date.or(logs.last().map(|log| log.day))?;
        Some(DateRange::new(start, end))
    }

    fn summary(&self, files_processed: usize, range: Option<DateRange>) -> AnalysisSummary {
        AnalysisSummary {
            files_processed,
            lines_processed: self.lines_processed,
            players: self.tracker.players().len(),
            unmatched_leaves: self.tracker.unmatched_leaves().len(),
            still_online: self.tracker.online_players(),
            range,
        }
    }
}

fn tracker_error(origin: &Path, line_number: usize, source: TrackerError) -> AnalysisError {
    error!("{}:{}: {}", origin.display(), line_number, source);
    AnalysisError::Tracker {
        file: origin.to_path_buf(),
        line_number,
        source,
    }
}
