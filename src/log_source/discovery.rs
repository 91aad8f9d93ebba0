use crate::error_handling::types::LogSourceError;
use chrono::NaiveDate;
use log::{debug, info, warn};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const LOG_FILE_PATTERN: &str = r"^(\d{4}-\d{2}-\d{2})-(\d+)\.log(\.gz)?$";

/// A daily server log file.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFile {
    pub path: PathBuf,
    pub day: NaiveDate,
    /// Sequence number of the file within its day.
    pub index: u32,
    pub compressed: bool,
}

/// Lists the log files of `dir` in processing order.
///
/// Names starting with one of `excluded_prefixes` are skipped, as is anything
/// not shaped like `YYYY-MM-DD-<n>.log` or `YYYY-MM-DD-<n>.log.gz`. When both
/// the plain and the gzipped file exist the plain one is used. The result is
/// sorted by day, then by numeric index.
pub fn discover_logs(
    dir: &Path,
    excluded_prefixes: &[String],
) -> Result<Vec<LogFile>, LogSourceError> {
    if !dir.is_dir() {
        return Err(LogSourceError::DirectoryDoesNotExist(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    let pattern = Regex::new(LOG_FILE_PATTERN)
        .map_err(|e| LogSourceError::InvalidPattern(e.to_string()))?;

    let mut found: BTreeMap<(NaiveDate, u32), LogFile> = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if excluded_prefixes
            .iter()
            .any(|prefix| file_name.starts_with(prefix.as_str()))
        {
            debug!("Skipping excluded file {}", file_name);
            continue;
        }
        let Some(log_file) = parse_log_file(&pattern, &path, file_name) else {
            continue;
        };

        let key = (log_file.day, log_file.index);
        match found.get(&key) {
            Some(existing) if !existing.compressed => {
                debug!("Preferring {} over {}", existing.path.display(), file_name);
            }
            _ => {
                found.insert(key, log_file);
            }
        }
    }

    let logs: Vec<LogFile> = found.into_values().collect();
    info!("Found {} log file(s) in {}", logs.len(), dir.display());
    Ok(logs)
}

fn parse_log_file(pattern: &Regex, path: &Path, file_name: &str) -> Option<LogFile> {
    let Some(captures) = pattern.captures(file_name) else {
        debug!("Ignoring {}, not a daily log file", file_name);
        return None;
    };
    let day = match NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d") {
        Ok(day) => day,
        Err(e) => {
            warn!("Ignoring {}, invalid date: {}", file_name, e);
            return None;
        }
    };
    let index = match captures[2].parse::<u32>() {
        Ok(index) => index,
        Err(e) => {
            warn!("Ignoring {}, invalid index: {}", file_name, e);
            return None;
        }
    };
    Some(LogFile {
        path: path.to_path_buf(),
        day,
        index,
        compressed: captures.get(3).is_some(),
    })
}
