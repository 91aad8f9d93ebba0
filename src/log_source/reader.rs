use super::discovery::LogFile;
use crate::error_handling::types::LogSourceError;
use flate2::read::GzDecoder;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Opens a log file for line reading, decompressing gzipped files on the fly.
pub fn open_log(log_file: &LogFile) -> Result<Box<dyn BufRead>, LogSourceError> {
    let file = File::open(&log_file.path).map_err(|error| LogSourceError::UnreadableFile {
        path: log_file.path.clone(),
        error,
    })?;
    debug!(
        "Opened {} (compressed: {})",
        log_file.path.display(),
        log_file.compressed
    );
    if log_file.compressed {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
