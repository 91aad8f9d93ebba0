//! Log source subsystem
//!
//! Finds the daily server log files of a directory and opens them as line
//! readers.
//!
//! Components:
//! - `discovery`: lists `YYYY-MM-DD-<n>.log[.gz]` files in processing order.
//! - `reader`: opens plain or gzip-compressed files as buffered readers.

pub mod discovery;
pub mod reader;

pub use discovery::{discover_logs, LogFile};
pub use reader::open_log;
