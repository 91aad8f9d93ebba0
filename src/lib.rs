pub mod configuration;
pub mod controller;
pub mod error_handling;
pub mod log_parsing;
pub mod log_source;
pub mod report;
pub mod session_tracking;

pub use controller::Controller;
pub use session_tracking::{PlayerStats, SessionTracker};
