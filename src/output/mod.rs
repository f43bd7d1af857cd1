//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - A live status line fed by session events
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use self::console::{
    print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
};
pub use progress::{create_spinner, StatusLine};
pub use stats::print_session_stats;
