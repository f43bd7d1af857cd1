//! Filesystem module.
//!
//! Provides:
//! - Path component sanitization
//! - Save path layout and directory management

pub mod naming;
pub mod paths;

pub use naming::{
    display_subject, safe_component, sanitize_component, subject_dir_name, user_dir_name,
};
pub use paths::{ensure_dir, get_date_root, get_subject_folder, get_user_folder};
