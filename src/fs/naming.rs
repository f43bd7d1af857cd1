//! Path component sanitization and display truncation.

/// Characters that may not appear in a path component.
pub const RESERVED_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Maximum length (in characters) of a per-post directory name.
pub const MAX_SUBJECT_DIR_LEN: usize = 50;

/// Maximum length (in characters) of a subject shown in progress text.
pub const MAX_DISPLAY_SUBJECT_LEN: usize = 30;

/// Replace every reserved character with `_`, leaving everything else untouched.
pub fn sanitize_component(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Folder used when a post subject has no usable name.
pub const FALLBACK_SUBJECT_DIR: &str = "untitled";

/// Folder used when a display name has no usable name.
pub const FALLBACK_USER_DIR: &str = "unknown";

/// Whether a component would resolve to the current or parent directory.
fn is_dot_or_blank(name: &str) -> bool {
    name.trim().is_empty() || name.chars().all(|c| c == '.')
}

/// Sanitize a component and replace empty, `.` or `..` results with `fallback`.
pub fn safe_component(name: &str, fallback: &str) -> String {
    let name = sanitize_component(name);
    if is_dot_or_blank(&name) {
        fallback.to_string()
    } else {
        name
    }
}

/// Directory name for a post subject: sanitized, then capped.
pub fn subject_dir_name(subject: &str) -> String {
    let capped: String = subject.chars().take(MAX_SUBJECT_DIR_LEN).collect();
    safe_component(&capped, FALLBACK_SUBJECT_DIR)
}

/// Directory name for an account's display name.
pub fn user_dir_name(display_name: &str) -> String {
    safe_component(display_name, FALLBACK_USER_DIR)
}

/// Subject shortened for progress text.
pub fn display_subject(subject: &str) -> String {
    if subject.chars().count() > MAX_DISPLAY_SUBJECT_LEN {
        let head: String = subject.chars().take(MAX_DISPLAY_SUBJECT_LEN).collect();
        format!("{}...", head)
    } else {
        subject.to_string()
    }
}
