//! Warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer to report input it tolerated instead of rejecting.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// When false, warnings are still recorded but nothing is written to stderr.
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Warn about tolerated input (prints once per unique message).
///
/// Returns `true` if this is the first time the message was seen.
///
/// # Example
/// ```ignore
/// warn_once("Tokenizer", "unterminated tag at byte 12");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let first = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first && ENABLED.load(Ordering::Relaxed) {
        eprintln!("{}", format!("[Arbor {component}] ⚠ {message}").yellow());
    }
    first
}

/// Whether `message` has already been reported for `component`.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call before processing a new input).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Enable or disable printing to stderr. Deduplication state is kept either way.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        set_enabled(false);
        assert!(warn_once("Test", "dedup message"));
        assert!(!warn_once("Test", "dedup message"));
        assert!(has_warned("Test", "dedup message"));
        assert!(!has_warned("Other", "dedup message"));
    }
}
