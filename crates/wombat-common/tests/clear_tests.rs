//! `clear_warnings` resets global state, so it gets its own test binary.

use wombat_common::warning::{clear_warnings, has_warned, warn_once};

#[test]
fn test_clear_allows_warning_again() {
    warn_once("Selectors", "vendor pseudo");
    assert!(has_warned("Selectors", "vendor pseudo"));
    clear_warnings();
    assert!(!has_warned("Selectors", "vendor pseudo"));
    warn_once("Selectors", "vendor pseudo");
    assert!(has_warned("Selectors", "vendor pseudo"));
}
