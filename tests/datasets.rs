// Invariants for the compiled-in role list cycled by the typing effect.

use std::collections::HashSet;

use portfolio_interactions::config::{DEFAULT_ROLES, TypingConfig};

#[test]
fn default_roles_are_unique_and_trimmed() {
    assert!(!DEFAULT_ROLES.is_empty());
    let mut seen = HashSet::new();
    for role in DEFAULT_ROLES {
        assert!(seen.insert(*role), "duplicate role '{}'", role);
        assert!(!role.is_empty());
        assert_eq!(role.trim(), *role, "role '{}' has surrounding whitespace", role);
    }
}

#[test]
fn typing_config_uses_default_roles_in_order() {
    let cfg = TypingConfig::default();
    let roles: Vec<&str> = cfg.phrases.iter().map(String::as_str).collect();
    assert_eq!(roles, DEFAULT_ROLES);
}

#[test]
fn typing_timings_are_ordered() {
    let cfg = TypingConfig::default();
    // deleting is faster than typing, and both are shorter than the pauses
    assert!(cfg.delete_ms < cfg.type_ms);
    assert!(cfg.type_ms < cfg.gap_ms);
    assert!(cfg.gap_ms < cfg.hold_ms);
}
