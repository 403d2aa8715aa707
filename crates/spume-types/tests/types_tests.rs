//! Integration tests for spume-types.

use spume_types::constants::VOLATILE_MASS_SCALE;
use spume_types::{BodyIndex, BodyKind, SpumeError, TickIndex};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn body_index_index() {
    let id = BodyIndex(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn tick_index_advances() {
    let tick = TickIndex::ZERO;
    assert_eq!(tick.next(), TickIndex(1));
    assert_eq!(tick.next().next(), TickIndex(2));
}

#[test]
fn ids_are_serializable() {
    let id = BodyIndex(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: BodyIndex = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Kind Table Tests ─────────────────────────────────────────

#[test]
fn bubble_is_unit_mass() {
    assert_eq!(BodyKind::Bubble.mass_factor(), 1.0);
    assert_eq!(BodyKind::Bubble.inverse_mass(), 1.0);
}

#[test]
fn volatile_is_heavier_than_bubble() {
    assert_eq!(
        BodyKind::Volatile.mass_factor(),
        BodyKind::Bubble.mass_factor() * VOLATILE_MASS_SCALE
    );
}

#[test]
fn obstacle_is_immovable() {
    let traits = BodyKind::Obstacle.traits();
    assert_eq!(traits.mass_factor, 0.0);
    assert!(!traits.relocatable);
    assert_eq!(BodyKind::Obstacle.inverse_mass(), 0.0);
}

#[test]
fn all_kinds_have_positive_radius() {
    for kind in BodyKind::ALL {
        assert!(kind.traits().radius > 0.0, "{} radius", kind.name());
    }
}

#[test]
fn movable_kinds_have_positive_inverse_mass() {
    for kind in BodyKind::ALL {
        let traits = kind.traits();
        if traits.relocatable {
            assert!(kind.inverse_mass() > 0.0, "{}", kind.name());
        } else {
            assert_eq!(kind.inverse_mass(), 0.0, "{}", kind.name());
        }
    }
}

#[test]
fn kind_names_are_unique() {
    let names: Vec<&str> = BodyKind::ALL.iter().map(|k| k.name()).collect();
    let mut deduped = names.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(names.len(), deduped.len());
}

#[test]
fn kinds_are_serializable() {
    let json = serde_json::to_string(&BodyKind::Volatile).unwrap();
    let back: BodyKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, BodyKind::Volatile);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = SpumeError::InvalidBody("radius must be positive, got -3".into());
    assert!(err.to_string().contains("radius must be positive"));
}

#[test]
fn config_error_display() {
    let err = SpumeError::InvalidConfig("max_dt must be finite".into());
    assert!(err.to_string().contains("Invalid configuration"));
}
