//! Integration tests for loading sketch configs from disk.

use std::io::Write;

use sketchbook::kinema::{BodyOptions, DEFAULT_FREQUENCY, DEFAULT_HALF_LIFE, Vec2};
use sketchbook::{Error, SketchConfig};
use tempfile::{NamedTempFile, TempDir};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_fixture() {
    let config = SketchConfig::load("tests/fixtures/springs.toml").unwrap();
    assert_eq!(config.name.as_deref(), Some("malcolm-2"));
    assert_eq!(config.springs.len(), 3);

    let rotation = config.spring("rotation").unwrap();
    assert_eq!(rotation.wrap(), Some(360.0));
    assert_eq!(rotation.settings().half_life(), 0.805);
}

#[test]
fn test_load_temp_file() {
    let file = write_config(
        r#"
[clock]
max_dt = 0.05

[springs.opacity]
position = 0.0
target = 1.0
"#,
    );
    let config = SketchConfig::load(file.path()).unwrap();
    assert_eq!(config.clock.max_dt, 0.05);

    let opacity = config.spring("opacity").unwrap();
    assert_eq!(opacity.target, 1.0);
    assert_eq!(opacity.settings().frequency(), DEFAULT_FREQUENCY);
    assert_eq!(opacity.settings().half_life(), DEFAULT_HALF_LIFE);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = SketchConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(SketchConfig::load(dir.path()), Err(Error::Io(_))));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_invalid_fixture() {
    let err = SketchConfig::load("tests/fixtures/invalid.toml").unwrap_err();
    match err {
        Error::InvalidConfig { field, reason } => {
            assert_eq!(field, "springs.wobble.frequency");
            assert!(reason.contains("positive"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_fixture() {
    let err = SketchConfig::load("tests/fixtures/malformed.toml").unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let file = write_config("[springs.a]\nfrequency = \"fast\"\n");
    assert!(matches!(SketchConfig::load(file.path()), Err(Error::Toml(_))));
}

#[test]
fn test_nan_is_rejected() {
    let file = write_config("[springs.a]\nposition = nan\n");
    let err = SketchConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("springs.a.position"));
}

#[test]
fn test_infinite_wrap_is_rejected() {
    let file = write_config("[springs.a]\nwrap = inf\n");
    let err = SketchConfig::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("springs.a.wrap"));
}

// =============================================================================
// Built Objects
// =============================================================================

#[test]
fn test_physics_world_from_fixture() {
    let config = SketchConfig::load("tests/fixtures/springs.toml").unwrap();
    let mut world = config.physics.unwrap().build();

    let ball = world.create_body(BodyOptions::new(Vec2::new(100.0, 1000.0), 20.0));
    for _ in 0..600 {
        world.update(1.0 / 60.0);
    }

    let body = world.body(ball).unwrap();
    assert!(body.position.y <= 1080.0 - 20.0 + 1e-9);
    assert!(body.position.y > 1000.0);
}

#[test]
fn test_springs_from_fixture_home_in() {
    let config = SketchConfig::load("tests/fixtures/springs.toml").unwrap();
    let mut springs = config.springs();
    for _ in 0..1200 {
        for spring in springs.values_mut() {
            spring.step(1.0 / 60.0);
        }
    }
    assert!(springs["y"].position.abs() < 1e-6);
    assert!((springs["scale"].position - 1.0).abs() < 1e-6);
    assert!(springs.values().all(|spring| spring.is_settled(1e-3)));
}
