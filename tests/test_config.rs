use std::path::PathBuf;
use std::time::Duration;

use balloon_pop::entities::Bounds;
use balloon_pop::{Config, ConfigError};
use clap::Parser;

#[test]
fn defaults_describe_350x600_window() {
    let c = Config::try_parse_from(["balloon_pop"]).unwrap();
    assert_eq!(c.fps, 60);
    assert_eq!(c.bounds(), Bounds { width: 350, height: 600 });
    assert_eq!(c.assets, None);
    assert_eq!(c.seed, None);
    assert_eq!(c.log_file, PathBuf::from("balloon_pop.log"));
    assert!(c.validate().is_ok());
}

#[test]
fn flags_override_defaults() {
    let c = Config::try_parse_from([
        "balloon_pop",
        "--fps",
        "30",
        "--width",
        "420",
        "--height",
        "660",
        "--seed",
        "99",
        "--assets",
        "my_sprites.toml",
    ])
    .unwrap();
    assert_eq!(c.fps, 30);
    assert_eq!(c.bounds(), Bounds { width: 420, height: 660 });
    assert_eq!(c.seed, Some(99));
    assert_eq!(c.assets, Some(PathBuf::from("my_sprites.toml")));
}

#[test]
fn frame_budget_from_fps() {
    let c = Config::try_parse_from(["balloon_pop", "--fps", "50"]).unwrap();
    assert_eq!(c.frame_budget(), Duration::from_millis(20));
}

#[test]
fn zero_fps_rejected() {
    assert!(Config::try_parse_from(["balloon_pop", "--fps", "0"]).is_err());
}

#[test]
fn tiny_window_rejected() {
    let c = Config::try_parse_from(["balloon_pop", "--width", "40"]).unwrap();
    assert!(matches!(
        c.validate(),
        Err(ConfigError::WindowTooSmall { width: 40, .. })
    ));
}
