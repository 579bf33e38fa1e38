use std::io::Write;

use lantern_shooter::compute::init_state;
use lantern_shooter::config::{ConfigError, Tuning};

#[test]
fn load_reads_overrides_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "width = 640.0").unwrap();
    writeln!(file, "height = 480.0").unwrap();
    writeln!(file, "first_boss_milestone = 3").unwrap();

    let tuning = Tuning::load(file.path()).unwrap();
    assert_eq!(tuning.width, 640.0);
    assert_eq!(tuning.height, 480.0);
    assert_eq!(tuning.first_boss_milestone, 3);
    assert_eq!(tuning.kill_xp, Tuning::default().kill_xp);

    let state = init_state(tuning);
    assert_eq!(state.next_boss_milestone, 3);
    assert_eq!(state.player.bounds.center_x(), 320.0);
    assert_eq!(state.player.bounds.center_y(), 380.0);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Tuning::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "enemy_speed_min = 5.0").unwrap();
    writeln!(file, "enemy_speed_max = 1.0").unwrap();

    let err = Tuning::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "enemy_speed_min",
            ..
        }
    ));
}

#[test]
fn default_tuning_round_trips_through_toml() {
    let text = toml::to_string(&Tuning::default()).unwrap();
    assert_eq!(Tuning::from_toml_str(&text).unwrap(), Tuning::default());
}

#[test]
fn nan_speed_is_rejected() {
    let err = Tuning::from_toml_str("enemy_speed_min = nan\nenemy_spawn_chance = 1.0\n")
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "enemy_speed_min",
            ..
        }
    ));
}

#[test]
fn infinite_values_are_rejected() {
    let err = Tuning::from_toml_str("boss_speed = inf\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "boss_speed", .. }));

    let err = Tuning::from_toml_str("height = -inf\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "height", .. }));
}

#[test]
fn speeds_and_damages_must_be_positive() {
    let err = Tuning::from_toml_str("bullet_speed = 0.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "bullet_speed", .. }));

    let err = Tuning::from_toml_str("hit_damage = -5.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "hit_damage", .. }));

    let err = Tuning::from_toml_str("laser_damage = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "laser_damage", .. }));
}
