use std::time::Duration;

use combopad::{Settings, WireFormat};

#[test]
fn test_settings_from_toml() {
    let settings: Settings = toml::from_str(
        r#"
        input_duration = 0.1
        minimum_interval = 0.025
        echo_frames = true
        wire_format = "binary"
        "#,
    )
    .unwrap();

    assert_eq!(settings.input_duration, Duration::from_millis(100));
    assert_eq!(settings.minimum_interval, Duration::from_millis(25));
    assert!(settings.echo_frames);
    assert_eq!(settings.wire_format, WireFormat::Binary);
}

#[test]
fn test_missing_keys_use_defaults() {
    let settings: Settings = toml::from_str("echo_frames = true").unwrap();
    assert_eq!(settings, Settings::default().with_echo_frames(true));

    let empty: Settings = toml::from_str("").unwrap();
    assert_eq!(empty, Settings::default());
}

#[test]
fn test_invalid_settings_rejected() {
    assert!(toml::from_str::<Settings>("input_duration = -1.0").is_err());
    assert!(toml::from_str::<Settings>("wire_format = \"morse\"").is_err());
}

#[test]
fn test_settings_round_trip_through_toml() {
    let settings = Settings::default()
        .with_minimum_interval(Duration::from_millis(250))
        .with_wire_format(WireFormat::Binary);
    let text = toml::to_string(&settings).unwrap();
    assert!(text.contains("minimum_interval = 0.25"));
    assert!(text.contains("wire_format = \"binary\""));
    assert_eq!(toml::from_str::<Settings>(&text).unwrap(), settings);
}
