use std::io::Write;

use jrmi_config::{ConfigError, HashPolicy, HashSetting, JmxConfig, LoggingConfig};
use jrmi_jmx::constants::{OBJECT_ARRAY_CLASS, OBJECT_NAME_CLASS, OBJECT_NAME_UID};
use jrmi_jmx::{Addressing, InvokeArgs, MarshalledObjectHash};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn empty_file_yields_defaults() {
    let config = JmxConfig::load_from_str("").unwrap();
    assert_eq!(config, JmxConfig::default());
    assert_eq!(config.addressing, Addressing::default());
    assert_eq!(config.logging, LoggingConfig::default());
    assert_eq!(
        MarshalledObjectHash::from(config.marshalled_object_hash),
        MarshalledObjectHash::default()
    );
}

#[test]
fn parses_every_section() {
    let text = r#"
marshalled_object_hash = "content"

[addressing]
object_number = -3
uid_number = 7
uid_time = 1700000000000
uid_count = -1

[serial_version_uids]
"javax.management.ObjectName" = 5

[logging]
level = "debug"
json = true
"#;
    let config = JmxConfig::load_from_str(text).unwrap();
    assert_eq!(
        config.addressing,
        Addressing {
            object_number: -3,
            uid_number: 7,
            uid_time: 1_700_000_000_000,
            uid_count: -1,
        }
    );
    assert_eq!(
        config.marshalled_object_hash,
        HashSetting::Computed(HashPolicy::Content)
    );
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
    assert!(config.logging.stderr);

    let uids = config.class_uids();
    assert_eq!(uids.get(OBJECT_NAME_CLASS), Ok(5));
    assert!(uids.get(OBJECT_ARRAY_CLASS).is_ok());
}

#[test]
fn integer_hash_is_fixed() {
    let config = JmxConfig::load_from_str("marshalled_object_hash = 42").unwrap();
    assert_eq!(
        MarshalledObjectHash::from(config.marshalled_object_hash),
        MarshalledObjectHash::Fixed(42)
    );
}

#[test]
fn stub_uses_configured_settings() {
    let config = JmxConfig::load_from_str(
        r#"
marshalled_object_hash = 7

[serial_version_uids]
"javax.management.ObjectName" = 9
"#,
    )
    .unwrap();
    let stub = config.stub();
    assert_eq!(stub.marshalled_hash(), MarshalledObjectHash::Fixed(7));
    assert_eq!(stub.uids().get(OBJECT_NAME_CLASS), Ok(9));

    let default_stub = JmxConfig::default().stub();
    assert_eq!(default_stub.uids().get(OBJECT_NAME_CLASS), Ok(OBJECT_NAME_UID));
    assert!(default_stub
        .invoke_args("a:b=c", "m", &InvokeArgs::new())
        .is_ok());
}

#[test]
fn unknown_keys_are_rejected_without_echoing_them() {
    let err = JmxConfig::load_from_str("[addressing]\nsecret_token = 1\n").unwrap_err();
    let ConfigError::Toml(message) = err else {
        panic!("expected a TOML error");
    };
    assert!(message.contains("unknown field"), "{message}");
    assert!(!message.contains("secret_token"), "{message}");
}

#[test]
fn invalid_string_values_are_redacted() {
    let err = JmxConfig::load_from_str("[logging]\njson = \"hunter2\"\n").unwrap_err();
    let message = err.to_string();
    assert!(!message.contains("hunter2"), "{message}");
}

#[test]
fn out_of_range_uid_count_is_rejected() {
    assert!(JmxConfig::load_from_str("[addressing]\nuid_count = 70000\n").is_err());
}

#[test]
fn load_from_path_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[addressing]\nobject_number = 12").unwrap();
    let config = JmxConfig::load_from_path(file.path()).unwrap();
    assert_eq!(config.addressing.object_number, 12);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = JmxConfig::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn discover_prefers_explicit_path_then_directory_file() {
    let dir = tempdir().unwrap();
    assert_eq!(
        JmxConfig::discover(None, dir.path()).unwrap(),
        JmxConfig::default()
    );

    std::fs::write(
        dir.path().join(jrmi_config::CONFIG_FILE_NAME),
        "[addressing]\nuid_number = 3\n",
    )
    .unwrap();
    assert_eq!(
        JmxConfig::discover(None, dir.path())
            .unwrap()
            .addressing
            .uid_number,
        3
    );

    let explicit = dir.path().join("other.toml");
    std::fs::write(&explicit, "[addressing]\nuid_number = 4\n").unwrap();
    assert_eq!(
        JmxConfig::discover(Some(&explicit), dir.path())
            .unwrap()
            .addressing
            .uid_number,
        4
    );
}
