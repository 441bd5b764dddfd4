use super::*;

#[test]
fn defaults_serve_the_kiosk_lookup_port() {
    let settings = settings_from(&HashMap::new(), |_| None);
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert_eq!(settings.database_url, "sqlite://./data/prescriptions.db");
    assert!(settings.seed_file.is_none());
}

#[test]
fn env_overrides_file_values() {
    let file_cfg = HashMap::from([
        ("bind_addr".to_string(), "0.0.0.0:7000".to_string()),
        ("seed_file".to_string(), "seed.json".to_string()),
    ]);
    let settings = settings_from(&file_cfg, |key| {
        (key == "APP__BIND_ADDR").then(|| "0.0.0.0:9000".to_string())
    });
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.seed_file, Some(PathBuf::from("seed.json")));
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
}

#[test]
fn keeps_windows_absolute_path_with_single_sqlite_colon() {
    assert_eq!(
        normalize_database_url("sqlite:C:\\Users\\kiosk\\test.db"),
        "sqlite:C:/Users/kiosk/test.db"
    );
}

#[test]
fn blank_url_falls_back_to_default() {
    assert_eq!(
        normalize_database_url("   "),
        "sqlite://./data/prescriptions.db"
    );
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
}
