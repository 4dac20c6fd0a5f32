use super::*;

use std::collections::HashMap;

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
}

#[test]
fn keeps_memory_and_full_urls_untouched() {
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url("sqlite://./data/test.db?mode=rwc"),
        "sqlite://./data/test.db?mode=rwc"
    );
}

#[test]
fn blank_database_url_falls_back_to_default() {
    assert_eq!(
        normalize_database_url("   "),
        Settings::default().database_url
    );
}

#[test]
fn normalizes_windows_plain_path_separators() {
    assert_eq!(
        normalize_database_url("sqlite:data\\catalog.db"),
        "sqlite://data/catalog.db"
    );
}

#[test]
fn creates_parent_dir_for_sqlite_url() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("data").join("test.db");

    prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare db url");
    assert!(temp_root.path().join("data").exists());
}

#[test]
fn file_overrides_defaults() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let path = temp_root.path().join("server.toml");
    fs::write(
        &path,
        "bind_addr = \"0.0.0.0:9000\"\nmax_body_bytes = 1024\n",
    )
    .expect("write settings");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path);
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.max_body_bytes, 1024);
    assert_eq!(settings.database_url, Settings::default().database_url);
}

#[test]
fn unparseable_file_is_ignored() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let path = temp_root.path().join("server.toml");
    fs::write(&path, "bind_addr = [").expect("write settings");

    let mut settings = Settings::default();
    apply_file(&mut settings, &path);
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_win_and_prefer_prefixed_database_url() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("MODELSBASE_BIND", "127.0.0.1:7000"),
        ("DATABASE_URL", "sqlite://generic.db"),
        ("MODELSBASE_DATABASE_URL", "sqlite://specific.db"),
        ("MODELSBASE_MAX_BODY_BYTES", "not-a-number"),
    ]);

    let mut settings = Settings::default();
    apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string()));
    assert_eq!(settings.server_bind, "127.0.0.1:7000");
    assert_eq!(settings.database_url, "sqlite://specific.db");
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}

#[tokio::test]
async fn prepared_database_url_creates_openable_sqlite_file() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("server.db");

    let prepared = prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare");
    let storage = storage::Storage::new(&prepared).await.expect("open sqlite");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should be created: {}",
        db_path.display()
    );
}
