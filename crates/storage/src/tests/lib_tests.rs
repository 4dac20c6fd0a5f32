use super::*;

fn request(name: &str, model_type: ModelType) -> CreateModelRequest {
    CreateModelRequest {
        name: name.to_string(),
        description: format!("{name} description"),
        model_type,
        github_link: format!("https://github.com/example/{name}"),
        article_link: None,
        submitter_linkedin: "https://linkedin.com/in/example".to_string(),
    }
}

#[tokio::test]
async fn inserts_and_lists_models_in_insertion_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let first = storage
        .insert_model(&request("bert", ModelType::Nlp))
        .await
        .expect("insert");
    let second = storage
        .insert_model(&request("yolo", ModelType::ComputerVision))
        .await
        .expect("insert");
    assert!(second.0 > first.0);

    let models = storage.list_models().await.expect("list");
    let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["bert", "yolo"]);
    assert_eq!(models[1].model_type, ModelType::ComputerVision);
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn filters_models_by_type() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage
        .insert_model(&request("bert", ModelType::Nlp))
        .await
        .expect("insert");
    storage
        .insert_model(&request("xgboost", ModelType::TabularData))
        .await
        .expect("insert");
    storage
        .insert_model(&request("gpt", ModelType::Nlp))
        .await
        .expect("insert");

    let nlp = storage
        .list_models_by_type(ModelType::Nlp)
        .await
        .expect("list");
    assert_eq!(nlp.len(), 2);
    assert!(nlp.iter().all(|m| m.model_type == ModelType::Nlp));

    let speech = storage
        .list_models_by_type(ModelType::SpeechRecognition)
        .await
        .expect("list");
    assert!(speech.is_empty());
}

#[tokio::test]
async fn keeps_optional_article_link() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let mut with_article = request("whisper", ModelType::SpeechRecognition);
    with_article.article_link = Some("https://arxiv.org/abs/2212.04356".to_string());
    let with_id = storage.insert_model(&with_article).await.expect("insert");
    let without_id = storage
        .insert_model(&request("other", ModelType::Other))
        .await
        .expect("insert");

    let with = storage.load_model(with_id).await.expect("load").expect("row");
    assert_eq!(
        with.article_link.as_deref(),
        Some("https://arxiv.org/abs/2212.04356")
    );
    let without = storage
        .load_model(without_id)
        .await
        .expect("load")
        .expect("row");
    assert_eq!(without.article_link, None);
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let id = storage
        .insert_model(&request("bert", ModelType::Nlp))
        .await
        .expect("insert");

    assert!(storage.delete_model(id).await.expect("delete"));
    assert!(!storage.delete_model(id).await.expect("second delete"));
    assert!(storage.load_model(id).await.expect("load").is_none());
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("catalog.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[test]
fn memory_urls_have_no_filesystem_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/catalog.db?mode=rwc"),
        Some(PathBuf::from("./data/catalog.db"))
    );
}
