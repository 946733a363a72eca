use super::*;
use crate::store::MemorySettingsStore;
use warmer_protocols::StyleAnalysis;

fn service() -> (SettingsService, Arc<MemorySettingsStore>) {
    let store = Arc::new(MemorySettingsStore::new());
    (SettingsService::new(store.clone()), store)
}

#[tokio::test]
async fn test_save_credential_trims() {
    let (service, store) = service();
    service.save_credential("  sk-test \n").await.unwrap();

    let snapshot = store.get(&[SettingKey::ApiKey]).await.unwrap();
    assert_eq!(snapshot.credential.unwrap().expose(), "sk-test");
}

#[tokio::test]
async fn test_save_blank_credential() {
    let (service, store) = service();
    let err = service.save_credential("   ").await.unwrap_err();
    assert!(matches!(err, GenerationError::Validation(ValidationError::MissingCredential)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_save_preferences_manual_blank_style() {
    let (service, store) = service();
    let err = service
        .save_preferences(Preferences::manual("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Validation(ValidationError::MissingTone)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_save_preferences_upload_without_analysis() {
    let (service, _) = service();
    let mut prefs = Preferences::manual("casual");
    prefs.tone_method = ToneMethod::Upload;
    let err = service.save_preferences(prefs).await.unwrap_err();
    assert!(matches!(err, GenerationError::Validation(ValidationError::MissingTone)));
}

#[tokio::test]
async fn test_save_preferences_round_trip() {
    let (service, _) = service();
    let prefs = Preferences::manual("casual")
        .with_emoji(true)
        .with_banned_words("um, like");
    service.save_preferences(prefs.clone()).await.unwrap();
    assert_eq!(service.preferences().await.unwrap(), prefs);
}

#[tokio::test]
async fn test_set_tone_method_keeps_rest() {
    let (service, _) = service();
    let mut prefs = Preferences::manual("casual").with_emoji(true);
    prefs.style_analysis = Some(StyleAnalysis::new("dry", vec!["a.txt".into()]));
    service.save_preferences(prefs).await.unwrap();

    let updated = service.set_tone_method(ToneMethod::Upload).await.unwrap();
    assert_eq!(updated.tone_method, ToneMethod::Upload);
    assert_eq!(updated.writing_style, "casual");
    assert!(updated.enable_emoji);
    assert_eq!(updated.resolved_style(), Some("dry"));
}

#[tokio::test]
async fn test_remove_source_file() {
    let (service, _) = service();
    let analysis = StyleAnalysis::new("dry", vec!["a.txt".into(), "b.txt".into()]);
    service
        .save_preferences(Preferences::upload(analysis))
        .await
        .unwrap();

    let prefs = service.remove_source_file("a.txt").await.unwrap();
    let analysis = prefs.style_analysis.unwrap();
    assert_eq!(analysis.source_files, vec!["b.txt"]);
    assert_eq!(analysis.analysis, "dry");
}

#[tokio::test]
async fn test_remove_last_source_file_clears_analysis() {
    let (service, _) = service();
    let analysis = StyleAnalysis::new("dry", vec!["a.txt".into()]);
    service
        .save_preferences(Preferences::upload(analysis))
        .await
        .unwrap();

    let prefs = service.remove_source_file("a.txt").await.unwrap();
    assert!(prefs.style_analysis.is_none());
    assert!(!prefs.has_tone());
    assert!(service.preferences().await.unwrap().style_analysis.is_none());
}

#[tokio::test]
async fn test_remove_source_file_without_analysis() {
    let (service, store) = service();
    let prefs = service.remove_source_file("a.txt").await.unwrap();
    assert!(prefs.style_analysis.is_none());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_reset_clears_both_keys() {
    let (service, store) = service();
    service.save_credential("sk-test").await.unwrap();
    service
        .save_preferences(Preferences::manual("casual"))
        .await
        .unwrap();
    assert_eq!(store.len(), 2);

    service.reset().await.unwrap();
    assert!(store.is_empty());
    assert_eq!(service.preferences().await.unwrap(), Preferences::default());
}

#[tokio::test]
async fn test_status_steps() {
    let (service, _) = service();
    let status = service.status().await.unwrap();
    assert!(!status.is_ready());
    assert!(status.next_step().unwrap().contains("API key"));

    service.save_credential("sk-test").await.unwrap();
    let status = service.status().await.unwrap();
    assert!(status.has_credential);
    assert!(status.next_step().unwrap().contains("tone"));

    service
        .save_preferences(Preferences::manual("casual"))
        .await
        .unwrap();
    let status = service.status().await.unwrap();
    assert!(status.is_ready());
    assert!(status.next_step().is_none());
}
