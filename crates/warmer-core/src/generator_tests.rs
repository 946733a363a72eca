use super::*;
use crate::prompt::SYSTEM_PROMPT;
use crate::store::MemorySettingsStore;
use crate::test_support::{params, MockClient};
use warmer_protocols::{
    Credential, ErrorKind, Preferences, ProviderError, SettingsPatch, StoreError,
};

async fn store_with(credential: Option<&str>, preferences: Option<Preferences>) -> Arc<MemorySettingsStore> {
    let store = Arc::new(MemorySettingsStore::new());
    let mut patch = SettingsPatch::new();
    if let Some(key) = credential {
        patch = patch.with_credential(Credential::new(key));
    }
    if let Some(prefs) = preferences {
        patch = patch.with_preferences(prefs);
    }
    store.set(patch).await.unwrap();
    store
}

#[tokio::test]
async fn test_generate_success() {
    let store = store_with(Some("sk-test"), Some(Preferences::manual("casual and upbeat"))).await;
    let client = MockClient::replying("Congrats on the launch!");
    let generator = Generator::new(store, client.clone(), params());

    let text = generator.generate("Just shipped a new feature!").await.unwrap();
    assert_eq!(text, "Congrats on the launch!");
    assert_eq!(client.calls(), 1);

    let (credential, request, sent_params) = client.last_call().unwrap();
    assert_eq!(credential, "sk-test");
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert!(request.prompt().unwrap().contains("casual and upbeat"));
    assert_eq!(sent_params.max_tokens, 100);
}

#[tokio::test]
async fn test_missing_tone_makes_no_call() {
    let store = store_with(Some("sk-test"), Some(Preferences::manual(""))).await;
    let client = MockClient::replying("unused");
    let generator = Generator::new(store, client.clone(), params());

    let err = generator.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerationError::Validation(ValidationError::MissingTone)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_no_preferences_is_missing_tone() {
    let store = store_with(Some("sk-test"), None).await;
    let client = MockClient::replying("unused");
    let generator = Generator::new(store, client.clone(), params());

    let err = generator.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerationError::Validation(ValidationError::MissingTone)));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_empty_text_makes_no_call() {
    let store = store_with(Some("sk-test"), Some(Preferences::manual("casual"))).await;
    let client = MockClient::replying("unused");
    let generator = Generator::new(store, client.clone(), params());

    let err = generator.generate("  ").await.unwrap_err();
    assert!(matches!(err, GenerationError::Validation(ValidationError::EmptySourceText)));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_missing_credential_makes_no_call() {
    let store = store_with(None, Some(Preferences::manual("casual"))).await;
    let client = MockClient::replying("unused");
    let generator = Generator::new(store, client.clone(), params());

    let err = generator.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerationError::Validation(ValidationError::MissingCredential)));
    assert_eq!(err.title(), "API Key Missing");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_unauthorized_is_auth_kind() {
    let store = store_with(Some("sk-bad"), Some(Preferences::manual("casual"))).await;
    let client = MockClient::failing(|| {
        ProviderError::AuthenticationFailed("Incorrect API key provided".to_string())
    });
    let generator = Generator::new(store, client.clone(), params());

    let err = generator.generate("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_server_error_is_service_kind() {
    let store = store_with(Some("sk-test"), Some(Preferences::manual("casual"))).await;
    let client = MockClient::failing(|| ProviderError::ApiError {
        status: 500,
        message: "Internal error".to_string(),
    });
    let generator = Generator::new(store, client.clone(), params());

    let err = generator.generate("hello").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_corrupt_store_is_service_kind() {
    let store = Arc::new(
        MemorySettingsStore::new().with_raw(warmer_protocols::SettingKey::Settings, "not json"),
    );
    let client = MockClient::replying("unused");
    let generator = Generator::new(store, client.clone(), params());

    let err = generator.generate("hello").await.unwrap_err();
    assert!(matches!(err, GenerationError::Store(StoreError::Corrupt { .. })));
    assert_eq!(err.kind(), ErrorKind::Service);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_generate_from_snapshot() {
    let store = store_with(Some("sk-test"), Some(Preferences::manual("dry"))).await;
    let client = MockClient::replying("ok");
    let generator = Generator::new(store, client.clone(), params());

    let snapshot = generator.snapshot().await.unwrap();
    assert!(snapshot.credential.is_some());
    let text = generator.generate_from(&snapshot, "hello").await.unwrap();
    assert_eq!(text, "ok");
}
