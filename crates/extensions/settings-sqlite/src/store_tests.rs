use super::*;
use std::sync::Arc;

use warmer_protocols::{Credential, Preferences, StyleAnalysis, ToneMethod};

fn full_patch(key: &str, style: &str) -> SettingsPatch {
    SettingsPatch::new()
        .with_credential(Credential::new(key))
        .with_preferences(Preferences::manual(style))
}

#[tokio::test]
async fn test_store_id() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    assert_eq!(store.id(), "sqlite");
}

#[tokio::test]
async fn test_empty_store() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    let snapshot = store.get(&SettingKey::ALL).await.unwrap();
    assert_eq!(snapshot, SettingsSnapshot::default());
}

#[tokio::test]
async fn test_set_and_get() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    let prefs = Preferences::upload(StyleAnalysis::new("dry wit", vec!["a.txt".into()]))
        .with_emoji(true)
        .with_banned_words("synergy");
    store
        .set(
            SettingsPatch::new()
                .with_credential(Credential::new("sk-test"))
                .with_preferences(prefs.clone()),
        )
        .await
        .unwrap();

    let snapshot = store.get(&SettingKey::ALL).await.unwrap();
    assert_eq!(snapshot.credential.unwrap().expose(), "sk-test");
    let stored = snapshot.preferences.unwrap();
    assert_eq!(stored, prefs);
    assert_eq!(stored.tone_method, ToneMethod::Upload);
}

#[tokio::test]
async fn test_partial_get() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    store.set(full_patch("sk-test", "casual")).await.unwrap();

    let snapshot = store.get(&[SettingKey::Settings]).await.unwrap();
    assert!(snapshot.credential.is_none());
    assert!(snapshot.preferences.is_some());
}

#[tokio::test]
async fn test_last_write_wins() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    store.set(full_patch("sk-one", "first")).await.unwrap();
    store
        .set(SettingsPatch::new().with_preferences(Preferences::manual("second")))
        .await
        .unwrap();

    let snapshot = store.get(&SettingKey::ALL).await.unwrap();
    assert_eq!(snapshot.credential.unwrap().expose(), "sk-one");
    assert_eq!(snapshot.preferences.unwrap().writing_style, "second");
}

#[tokio::test]
async fn test_empty_patch_is_noop() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    store.set(SettingsPatch::new()).await.unwrap();
    assert_eq!(
        store.get(&SettingKey::ALL).await.unwrap(),
        SettingsSnapshot::default()
    );
}

#[tokio::test]
async fn test_remove_both_keys() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    store.set(full_patch("sk-test", "casual")).await.unwrap();
    store.remove(&SettingKey::ALL).await.unwrap();

    let snapshot = store.get(&SettingKey::ALL).await.unwrap();
    assert!(snapshot.credential.is_none());
    assert!(snapshot.preferences.is_none());
}

#[tokio::test]
async fn test_remove_one_key() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    store.set(full_patch("sk-test", "casual")).await.unwrap();
    store.remove(&[SettingKey::ApiKey]).await.unwrap();

    let snapshot = store.get(&SettingKey::ALL).await.unwrap();
    assert!(snapshot.credential.is_none());
    assert!(snapshot.preferences.is_some());
}

#[tokio::test]
async fn test_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.db");

    {
        let store = SqliteSettingsStore::open(&path).await.unwrap();
        store.set(full_patch("sk-durable", "casual")).await.unwrap();
    }

    let store = SqliteSettingsStore::open(&path).await.unwrap();
    let snapshot = store.get(&SettingKey::ALL).await.unwrap();
    assert_eq!(snapshot.credential.unwrap().expose(), "sk-durable");
    assert_eq!(snapshot.preferences.unwrap().writing_style, "casual");
}

#[tokio::test]
async fn test_concurrent_reads_never_see_half_a_write() {
    let store = Arc::new(SqliteSettingsStore::in_memory().await.unwrap());
    store.set(full_patch("sk-0", "style-0")).await.unwrap();

    let writer = {
        let store = store.clone();
        tokio::spawn(async move {
            for i in 1..50 {
                store
                    .set(full_patch(&format!("sk-{i}"), &format!("style-{i}")))
                    .await
                    .unwrap();
            }
        })
    };

    for _ in 0..50 {
        let snapshot = store.get(&SettingKey::ALL).await.unwrap();
        let key = snapshot.credential.unwrap().expose().to_string();
        let style = snapshot.preferences.unwrap().writing_style;
        assert_eq!(key.trim_start_matches("sk-"), style.trim_start_matches("style-"));
    }

    writer.await.unwrap();
}

#[tokio::test]
async fn test_corrupt_value() {
    let store = SqliteSettingsStore::in_memory().await.unwrap();
    store
        .conn
        .call(|conn| {
            conn.execute(
                "INSERT INTO settings (key, value, updated_at) VALUES ('settings', '{oops', 'now')",
                [],
            )?;
            Ok(())
        })
        .await
        .unwrap();

    let err = store.get(&[SettingKey::Settings]).await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}
