use std::io::Write;
use std::time::Duration;

use cerebra_core::session::SessionState;
use cerebra_server::config::{LogFormat, ServerConfig, load_config_from, parse_config};
use cerebra_server::sessions::SessionStore;

#[test]
fn defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.bind_addr, "127.0.0.1:8501");
    assert_eq!(config.log_format, LogFormat::Pretty);
    assert_eq!(config.session_ttl_secs, 3600);
    assert!(!config.secure_cookies);
}

#[test]
fn unversioned_config_is_migrated() {
    let config = parse_config(r#"{ "bind_addr": "0.0.0.0:9000" }"#).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.bind_addr, "0.0.0.0:9000");
    assert_eq!(config.session_ttl_secs, 86_400);
}

#[test]
fn current_config_keeps_defaults_for_missing_fields() {
    let config = parse_config(r#"{ "config_version": 1, "log_format": "json" }"#).unwrap();
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.session_ttl_secs, 3600);
}

#[test]
fn newer_config_is_rejected() {
    let err = parse_config(r#"{ "config_version": 7 }"#).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn non_object_config_is_rejected() {
    assert!(parse_config("[1, 2]").is_err());
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "config_version": 1, "secure_cookies": true }"#)
        .unwrap();

    let config = load_config_from(file.path()).unwrap();
    assert!(config.secure_cookies);
}

#[tokio::test]
async fn expired_sessions_are_evicted() {
    let store = SessionStore::new(Duration::ZERO, false);
    let id = uuid_for_test();
    let state = SessionState::new().analyze_symptoms("headache").unwrap();

    store_state(&store, id, state).await;
    assert!(!store.snapshot(id).await.analysis_done());
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn live_sessions_are_kept() {
    let store = SessionStore::new(Duration::from_secs(60), false);
    let id = uuid_for_test();
    let state = SessionState::new().analyze_symptoms("headache").unwrap();

    store_state(&store, id, state).await;
    assert!(store.snapshot(id).await.analysis_done());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn reading_keeps_a_session_alive() {
    let store = SessionStore::new(Duration::from_millis(300), false);
    let id = uuid_for_test();
    let state = SessionState::new().analyze_symptoms("headache").unwrap();
    store_state(&store, id, state).await;

    // Only reads from here on, spanning well over one TTL.
    for _ in 0..6 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(store.snapshot(id).await.analysis_done());
    }

    // An idle session still expires.
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!store.snapshot(id).await.analysis_done());
}

#[tokio::test]
async fn refused_update_keeps_stored_state() {
    let store = SessionStore::new(Duration::from_secs(60), false);
    let id = uuid_for_test();
    let state = SessionState::new().analyze_symptoms("headache").unwrap();
    store_state(&store, id, state).await;

    let result = store
        .update(id, |_| Err::<(SessionState, ()), _>("refused"))
        .await;
    assert_eq!(result, Err("refused"));
    assert!(store.snapshot(id).await.analysis_done());
}

async fn store_state(store: &SessionStore, id: uuid::Uuid, state: SessionState) {
    store
        .update(id, move |_| Ok::<_, ()>((state, ())))
        .await
        .unwrap();
}

fn uuid_for_test() -> uuid::Uuid {
    let (_, id) = SessionStore::new(Duration::from_secs(1), false)
        .identify(axum_extra::extract::cookie::CookieJar::new());
    id
}
