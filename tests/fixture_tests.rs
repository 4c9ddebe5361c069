//! Fixture loading against a migrated in-memory store.

use examprep_store::adapter::outbound::sqlite::FixtureSet;
use examprep_store::application::PersistenceManager;
use examprep_store::domain::{Choice, QuestionContent};
use examprep_store::error::Error;
use examprep_store::port::StoreConnection;

async fn migrated() -> PersistenceManager {
    let manager = PersistenceManager::in_memory();
    manager.initialize().await.expect("initialize in-memory store");
    manager
}

fn count(manager: &PersistenceManager, sql: &str, id: &str) -> i64 {
    manager
        .connection()
        .expect("live connection")
        .query_count(sql, &[id.into()])
        .expect("count query")
}

#[tokio::test]
async fn loading_twice_keeps_one_row_per_key() {
    let manager = migrated().await;
    manager.load_fixtures().await.unwrap();
    manager.load_fixtures().await.unwrap();

    let checks = [
        ("SELECT COUNT(*) AS value FROM exams WHERE id = ?", "cbap"),
        ("SELECT COUNT(*) AS value FROM topics WHERE id = ?", "cbap-planning"),
        ("SELECT COUNT(*) AS value FROM questions WHERE id = ?", "cbap-q-0001"),
        ("SELECT COUNT(*) AS value FROM content_packs WHERE id = ?", "cbap-core"),
    ];
    for (sql, id) in checks {
        assert_eq!(count(&manager, sql, id), 1, "{sql} for {id}");
    }
}

#[tokio::test]
async fn reload_keeps_latest_values() {
    let manager = migrated().await;
    manager.load_fixtures().await.unwrap();

    let mut updated = FixtureSet::cbap();
    updated.exam.name = "CBAP (2025 refresh)".into();
    updated.content_pack.version = "1.1.0".into();
    manager.load_fixture_set(&updated).await.unwrap();

    let mut conn = manager.connection().unwrap();
    let names = conn
        .query_text("SELECT name AS value FROM exams WHERE id = ?", &["cbap".into()])
        .unwrap();
    assert_eq!(names, vec!["CBAP (2025 refresh)".to_string()]);

    let versions = conn
        .query_text(
            "SELECT version AS value FROM content_packs WHERE id = ?",
            &["cbap-core".into()],
        )
        .unwrap();
    assert_eq!(versions, vec!["1.1.0".to_string()]);
}

#[tokio::test]
async fn stored_question_content_round_trips() {
    let manager = migrated().await;
    manager.load_fixtures().await.unwrap();

    let raw = manager
        .connection()
        .unwrap()
        .query_text(
            "SELECT content AS value FROM questions WHERE id = ?",
            &["cbap-q-0001".into()],
        )
        .unwrap()
        .pop()
        .expect("fixture question stored");

    let content = QuestionContent::from_json(&raw).unwrap();
    assert_eq!(
        content.stem,
        "Which activity is part of Business Analysis Planning?"
    );
    let ids: Vec<_> = content.choices.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "C", "D"]);
    let flagged: Vec<&Choice> = content.correct_choices().collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].id, "A");
    assert_eq!(content.correct, vec!["A".to_string()]);
    assert!(content.shuffle_choices);
    assert_eq!(content, FixtureSet::cbap().question.content);

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["shuffleChoices"], serde_json::Value::Bool(true));
    assert_eq!(value["choices"][0]["isCorrect"], serde_json::Value::Bool(true));
}

#[tokio::test]
async fn fixture_failure_surfaces_engine_error() {
    let manager = migrated().await;

    let mut broken = FixtureSet::cbap();
    broken.topic.exam_id = "ghost".into();

    let err = manager.load_fixture_set(&broken).await.unwrap_err();
    assert!(matches!(err, Error::Database(_)), "got {err:?}");
}

#[tokio::test]
async fn fixtures_require_initialization() {
    let manager = PersistenceManager::in_memory();
    assert!(matches!(
        manager.load_fixtures().await,
        Err(Error::NotInitialized)
    ));
}
