use std::sync::Arc;

use shortit_core::{ShortCode, StorageError};
use shortit_storage::{
    InsertOutcome, ReadRepository, Repository, SqliteRepository, SqliteSettings,
};
use shortit_test_infra::sqlite::{SqliteConfig, SqliteDatabase};

struct Fixture {
    db: SqliteDatabase,
    repo: SqliteRepository,
}

impl Fixture {
    async fn start() -> Self {
        let db = SqliteDatabase::new(SqliteConfig::builder().build()).expect("temp database");
        let repo = open(&db).await;
        Self { db, repo }
    }
}

async fn open(db: &SqliteDatabase) -> SqliteRepository {
    let settings = SqliteSettings::builder().path(db.path()).build();
    SqliteRepository::connect(&settings)
        .await
        .expect("open sqlite repository")
}

fn code(value: &str) -> ShortCode {
    ShortCode::new(value)
}

#[tokio::test]
async fn connect_creates_database_file() {
    let fixture = Fixture::start().await;
    assert!(fixture.db.path().exists());
}

#[tokio::test]
async fn insert_and_find_both_ways() {
    let fixture = Fixture::start().await;

    let outcome = fixture
        .repo
        .try_insert("https://example.com", &code("abc123"))
        .await
        .unwrap();
    assert!(matches!(outcome, InsertOutcome::Inserted(ref m) if m.id == 1));

    let url = fixture.repo.find_by_code(&code("abc123")).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com"));

    let found = fixture
        .repo
        .find_by_original("https://example.com")
        .await
        .unwrap();
    assert_eq!(found, Some(code("abc123")));
}

#[tokio::test]
async fn unknown_code_is_none() {
    let fixture = Fixture::start().await;

    assert!(fixture
        .repo
        .find_by_code(&code("missing"))
        .await
        .unwrap()
        .is_none());
    assert!(fixture
        .repo
        .find_by_original("https://missing.example")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn insert_conflicts_when_code_already_exists() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .try_insert("https://one.example", &code("abc123"))
        .await
        .unwrap();

    let outcome = fixture
        .repo
        .try_insert("https://two.example", &code("abc123"))
        .await
        .unwrap();

    assert_eq!(outcome, InsertOutcome::Conflict);
    let url = fixture.repo.find_by_code(&code("abc123")).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://one.example"));
}

#[tokio::test]
async fn insert_conflicts_when_url_already_mapped() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .try_insert("https://example.com", &code("first"))
        .await
        .unwrap();

    let outcome = fixture
        .repo
        .try_insert("https://example.com", &code("second"))
        .await
        .unwrap();

    assert_eq!(outcome, InsertOutcome::Conflict);
    assert_eq!(fixture.repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_all_follows_creation_order() {
    let fixture = Fixture::start().await;

    for (url, c) in [
        ("https://c.example", "ccc"),
        ("https://a.example", "aaa"),
        ("https://b.example", "bbb"),
    ] {
        fixture.repo.try_insert(url, &code(c)).await.unwrap();
    }

    let all = fixture.repo.list_all().await.unwrap();
    let codes: Vec<_> = all.iter().map(|m| m.short_code.as_str()).collect();
    assert_eq!(codes, ["ccc", "aaa", "bbb"]);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn ids_are_not_reused_after_a_conflict() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .try_insert("https://one.example", &code("aaa"))
        .await
        .unwrap();
    fixture
        .repo
        .try_insert("https://two.example", &code("aaa"))
        .await
        .unwrap();
    let outcome = fixture
        .repo
        .try_insert("https://three.example", &code("bbb"))
        .await
        .unwrap();

    let InsertOutcome::Inserted(mapping) = outcome else {
        panic!("expected insert");
    };
    assert!(mapping.id > 1);
}

#[tokio::test]
async fn mappings_survive_reopen() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .try_insert("https://example.com", &code("keep"))
        .await
        .unwrap();
    fixture.repo.close().await;

    let reopened = open(&fixture.db).await;
    let url = reopened.find_by_code(&code("keep")).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com"));
    assert_eq!(reopened.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_inserts_of_one_code_admit_a_single_winner() {
    let fixture = Fixture::start().await;
    let repo = Arc::new(fixture.repo.clone());
    let mut handles = vec![];

    for i in 0..8 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.try_insert(&format!("https://example{i}.com"), &ShortCode::new("same"))
                .await
                .unwrap()
        }));
    }

    let mut inserted = 0;
    for handle in handles {
        if matches!(handle.await.unwrap(), InsertOutcome::Inserted(_)) {
            inserted += 1;
        }
    }

    assert_eq!(inserted, 1);
    assert_eq!(fixture.repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn closed_pool_reports_unavailable() {
    let fixture = Fixture::start().await;
    fixture.repo.close().await;

    assert!(matches!(
        fixture.repo.find_by_code(&code("abc123")).await,
        Err(StorageError::Unavailable(_))
    ));
    assert!(matches!(
        fixture.repo.find_by_original("https://example.com").await,
        Err(StorageError::Unavailable(_))
    ));
    assert!(matches!(
        fixture.repo.try_insert("https://example.com", &code("abc123")).await,
        Err(StorageError::Unavailable(_))
    ));
    assert!(matches!(
        fixture.repo.list_all().await,
        Err(StorageError::Unavailable(_))
    ));
}
