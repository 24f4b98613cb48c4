use slidebank_core::{
    NewSlide, RepoError, Slide, SlideBackend, SlideListQuery, SqliteSlideBackend,
};
use tempfile::TempDir;
use uuid::Uuid;

fn slide(id: &str, body: &str, created_at: i64) -> Slide {
    Slide::from_input(
        Uuid::parse_str(id).unwrap(),
        created_at,
        NewSlide::new("Subject", body, "Tester"),
    )
}

#[test]
fn construction_performs_no_io() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("slides.sqlite3");

    let _backend = SqliteSlideBackend::new(&db_path);
    assert!(
        !db_path.exists(),
        "database file must not exist before first access"
    );
}

#[test]
fn first_access_creates_and_migrates_the_database() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("slides.sqlite3");

    let backend = SqliteSlideBackend::new(&db_path);
    assert_eq!(backend.count().unwrap(), 0);
    assert!(db_path.exists());
}

#[test]
fn insert_and_fetch_roundtrip() {
    let dir = TempDir::new().unwrap();
    let backend = SqliteSlideBackend::new(dir.path().join("slides.sqlite3"));

    let stored = slide(
        "00000000-0000-4000-8000-000000000001",
        "Hello World",
        1_700_000_000_000,
    );
    backend.insert(&stored).unwrap();

    let fetched = backend.fetch_by_id(stored.id).unwrap().unwrap();
    assert_eq!(fetched, stored);

    let missing = backend
        .fetch_by_id(Uuid::parse_str("00000000-0000-4000-8000-0000000000ff").unwrap())
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn insert_rejects_duplicate_id() {
    let dir = TempDir::new().unwrap();
    let backend = SqliteSlideBackend::new(dir.path().join("slides.sqlite3"));

    let stored = slide("00000000-0000-4000-8000-000000000001", "Hello World", 1);
    backend.insert(&stored).unwrap();

    let err = backend.insert(&stored).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId(id) if id == stored.id));
}

#[test]
fn listing_orders_newest_first_with_id_tiebreak() {
    let dir = TempDir::new().unwrap();
    let backend = SqliteSlideBackend::new(dir.path().join("slides.sqlite3"));

    let oldest = slide("00000000-0000-4000-8000-000000000003", "oldest", 100);
    let tied_a = slide("00000000-0000-4000-8000-000000000001", "tied a", 200);
    let tied_b = slide("00000000-0000-4000-8000-000000000002", "tied b", 200);
    backend.insert(&oldest).unwrap();
    backend.insert(&tied_b).unwrap();
    backend.insert(&tied_a).unwrap();

    let all = backend.list_ordered(&SlideListQuery::all()).unwrap();
    let ids: Vec<_> = all.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![tied_a.id, tied_b.id, oldest.id]);

    let window = backend.list_ordered(&SlideListQuery::window(1, 1)).unwrap();
    assert_eq!(window.len(), 1);
    assert_eq!(window[0].id, tied_b.id);

    let offset_only = backend
        .list_ordered(&SlideListQuery {
            limit: None,
            offset: 2,
        })
        .unwrap();
    assert_eq!(offset_only.len(), 1);
    assert_eq!(offset_only[0].id, oldest.id);
}

#[test]
fn release_then_reuse_reconnects_transparently() {
    let dir = TempDir::new().unwrap();
    let backend = SqliteSlideBackend::new(dir.path().join("slides.sqlite3"));

    let stored = slide("00000000-0000-4000-8000-000000000001", "survives release", 42);
    backend.insert(&stored).unwrap();

    backend.release().unwrap();
    // Releasing an already-released backend is a no-op.
    backend.release().unwrap();

    // The next access re-establishes the connection and sees persisted data.
    assert_eq!(backend.count().unwrap(), 1);
    let fetched = backend.fetch_by_id(stored.id).unwrap().unwrap();
    assert_eq!(fetched.body, "survives release");
}

#[test]
fn data_is_visible_to_a_second_backend_instance() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("slides.sqlite3");

    let writer = SqliteSlideBackend::new(&db_path);
    writer
        .insert(&slide(
            "00000000-0000-4000-8000-000000000001",
            "persisted once",
            7,
        ))
        .unwrap();
    writer.release().unwrap();

    let reader = SqliteSlideBackend::new(&db_path);
    assert_eq!(reader.count().unwrap(), 1);
}

#[test]
fn invalid_persisted_row_is_rejected_on_read() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("slides.sqlite3");

    let backend = SqliteSlideBackend::new(&db_path);
    assert_eq!(backend.count().unwrap(), 0);
    backend.release().unwrap();

    // Corrupt the id column behind the adapter's back.
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute(
        "INSERT INTO slides (id, subject, body, author, created_at)
         VALUES ('not-a-uuid', 's', 'b', 'a', 1);",
        [],
    )
    .unwrap();
    drop(conn);

    let err = backend.list_ordered(&SlideListQuery::all()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
