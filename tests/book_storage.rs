use rolodex::api::RolodexApi;
use rolodex::change::{AddValue, Change, ChangeKind};
use rolodex::error::RolodexError;
use rolodex::search::Query;
use rolodex::store::fs::FsBackend;
use rolodex::store::StorageBackend;

fn api(root: &std::path::Path) -> RolodexApi<FsBackend> {
    RolodexApi::new(FsBackend::new(root), "defaultuser").unwrap()
}

#[test]
fn test_book_survives_a_new_session() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut first = api(temp_dir.path());
    first
        .add_contact("tu2", Some("6847"), Some("nd@sn.v"), Some("12/11"), Some("Baker St 221b"))
        .unwrap();
    first
        .add_contact("tu", Some("684721"), None, None, None)
        .unwrap();
    first
        .edit(Change::new(
            "tu",
            ChangeKind::AddEmail(AddValue::new("ns@i.f")),
        ))
        .unwrap();
    first.store().unwrap();

    let mut second = api(temp_dir.path());
    second.load("defaultuser").unwrap();
    let names: Vec<&str> = second.book().records().map(|r| r.name()).collect();
    assert_eq!(names, vec!["tu2", "tu"]);

    let tu = second.book().get("tu").unwrap();
    assert_eq!(tu.emails().values(), vec!["ns@i.f"]);

    let found = second
        .find(&Query::Address("Baker St 221b".into()), None)
        .unwrap();
    assert_eq!(found.listed.len(), 1);
    assert_eq!(found.listed[0].name(), "tu2");
}

#[test]
fn test_one_blob_per_owner() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut session = api(temp_dir.path());
    session.add_contact("a", Some("111"), None, None, None).unwrap();
    session.store().unwrap();
    session.new_profile(Some("alice")).unwrap();
    session.add_contact("b", Some("222"), None, None, None).unwrap();
    session.store().unwrap();

    assert_eq!(
        session.backend().list_books().unwrap(),
        vec!["alice".to_string(), "defaultuser".to_string()]
    );

    session.load("defaultuser").unwrap();
    assert!(session.book().contains("a"));
    assert!(!session.book().contains("b"));
}

#[test]
fn test_corrupted_blob_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("mallory.bin"), b"not a book").unwrap();

    let mut session = api(temp_dir.path());
    let err = session.load("mallory").unwrap_err();
    assert!(matches!(err, RolodexError::Corrupted(_)));
    assert!(session.book().is_empty());
}

#[test]
fn test_load_or_new_starts_empty() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut session = api(temp_dir.path());

    let result = session.load_or_new("bob").unwrap();
    assert!(result.modified);
    assert_eq!(session.book().owner(), "bob");
    assert!(session.book().is_empty());
    assert!(session.backend().read_blob("bob").unwrap().is_none());
}
