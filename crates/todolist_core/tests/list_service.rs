use rusqlite::Connection;
use todolist_core::db::open_db_in_memory;
use todolist_core::{
    ItemPatch, ItemStatus, ListPatch, ListService, RepoError, ScanListRepository,
    SqliteRecordStore,
};

fn service(conn: &Connection) -> ListService<ScanListRepository<SqliteRecordStore<'_>>> {
    ListService::new(ScanListRepository::new(
        SqliteRecordStore::try_new(conn).unwrap(),
    ))
}

#[test]
fn service_trims_ids_and_names() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.create_list(" L1 ", " Groceries ", None).unwrap();
    assert_eq!(created.id, "L1");
    assert_eq!(created.name, "Groceries");

    let added = service.add_item("L1 ", " I1", " Milk ").unwrap();
    assert_eq!(added.item_id, "I1");
    assert_eq!(added.name, "Milk");

    let patch = ItemPatch {
        name: Some("  Oat milk ".to_string()),
        status: None,
    };
    let updated = service.update_item(" L1", "I1 ", &patch).unwrap();
    assert_eq!(updated.name, "Oat milk");

    let deleted = service.delete_item(" L1 ", " I1 ").unwrap();
    assert_eq!(deleted.item_id, "I1");
}

#[test]
fn whitespace_only_rename_name_leaves_name_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service.create_list("L1", "Groceries", None).unwrap();

    let patch = ListPatch {
        name: Some("   ".to_string()),
        description: None,
    };
    let lists = service.rename_list("L1", &patch).unwrap();
    assert_eq!(lists[0].name, "Groceries");
}

#[test]
fn service_passes_not_found_through_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let patch = ItemPatch {
        name: Some("x".to_string()),
        status: None,
    };
    let err = service.update_item("nope", "I1", &patch).unwrap_err();
    assert!(matches!(err, RepoError::ListNotFound(_)));
    assert_eq!(err.to_string(), "List not found");

    let err = service.delete_item("nope", "I1").unwrap_err();
    assert!(matches!(err, RepoError::ListNotFound(_)));
}

#[test]
fn service_lifecycle_walks_status_through_all_states() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    service
        .create_list("L1", "Release", Some("v0.1"))
        .unwrap();
    service.add_item("L1", "I1", "Tag build").unwrap();

    for status in [ItemStatus::InProgress, ItemStatus::Done] {
        let patch = ItemPatch {
            name: None,
            status: Some(status),
        };
        service.update_item("L1", "I1", &patch).unwrap();
    }

    let lists = service.list_all().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].description.as_deref(), Some("v0.1"));
    assert_eq!(lists[0].items()[0].status, ItemStatus::Done);
}
