//! Cafe record store integration tests

use app_lib::app::{
    cafe_create, cafe_delete, cafe_get, cafe_list, cafe_update, CafeFields,
};
use app_lib::domain::Level;
use app_lib::infra::db::{init_db, init_test_db};

// ──────────────────────── Helper ────────────────────────

fn make_fields(name: &str) -> CafeFields {
    CafeFields {
        name: name.to_string(),
        location: format!("https://maps.example.com/{}", name.to_lowercase()),
        rating: Level::Three,
        wifi: Level::Two,
        power: Level::One,
    }
}

// ══════════════════════════════════════════════════════════
//  cafe_create
// ══════════════════════════════════════════════════════════

#[test]
fn create_cafe_stores_symbols() {
    let pool = init_test_db();
    let dto = cafe_create(&pool, make_fields("Lighthaus")).unwrap();
    assert!(dto.id > 0);
    assert_eq!(dto.name, "Lighthaus");
    assert_eq!(dto.location, "https://maps.example.com/lighthaus");
    assert_eq!(dto.rating, "☕☕☕");
    assert_eq!(dto.wifi, "💪💪");
    assert_eq!(dto.power, "🔌");
    assert!(!dto.created_at.is_empty());
    assert_eq!(dto.created_at, dto.updated_at);
}

#[test]
fn create_cafe_appears_in_list_with_identical_fields() {
    let pool = init_test_db();
    let created = cafe_create(&pool, make_fields("Lighthaus")).unwrap();
    let all = cafe_list(&pool).unwrap();
    assert_eq!(all, vec![created]);
}

#[test]
fn create_cafe_duplicate_name_is_conflict() {
    let pool = init_test_db();
    cafe_create(&pool, make_fields("Lighthaus")).unwrap();
    let err = cafe_create(&pool, make_fields("Lighthaus")).unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(cafe_list(&pool).unwrap().len(), 1);
}

#[test]
fn create_cafe_names_are_case_sensitive() {
    let pool = init_test_db();
    cafe_create(&pool, make_fields("Lighthaus")).unwrap();
    assert!(cafe_create(&pool, make_fields("lighthaus")).is_ok());
}

// ══════════════════════════════════════════════════════════
//  cafe_get / cafe_list
// ══════════════════════════════════════════════════════════

#[test]
fn get_cafe_by_id() {
    let pool = init_test_db();
    let created = cafe_create(&pool, make_fields("Esters")).unwrap();
    let fetched = cafe_get(&pool, created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn get_cafe_not_found() {
    let pool = init_test_db();
    let err = cafe_get(&pool, 42).unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn list_cafes_in_insertion_order() {
    let pool = init_test_db();
    for name in ["Zebra", "Alpha", "Mocha"] {
        cafe_create(&pool, make_fields(name)).unwrap();
    }
    let names: Vec<String> = cafe_list(&pool).unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Zebra", "Alpha", "Mocha"]);
}

#[test]
fn list_cafes_empty() {
    let pool = init_test_db();
    assert!(cafe_list(&pool).unwrap().is_empty());
}

// ══════════════════════════════════════════════════════════
//  cafe_update
// ══════════════════════════════════════════════════════════

#[test]
fn update_cafe_overwrites_fields_and_keeps_id() {
    let pool = init_test_db();
    let original = cafe_create(&pool, make_fields("Old Name")).unwrap();
    let other = cafe_create(&pool, make_fields("Untouched")).unwrap();

    let updated = cafe_update(
        &pool,
        original.id,
        CafeFields {
            name: "New Name".into(),
            location: "https://maps.example.com/new".into(),
            rating: Level::Four,
            wifi: Level::None,
            power: Level::Four,
        },
    )
    .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);

    let fetched = cafe_get(&pool, original.id).unwrap();
    assert_eq!(fetched.name, "New Name");
    assert_eq!(fetched.location, "https://maps.example.com/new");
    assert_eq!(fetched.rating, "☕☕☕☕");
    assert_eq!(fetched.wifi, "✘");
    assert_eq!(fetched.power, "🔌🔌🔌🔌");

    assert_eq!(cafe_get(&pool, other.id).unwrap(), other);
}

#[test]
fn update_cafe_not_found_creates_nothing() {
    let pool = init_test_db();
    let err = cafe_update(&pool, 99, make_fields("Ghost")).unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
    assert!(cafe_list(&pool).unwrap().is_empty());
}

#[test]
fn update_cafe_to_existing_name_is_conflict() {
    let pool = init_test_db();
    cafe_create(&pool, make_fields("Taken")).unwrap();
    let mine = cafe_create(&pool, make_fields("Mine")).unwrap();

    let err = cafe_update(&pool, mine.id, make_fields("Taken")).unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(cafe_get(&pool, mine.id).unwrap().name, "Mine");
}

#[test]
fn update_cafe_keeping_own_name_is_allowed() {
    let pool = init_test_db();
    let mine = cafe_create(&pool, make_fields("Mine")).unwrap();
    let mut fields = make_fields("Mine");
    fields.rating = Level::One;
    let updated = cafe_update(&pool, mine.id, fields).unwrap();
    assert_eq!(updated.rating, "☕");
}

// ══════════════════════════════════════════════════════════
//  cafe_delete
// ══════════════════════════════════════════════════════════

#[test]
fn delete_cafe_removes_permanently() {
    let pool = init_test_db();
    let dto = cafe_create(&pool, make_fields("Doomed")).unwrap();
    cafe_delete(&pool, dto.id).unwrap();
    assert_eq!(cafe_get(&pool, dto.id).unwrap_err().code(), "NOT_FOUND");
    assert!(cafe_list(&pool).unwrap().is_empty());
}

#[test]
fn delete_cafe_not_found() {
    let pool = init_test_db();
    let err = cafe_delete(&pool, 7).unwrap_err();
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn delete_cafe_frees_name() {
    let pool = init_test_db();
    let dto = cafe_create(&pool, make_fields("Reborn")).unwrap();
    cafe_delete(&pool, dto.id).unwrap();
    assert!(cafe_create(&pool, make_fields("Reborn")).is_ok());
}

#[test]
fn deleted_ids_are_never_reused() {
    let pool = init_test_db();
    let first = cafe_create(&pool, make_fields("First")).unwrap();
    let last = cafe_create(&pool, make_fields("Last")).unwrap();
    cafe_delete(&pool, last.id).unwrap();
    let next = cafe_create(&pool, make_fields("Next")).unwrap();
    assert!(next.id > last.id);
    assert!(next.id > first.id);
}

// ══════════════════════════════════════════════════════════
//  on-disk store
// ══════════════════════════════════════════════════════════

#[test]
fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cafes.db");

    let removed_id = {
        let pool = init_db(&path).unwrap();
        cafe_create(&pool, make_fields("Kept")).unwrap();
        let gone = cafe_create(&pool, make_fields("Gone")).unwrap();
        cafe_delete(&pool, gone.id).unwrap();
        gone.id
    };

    let pool = init_db(&path).unwrap();
    let all = cafe_list(&pool).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Kept");

    let next = cafe_create(&pool, make_fields("After Reopen")).unwrap();
    assert!(next.id > removed_id);
}
