use tend_core::{
    db::migrations::SCHEMA_VERSION,
    params::{NewRoutine, NewStep},
    Category, Database, MusicPlatform, TendError,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn params(id: &str, steps: &[(&str, u32)]) -> NewRoutine {
    NewRoutine {
        id: Some(id.to_string()),
        title: format!("Routine {id}"),
        description: None,
        category: Category::Evening,
        steps: steps
            .iter()
            .map(|(step_id, duration)| NewStep {
                id: Some((*step_id).to_string()),
                ..NewStep::new(format!("Step {step_id}"), *duration)
            })
            .collect(),
    }
}

#[test]
fn test_database_initialization_sets_schema_version() {
    let (temp_file, db) = create_test_db();
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);

    // Reopening an initialized database is a no-op
    drop(db);
    let db = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn test_database_from_newer_schema_is_refused() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    {
        let conn = rusqlite::Connection::open(temp_file.path()).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION + 1))
            .unwrap();
    }

    match Database::new(temp_file.path()) {
        Err(TendError::Configuration { message }) => assert!(message.contains("newer")),
        Err(other) => panic!("Expected Configuration error, got: {other:?}"),
        Ok(_) => panic!("Expected a newer schema to be refused"),
    }
}

#[test]
fn test_schema_rejects_step_longer_than_a_day() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.insert_routine(params("r1", &[("a", 1441)]));
    assert!(matches!(result, Err(TendError::Database { .. })), "{result:?}");
    assert!(db.get_routine("r1").unwrap().is_none());
}

#[test]
fn test_insert_and_get_routine() {
    let (_temp_file, mut db) = create_test_db();

    let mut new = params("r1", &[("a", 5), ("b", 10)]);
    new.steps[1] = new.steps[1]
        .clone()
        .with_music("https://music.amazon.com/p", Some(MusicPlatform::Amazon));
    let created = db.insert_routine(new).expect("Failed to insert routine");

    let fetched = db
        .get_routine("r1")
        .expect("Failed to get routine")
        .expect("Routine should exist");
    assert_eq!(fetched, created);
    assert_eq!(fetched.steps[1].music_platform, Some(MusicPlatform::Amazon));
    assert_eq!(fetched.category, Category::Evening);

    assert!(db.get_routine("missing").unwrap().is_none());
}

#[test]
fn test_steps_keep_submitted_order() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_routine(params("r1", &[("z", 1), ("a", 2), ("m", 3)]))
        .unwrap();

    let ids: Vec<String> = db
        .get_steps("r1")
        .unwrap()
        .into_iter()
        .map(|step| step.id)
        .collect();
    assert_eq!(ids, ["z", "a", "m"]);
}

#[test]
fn test_failed_insert_leaves_no_partial_document() {
    let (_temp_file, mut db) = create_test_db();

    // Bypasses validation; the schema CHECK rejects the second step
    let result = db.insert_routine(params("r1", &[("a", 5), ("b", 0)]));
    assert!(matches!(result, Err(TendError::Database { .. })));

    assert!(db.get_routine("r1").unwrap().is_none());
    assert!(db.get_steps("r1").unwrap().is_empty());
}

#[test]
fn test_failed_replace_keeps_previous_document() {
    let (_temp_file, mut db) = create_test_db();
    let original = db.insert_routine(params("r1", &[("a", 5)])).unwrap();

    let result = db.replace_routine("r1", params("r1", &[("a", 5), ("b", 0)]));
    assert!(result.is_err());

    assert_eq!(db.get_routine("r1").unwrap(), Some(original));
}

#[test]
fn test_replace_rejects_mismatched_body_id() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_routine(params("r1", &[])).unwrap();

    let err = db.replace_routine("r1", params("r2", &[])).unwrap_err();
    assert!(matches!(err, TendError::InvalidInput { ref field, .. } if field == "id"));
}

#[test]
fn test_delete_cascades_and_retires_ids() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_routine(params("r1", &[("a", 5), ("b", 5)]))
        .unwrap();

    let deleted = db.delete_routine("r1").unwrap().expect("Routine existed");
    assert_eq!(deleted.steps.len(), 2);
    assert!(db.get_steps("r1").unwrap().is_empty());
    assert!(db.delete_routine("r1").unwrap().is_none());

    let err = db.insert_routine(params("r1", &[])).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_retired_step_ids_are_scoped_to_their_routine() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_routine(params("r1", &[("a", 5), ("b", 5)]))
        .unwrap();
    db.replace_routine("r1", params("r1", &[("a", 5)])).unwrap();

    // Another routine may still use "b"
    db.insert_routine(params("r2", &[("b", 5)])).unwrap();

    let err = db
        .replace_routine("r1", params("r1", &[("a", 5), ("b", 5)]))
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_set_step_completion_updates_single_step() {
    let (_temp_file, mut db) = create_test_db();
    db.insert_routine(params("r1", &[("a", 5), ("b", 5)]))
        .unwrap();

    let routine = db.set_step_completion("r1", "b", true).unwrap();
    assert!(!routine.steps[0].completed);
    assert!(routine.steps[1].completed);

    let routine = db.set_step_completion("r1", "b", false).unwrap();
    assert!(!routine.steps[1].completed);

    assert!(matches!(
        db.set_step_completion("r1", "zzz", true),
        Err(TendError::StepNotFound { .. })
    ));
    assert!(matches!(
        db.set_step_completion("nope", "a", true),
        Err(TendError::RoutineNotFound { .. })
    ));
}
