use tend_core::{
    params::{NewRoutine, NewStep},
    Category, RoutineStore, RoutineStoreBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test store
pub async fn create_test_store() -> (TempDir, RoutineStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = RoutineStoreBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

/// A workout routine with three steps, the middle one with a playlist.
#[allow(dead_code)]
pub fn workout_params(id: &str) -> NewRoutine {
    NewRoutine {
        id: Some(id.to_string()),
        title: "Workout".to_string(),
        description: Some("Get moving".to_string()),
        category: Category::Workout,
        steps: vec![
            NewStep {
                id: Some("warmup".to_string()),
                ..NewStep::new("Warm up", 5)
            },
            NewStep {
                id: Some("run".to_string()),
                ..NewStep::new("Run", 20).with_music("https://open.spotify.com/playlist/run", None)
            },
            NewStep {
                id: Some("cooldown".to_string()),
                ..NewStep::new("Cool down", 5)
            },
        ],
    }
}
