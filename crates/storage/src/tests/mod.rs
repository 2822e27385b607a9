use chrono::{Duration, NaiveDate};
use liftlog_domain as domain;
use liftlog_domain::{ExerciseRepository, WorkoutRepository};
use pretty_assertions::assert_eq;

use crate::Storage;

async fn storage() -> Storage {
    Storage::in_memory().await.unwrap()
}

fn user(value: &str) -> domain::UserID {
    domain::UserID::new(value).unwrap()
}

fn name(value: &str) -> domain::Name {
    domain::Name::new(value).unwrap()
}

fn date(value: &str) -> NaiveDate {
    value.parse().unwrap()
}

fn set_entry(reps: u32, weight: Option<&str>) -> domain::SetEntry {
    domain::SetEntry {
        reps: domain::Reps::new(reps).unwrap(),
        weight: weight.map(|w| domain::Weight::try_from(w).unwrap()),
        weight_unit: domain::WeightUnit::Lbs,
    }
}

fn entry(exercise_id: domain::ExerciseID, sets: Vec<domain::SetEntry>) -> domain::ExerciseEntry {
    domain::ExerciseEntry { exercise_id, sets }
}

#[tokio::test]
async fn test_seed_catalog() {
    let storage = storage().await;

    let inserted = storage.seed_catalog().await.unwrap();
    assert_eq!(inserted as usize, domain::catalog::EXERCISES.len());

    let exercises = storage.read_exercises(&user("u1")).await.unwrap();
    assert_eq!(exercises.len(), domain::catalog::EXERCISES.len());
    assert!(exercises.iter().all(|e| !e.is_custom && e.user_id.is_none()));

    assert_eq!(storage.seed_catalog().await.unwrap(), 0);
}

#[tokio::test]
async fn test_read_exercises_visibility() {
    let storage = storage().await;
    let alice = user("alice");
    let bob = user("bob");

    storage
        .create_exercise(&name("Squat"), None, None)
        .await
        .unwrap();
    storage
        .create_exercise(&name("Alice Special"), None, Some(&alice))
        .await
        .unwrap();
    storage
        .create_exercise(&name("Bob Special"), None, Some(&bob))
        .await
        .unwrap();

    let visible = storage.read_exercises(&alice).await.unwrap();
    let names = visible
        .iter()
        .map(|e| e.name.as_ref().as_str())
        .collect::<Vec<&str>>();
    assert_eq!(names, vec!["Alice Special", "Squat"]);
}

#[tokio::test]
async fn test_read_exercise_ownership() {
    let storage = storage().await;
    let alice = user("alice");
    let bob = user("bob");

    let global = storage
        .create_exercise(&name("Squat"), Some("https://example.com/squat"), None)
        .await
        .unwrap();
    let custom = storage
        .create_exercise(&name("Alice Special"), None, Some(&alice))
        .await
        .unwrap();

    let found = storage.read_exercise(&bob, global.id).await.unwrap();
    assert_eq!(found, Some(global));

    let found = storage.read_exercise(&alice, custom.id).await.unwrap();
    assert_eq!(found, Some(custom.clone()));

    assert_eq!(storage.read_exercise(&bob, custom.id).await.unwrap(), None);
    assert_eq!(
        storage.read_exercise(&alice, 999.into()).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_create_exercise_duplicate_name() {
    let storage = storage().await;

    storage
        .create_exercise(&name("Squat"), None, None)
        .await
        .unwrap();
    let result = storage.create_exercise(&name("Squat"), None, None).await;

    assert!(matches!(result, Err(domain::CreateError::Conflict)));
}

#[tokio::test]
async fn test_create_workout_round_trip() {
    let storage = storage().await;
    let alice = user("alice");

    let bench = storage
        .create_exercise(&name("Barbell Bench Press"), None, None)
        .await
        .unwrap();
    let row = storage
        .create_exercise(&name("Barbell Row"), None, None)
        .await
        .unwrap();

    let created = storage
        .create_workout(
            &alice,
            name("Push Day"),
            date("2026-08-29"),
            vec![
                entry(
                    bench.id,
                    vec![set_entry(8, Some("135")), set_entry(6, Some("185"))],
                ),
                entry(row.id, vec![set_entry(10, None)]),
            ],
        )
        .await
        .unwrap();

    assert_eq!(created.workout.user_id, alice);
    assert_eq!(created.workout.title, Some(name("Push Day")));
    assert_eq!(
        created.workout.date,
        date("2026-08-29").and_hms_opt(0, 0, 0).unwrap().and_utc()
    );
    assert_eq!(created.workout.started_at, created.workout.completed_at);

    // Submission order is preserved, both across exercises and across sets.
    assert_eq!(created.exercises.len(), 2);
    assert_eq!(created.exercises[0].exercise_id, bench.id);
    assert_eq!(created.exercises[0].position, 1);
    assert_eq!(created.exercises[1].exercise_id, row.id);
    assert_eq!(created.exercises[1].position, 2);
    assert_eq!(created.exercises[0].sets[0].set_number, 1);
    assert_eq!(created.exercises[0].sets[1].set_number, 2);
    assert!(created.exercises.iter().flat_map(|e| &e.sets).all(|s| s.completed));

    let read = storage
        .read_workout(&alice, created.workout.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(read, created);
}

#[tokio::test]
async fn test_create_workout_detail_computations() {
    let storage = storage().await;
    let alice = user("alice");

    let bench = storage
        .create_exercise(&name("Barbell Bench Press"), None, None)
        .await
        .unwrap();

    let created = storage
        .create_workout(
            &alice,
            name("Push Day"),
            date("2026-08-29"),
            vec![entry(
                bench.id,
                vec![set_entry(8, Some("135")), set_entry(6, Some("185"))],
            )],
        )
        .await
        .unwrap();

    let exercise = &created.exercises[0];
    assert_eq!(exercise.set_count(), 2);
    assert_eq!(exercise.avg_reps(), Some(7));
    assert_eq!(exercise.avg_weight(), Some(160.0));
    assert_eq!(exercise.weight_unit(), domain::WeightUnit::Lbs);
    assert_eq!(created.workout.duration(), Some(0));
}

#[tokio::test]
async fn test_create_workout_unknown_exercise_writes_nothing() {
    let storage = storage().await;
    let alice = user("alice");

    let bench = storage
        .create_exercise(&name("Barbell Bench Press"), None, None)
        .await
        .unwrap();

    let result = storage
        .create_workout(
            &alice,
            name("Push Day"),
            date("2026-08-29"),
            vec![
                entry(bench.id, vec![set_entry(8, None)]),
                entry(999.into(), vec![set_entry(8, None)]),
            ],
        )
        .await;

    assert!(matches!(
        result,
        Err(domain::CreateError::Validation(
            domain::ValidationError::UnknownExercise(999)
        ))
    ));
    assert_eq!(
        storage
            .read_workouts_by_date(&alice, date("2026-08-29"))
            .await
            .unwrap(),
        vec![]
    );
}

#[tokio::test]
async fn test_read_workouts_by_date() {
    let storage = storage().await;
    let alice = user("alice");
    let bob = user("bob");

    let bench = storage
        .create_exercise(&name("Barbell Bench Press"), None, None)
        .await
        .unwrap();
    let entries = || vec![entry(bench.id, vec![set_entry(8, None)])];

    let first = storage
        .create_workout(&alice, name("Morning"), date("2026-08-29"), entries())
        .await
        .unwrap();
    let second = storage
        .create_workout(&alice, name("Evening"), date("2026-08-29"), entries())
        .await
        .unwrap();
    storage
        .create_workout(&alice, name("Other Day"), date("2026-08-28"), entries())
        .await
        .unwrap();
    storage
        .create_workout(&bob, name("Same Day"), date("2026-08-29"), entries())
        .await
        .unwrap();

    let workouts = storage
        .read_workouts_by_date(&alice, date("2026-08-29"))
        .await
        .unwrap();
    // Most recently started first.
    assert_eq!(workouts, vec![second.workout, first.workout]);
}

#[tokio::test]
async fn test_read_workout_ownership() {
    let storage = storage().await;
    let alice = user("alice");
    let bob = user("bob");

    let bench = storage
        .create_exercise(&name("Barbell Bench Press"), None, None)
        .await
        .unwrap();
    let created = storage
        .create_workout(
            &alice,
            name("Push Day"),
            date("2026-08-29"),
            vec![entry(bench.id, vec![set_entry(8, None)])],
        )
        .await
        .unwrap();

    assert_eq!(
        storage.read_workout(&bob, created.workout.id).await.unwrap(),
        None
    );
    assert_eq!(storage.read_workout(&alice, 999.into()).await.unwrap(), None);

    // Reads do not consume anything.
    let first = storage
        .read_workout(&alice, created.workout.id)
        .await
        .unwrap();
    let second = storage
        .read_workout(&alice, created.workout.id)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_read_recent_workouts() {
    let storage = storage().await;
    let alice = user("alice");

    let bench = storage
        .create_exercise(&name("Barbell Bench Press"), None, None)
        .await
        .unwrap();

    let start = date("2026-08-01");
    for i in 0..12 {
        storage
            .create_workout(
                &alice,
                name(&format!("Workout {i}")),
                start + Duration::days(i),
                vec![entry(bench.id, vec![set_entry(8, None)])],
            )
            .await
            .unwrap();
    }

    let recent = storage.read_recent_workouts(&alice).await.unwrap();
    assert_eq!(recent.len(), 10);
    assert_eq!(
        recent[0].date,
        date("2026-08-12").and_hms_opt(0, 0, 0).unwrap().and_utc()
    );
    assert!(recent.windows(2).all(|w| w[0].date >= w[1].date));
}

#[tokio::test]
async fn test_health_check() {
    let storage = storage().await;
    storage.health_check().await.unwrap();
}

#[tokio::test]
async fn test_new_creates_database_file() {
    let dir = std::env::temp_dir().join(format!("liftlog-test-{}", std::process::id()));
    let path = dir.join("nested").join("liftlog.db");
    let url = format!("sqlite://{}", path.display());

    let storage = Storage::new(&url).await.unwrap();
    storage.health_check().await.unwrap();
    assert!(path.exists());

    drop(storage);
    std::fs::remove_dir_all(&dir).unwrap();
}
