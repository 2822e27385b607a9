use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use liftlog_domain as domain;

use crate::{Storage, create_error, decode_error, read_error};

#[derive(sqlx::FromRow)]
struct WorkoutRow {
    id: i64,
    user_id: String,
    workout_date: DateTime<Utc>,
    title: Option<String>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl WorkoutRow {
    fn into_workout(self) -> Result<domain::Workout, domain::ReadError> {
        Ok(domain::Workout {
            id: self.id.into(),
            user_id: domain::UserID::new(&self.user_id).map_err(decode_error)?,
            date: self.workout_date,
            title: self
                .title
                .as_deref()
                .map(domain::Name::new)
                .transpose()
                .map_err(decode_error)?,
            started_at: self.started_at,
            completed_at: self.completed_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WorkoutExerciseRow {
    id: i64,
    position: i64,
    exercise_id: i64,
    name: String,
    video_url: Option<String>,
}

#[derive(sqlx::FromRow)]
struct SetRow {
    id: i64,
    set_number: i64,
    reps: i64,
    weight: Option<f64>,
    weight_unit: String,
    completed: bool,
}

impl SetRow {
    fn into_set(self) -> Result<domain::Set, domain::ReadError> {
        let reps = u32::try_from(self.reps).map_err(decode_error)?;
        #[allow(clippy::cast_possible_truncation)]
        let weight = self
            .weight
            .map(|w| domain::Weight::new(w as f32))
            .transpose()
            .map_err(decode_error)?;
        Ok(domain::Set {
            id: self.id.into(),
            set_number: u32::try_from(self.set_number).map_err(decode_error)?,
            reps: domain::Reps::new(reps).map_err(decode_error)?,
            weight,
            weight_unit: domain::WeightUnit::try_from(&*self.weight_unit).map_err(decode_error)?,
            completed: self.completed,
        })
    }
}

impl domain::WorkoutRepository for Storage {
    async fn create_workout(
        &self,
        user: &domain::UserID,
        title: domain::Name,
        date: NaiveDate,
        entries: Vec<domain::ExerciseEntry>,
    ) -> Result<domain::WorkoutDetail, domain::CreateError> {
        // Resolve the referenced exercises before any row is written.
        let mut referenced = Vec::with_capacity(entries.len());
        for entry in &entries {
            let row: Option<(String, Option<String>)> =
                sqlx::query_as("SELECT name, video_url FROM exercises WHERE id = ?1")
                    .bind(i64::from(entry.exercise_id))
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(create_error)?;
            let Some((name, video_url)) = row else {
                return Err(domain::ValidationError::UnknownExercise(i64::from(
                    entry.exercise_id,
                ))
                .into());
            };
            let name = domain::Name::new(&name)
                .map_err(|e| domain::CreateError::Other(Box::new(e)))?;
            referenced.push((name, video_url));
        }

        let now = Utc::now();
        let workout_date = date.and_time(NaiveTime::MIN).and_utc();

        // The whole aggregate is written in one transaction; either every
        // row commits or none does.
        let mut tx = self.pool.begin().await.map_err(create_error)?;

        let workout_id = sqlx::query(
            "INSERT INTO workouts (user_id, workout_date, title, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(user.as_ref())
        .bind(workout_date)
        .bind(title.as_ref())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(create_error)?
        .last_insert_rowid();

        let mut exercises = Vec::with_capacity(entries.len());
        for (i, (entry, (name, video_url))) in entries.iter().zip(referenced).enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let position = i as u32 + 1;
            let workout_exercise_id = sqlx::query(
                "INSERT INTO workout_exercises (workout_id, exercise_id, position)
                 VALUES (?1, ?2, ?3)",
            )
            .bind(workout_id)
            .bind(i64::from(entry.exercise_id))
            .bind(i64::from(position))
            .execute(&mut *tx)
            .await
            .map_err(create_error)?
            .last_insert_rowid();

            let mut sets = Vec::with_capacity(entry.sets.len());
            for (j, set) in entry.sets.iter().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                let set_number = j as u32 + 1;
                let set_id = sqlx::query(
                    "INSERT INTO sets
                         (workout_exercise_id, set_number, reps, weight, weight_unit, completed)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )
                .bind(workout_exercise_id)
                .bind(i64::from(set_number))
                .bind(i64::from(u32::from(set.reps)))
                .bind(set.weight.map(|w| f64::from(f32::from(w))))
                .bind(set.weight_unit.name())
                .bind(true)
                .execute(&mut *tx)
                .await
                .map_err(create_error)?
                .last_insert_rowid();

                sets.push(domain::Set {
                    id: set_id.into(),
                    set_number,
                    reps: set.reps,
                    weight: set.weight,
                    weight_unit: set.weight_unit,
                    completed: true,
                });
            }

            exercises.push(domain::WorkoutExercise {
                id: workout_exercise_id.into(),
                exercise_id: entry.exercise_id,
                name,
                video_url,
                position,
                sets,
            });
        }

        tx.commit().await.map_err(create_error)?;

        Ok(domain::WorkoutDetail {
            workout: domain::Workout {
                id: workout_id.into(),
                user_id: user.clone(),
                date: workout_date,
                title: Some(title),
                started_at: Some(now),
                completed_at: Some(now),
            },
            exercises,
        })
    }

    async fn read_workouts_by_date(
        &self,
        user: &domain::UserID,
        date: NaiveDate,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        let start_of_day = date.and_time(NaiveTime::MIN).and_utc();
        let end_of_day = start_of_day + Duration::days(1) - Duration::milliseconds(1);

        sqlx::query_as::<_, WorkoutRow>(
            "SELECT id, user_id, workout_date, title, started_at, completed_at
             FROM workouts
             WHERE user_id = ?1 AND workout_date >= ?2 AND workout_date <= ?3
             ORDER BY started_at DESC",
        )
        .bind(user.as_ref())
        .bind(start_of_day)
        .bind(end_of_day)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?
        .into_iter()
        .map(WorkoutRow::into_workout)
        .collect()
    }

    async fn read_workout(
        &self,
        user: &domain::UserID,
        id: domain::WorkoutID,
    ) -> Result<Option<domain::WorkoutDetail>, domain::ReadError> {
        // A single ownership-checked lookup: a workout owned by someone else
        // yields the same absent result as a missing row.
        let row = sqlx::query_as::<_, WorkoutRow>(
            "SELECT id, user_id, workout_date, title, started_at, completed_at
             FROM workouts
             WHERE id = ?1 AND user_id = ?2",
        )
        .bind(i64::from(id))
        .bind(user.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let workout = row.into_workout()?;

        let exercise_rows = sqlx::query_as::<_, WorkoutExerciseRow>(
            "SELECT we.id, we.position, e.id AS exercise_id, e.name, e.video_url
             FROM workout_exercises we
             INNER JOIN exercises e ON we.exercise_id = e.id
             WHERE we.workout_id = ?1
             ORDER BY we.position ASC",
        )
        .bind(i64::from(id))
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        // One set query per exercise. Sessions hold a handful of exercises,
        // so the N+1 shape is not worth collapsing here.
        let mut exercises = Vec::with_capacity(exercise_rows.len());
        for exercise_row in exercise_rows {
            let sets = sqlx::query_as::<_, SetRow>(
                "SELECT id, set_number, reps, weight, weight_unit, completed
                 FROM sets
                 WHERE workout_exercise_id = ?1
                 ORDER BY set_number ASC",
            )
            .bind(exercise_row.id)
            .fetch_all(&self.pool)
            .await
            .map_err(read_error)?
            .into_iter()
            .map(SetRow::into_set)
            .collect::<Result<Vec<_>, _>>()?;

            exercises.push(domain::WorkoutExercise {
                id: exercise_row.id.into(),
                exercise_id: exercise_row.exercise_id.into(),
                name: domain::Name::new(&exercise_row.name).map_err(decode_error)?,
                video_url: exercise_row.video_url,
                position: u32::try_from(exercise_row.position).map_err(decode_error)?,
                sets,
            });
        }

        Ok(Some(domain::WorkoutDetail { workout, exercises }))
    }

    async fn read_recent_workouts(
        &self,
        user: &domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        sqlx::query_as::<_, WorkoutRow>(
            "SELECT id, user_id, workout_date, title, started_at, completed_at
             FROM workouts
             WHERE user_id = ?1
             ORDER BY workout_date DESC
             LIMIT 10",
        )
        .bind(user.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?
        .into_iter()
        .map(WorkoutRow::into_workout)
        .collect()
    }
}
