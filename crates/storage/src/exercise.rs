use liftlog_domain as domain;

use crate::{Storage, decode_error, read_error};

#[derive(sqlx::FromRow)]
struct ExerciseRow {
    id: i64,
    name: String,
    video_url: Option<String>,
    is_custom: bool,
    user_id: Option<String>,
}

impl ExerciseRow {
    fn into_exercise(self) -> Result<domain::Exercise, domain::ReadError> {
        Ok(domain::Exercise {
            id: self.id.into(),
            name: domain::Name::new(&self.name).map_err(decode_error)?,
            video_url: self.video_url,
            is_custom: self.is_custom,
            user_id: self
                .user_id
                .as_deref()
                .map(domain::UserID::new)
                .transpose()
                .map_err(decode_error)?,
        })
    }
}

impl domain::ExerciseRepository for Storage {
    async fn read_exercises(
        &self,
        user: &domain::UserID,
    ) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        sqlx::query_as::<_, ExerciseRow>(
            "SELECT id, name, video_url, is_custom, user_id
             FROM exercises
             WHERE is_custom = 0 OR user_id = ?1
             ORDER BY name ASC",
        )
        .bind(user.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?
        .into_iter()
        .map(ExerciseRow::into_exercise)
        .collect()
    }

    async fn read_exercise(
        &self,
        user: &domain::UserID,
        id: domain::ExerciseID,
    ) -> Result<Option<domain::Exercise>, domain::ReadError> {
        // A single ownership-checked lookup: a custom exercise owned by
        // someone else yields the same absent result as a missing row.
        sqlx::query_as::<_, ExerciseRow>(
            "SELECT id, name, video_url, is_custom, user_id
             FROM exercises
             WHERE id = ?1 AND (is_custom = 0 OR user_id = ?2)",
        )
        .bind(i64::from(id))
        .bind(user.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?
        .map(ExerciseRow::into_exercise)
        .transpose()
    }
}
