use derive_more::{Deref, Display, Into};

use crate::{Name, ReadError, UserID};

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    /// All exercises visible to `user`: every global exercise plus the
    /// custom exercises owned by `user`, ordered by name ascending.
    async fn read_exercises(&self, user: &UserID) -> Result<Vec<Exercise>, ReadError>;

    /// A single exercise, or `None` when it does not exist or is a custom
    /// exercise owned by someone else. The two cases are indistinguishable
    /// to the caller.
    async fn read_exercise(
        &self,
        user: &UserID,
        id: ExerciseID,
    ) -> Result<Option<Exercise>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub video_url: Option<String>,
    pub is_custom: bool,
    pub user_id: Option<UserID>,
}

#[derive(Deref, Display, Into, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(i64);

impl From<i64> for ExerciseID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
