use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CreateError, Exercise, ExerciseEntry, ExerciseID, ExerciseRepository, Name, ReadError, UserID,
    ValidationError, Workout, WorkoutDetail, WorkoutID, WorkoutRepository,
    workout::validate_entries,
};

/// The application-facing entry point. Wraps a repository with the
/// authorization gate, input validation, and logging. The caller identity is
/// threaded in explicitly; an absent identity is refused before the
/// repository is touched.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self, caller: Option<&UserID>) -> Result<Vec<Exercise>, ReadError>;
    async fn get_exercise(
        &self,
        caller: Option<&UserID>,
        id: ExerciseID,
    ) -> Result<Option<Exercise>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn create_workout(
        &self,
        caller: Option<&UserID>,
        title: &str,
        date: NaiveDate,
        entries: Vec<ExerciseEntry>,
    ) -> Result<WorkoutDetail, CreateError>;
    async fn get_workouts_by_date(
        &self,
        caller: Option<&UserID>,
        date: NaiveDate,
    ) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(
        &self,
        caller: Option<&UserID>,
        id: WorkoutID,
    ) -> Result<Option<WorkoutDetail>, ReadError>;
    async fn get_recent_workouts(&self, caller: Option<&UserID>)
    -> Result<Vec<Workout>, ReadError>;
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self, caller: Option<&UserID>) -> Result<Vec<Exercise>, ReadError> {
        let user = caller.ok_or(ReadError::Unauthorized)?;
        log_on_error!(
            self.repository.read_exercises(user),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn get_exercise(
        &self,
        caller: Option<&UserID>,
        id: ExerciseID,
    ) -> Result<Option<Exercise>, ReadError> {
        let user = caller.ok_or(ReadError::Unauthorized)?;
        log_on_error!(
            self.repository.read_exercise(user, id),
            ReadError,
            "get",
            "exercise"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn create_workout(
        &self,
        caller: Option<&UserID>,
        title: &str,
        date: NaiveDate,
        entries: Vec<ExerciseEntry>,
    ) -> Result<WorkoutDetail, CreateError> {
        let user = caller.ok_or(CreateError::Unauthorized)?;
        let title = Name::new(title).map_err(ValidationError::Title)?;
        validate_entries(&entries)?;
        log_on_error!(
            self.repository.create_workout(user, title, date, entries),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn get_workouts_by_date(
        &self,
        caller: Option<&UserID>,
        date: NaiveDate,
    ) -> Result<Vec<Workout>, ReadError> {
        let user = caller.ok_or(ReadError::Unauthorized)?;
        log_on_error!(
            self.repository.read_workouts_by_date(user, date),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(
        &self,
        caller: Option<&UserID>,
        id: WorkoutID,
    ) -> Result<Option<WorkoutDetail>, ReadError> {
        let user = caller.ok_or(ReadError::Unauthorized)?;
        log_on_error!(
            self.repository.read_workout(user, id),
            ReadError,
            "get",
            "workout"
        )
    }

    async fn get_recent_workouts(
        &self,
        caller: Option<&UserID>,
    ) -> Result<Vec<Workout>, ReadError> {
        let user = caller.ok_or(ReadError::Unauthorized)?;
        log_on_error!(
            self.repository.read_recent_workouts(user),
            ReadError,
            "get",
            "recent workouts"
        )
    }
}
