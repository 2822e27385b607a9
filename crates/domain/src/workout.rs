use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Deref, Display, Into};

use crate::{CreateError, ExerciseID, Name, ReadError, UserID, ValidationError};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    /// Creates the whole workout aggregate atomically: the workout row, one
    /// workout-exercise row per entry with `position = index + 1`, and one
    /// set row per set with `set_number = index + 1`. Either all rows are
    /// committed or none.
    async fn create_workout(
        &self,
        user: &UserID,
        title: Name,
        date: NaiveDate,
        entries: Vec<ExerciseEntry>,
    ) -> Result<WorkoutDetail, CreateError>;

    /// All workouts owned by `user` whose date falls on the given calendar
    /// day, ordered by `started_at` descending. No child detail.
    async fn read_workouts_by_date(
        &self,
        user: &UserID,
        date: NaiveDate,
    ) -> Result<Vec<Workout>, ReadError>;

    /// A single workout with its exercises and sets, or `None` when it does
    /// not exist or is not owned by `user`. The two cases are
    /// indistinguishable to the caller.
    async fn read_workout(
        &self,
        user: &UserID,
        id: WorkoutID,
    ) -> Result<Option<WorkoutDetail>, ReadError>;

    /// The 10 most recently dated workouts owned by `user`, ordered by date
    /// descending. No child detail.
    async fn read_recent_workouts(&self, user: &UserID) -> Result<Vec<Workout>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub date: DateTime<Utc>,
    pub title: Option<Name>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Workout {
    /// Session duration in whole minutes, rounded. Undefined unless both
    /// timestamps are present.
    #[must_use]
    pub fn duration(&self) -> Option<i64> {
        let (Some(started_at), Some(completed_at)) = (self.started_at, self.completed_at) else {
            return None;
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        Some(((completed_at - started_at).num_seconds() as f64 / 60.0).round() as i64)
    }
}

#[derive(Deref, Display, Into, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(i64);

impl From<i64> for WorkoutID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A workout with its full child detail, as returned by the read path.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDetail {
    pub workout: Workout,
    pub exercises: Vec<WorkoutExercise>,
}

/// An exercise instance within a workout, joined with the catalog entry it
/// references and carrying its sets in `set_number` order.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseID,
    pub exercise_id: ExerciseID,
    pub name: Name,
    pub video_url: Option<String>,
    pub position: u32,
    pub sets: Vec<Set>,
}

impl WorkoutExercise {
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Mean reps across all sets, rounded to the nearest integer.
    #[must_use]
    pub fn avg_reps(&self) -> Option<u32> {
        if self.sets.is_empty() {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
        Some(
            (self
                .sets
                .iter()
                .map(|s| u32::from(s.reps))
                .sum::<u32>() as f32
                / self.sets.len() as f32)
                .round() as u32,
        )
    }

    /// Sum of the non-null weights divided by the total number of sets,
    /// rounded to one decimal. Sets without a weight count towards the
    /// divisor, so mixed bodyweight/weighted exercises under-report.
    #[must_use]
    pub fn avg_weight(&self) -> Option<f32> {
        if self.sets.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let avg = self
            .sets
            .iter()
            .filter_map(|s| s.weight)
            .map(f32::from)
            .sum::<f32>()
            / self.sets.len() as f32;
        Some((avg * 10.0).round() / 10.0)
    }

    /// The unit shown next to the average weight: the first set's unit, or
    /// kilograms when there are no sets.
    #[must_use]
    pub fn weight_unit(&self) -> WeightUnit {
        self.sets.first().map_or(WeightUnit::Kg, |s| s.weight_unit)
    }
}

#[derive(Deref, Display, Into, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutExerciseID(i64);

impl From<i64> for WorkoutExerciseID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub set_number: u32,
    pub reps: Reps,
    pub weight: Option<Weight>,
    pub weight_unit: WeightUnit,
    pub completed: bool,
}

#[derive(Deref, Display, Into, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(i64);

impl From<i64> for SetID {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// One exercise of a pending workout submission, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    pub exercise_id: ExerciseID,
    pub sets: Vec<SetEntry>,
}

/// One set of a pending workout submission, in submission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEntry {
    pub reps: Reps,
    pub weight: Option<Weight>,
    pub weight_unit: WeightUnit,
}

pub(crate) fn validate_entries(entries: &[ExerciseEntry]) -> Result<(), ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::NoExercises);
    }
    if entries.iter().any(|e| e.sets.is_empty()) {
        return Err(ValidationError::NoSets);
    }
    Ok(())
}

#[derive(Display, Into, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Display, Into, Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl WeightUnit {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WeightUnit::Lbs => "lbs",
            WeightUnit::Kg => "kg",
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for WeightUnit {
    type Error = WeightUnitError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "lbs" => Ok(WeightUnit::Lbs),
            "kg" => Ok(WeightUnit::Kg),
            _ => Err(WeightUnitError::Invalid(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightUnitError {
    #[error("Invalid weight unit ({0})")]
    Invalid(String),
}
