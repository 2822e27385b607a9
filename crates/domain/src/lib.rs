#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod error;
mod exercise;
mod name;
mod navigation;
mod service;
mod user;
mod workout;

pub use error::{CreateError, ReadError, StorageError, ValidationError};
pub use exercise::{Exercise, ExerciseID, ExerciseRepository};
pub use name::{Name, NameError};
pub use navigation::requested_date;
pub use service::{ExerciseService, Service, WorkoutService};
pub use user::{UserID, UserIDError};
pub use workout::{
    ExerciseEntry, Reps, RepsError, Set, SetEntry, SetID, Weight, WeightError, WeightUnit,
    WeightUnitError, Workout, WorkoutDetail, WorkoutExercise, WorkoutExerciseID, WorkoutID,
    WorkoutRepository,
};
