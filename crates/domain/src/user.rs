use derive_more::{AsRef, Display};

/// The opaque identifier of a verified user, as issued by the identity
/// provider. Every read and write operation is scoped to one of these.
#[derive(AsRef, Debug, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(String);

impl UserID {
    pub fn new(value: &str) -> Result<Self, UserIDError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(UserIDError::Empty);
        }

        Ok(UserID(trimmed.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum UserIDError {
    #[error("User ID must not be empty")]
    Empty,
}
