//! Packer profiles: a flat collection of unique names.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Packer name recorded when a box was created.
///
/// Profiles are created on demand and never deleted; selection lives only
/// in the client session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "Sam")]
pub struct ProfileName(String);

/// Validation failures raised when constructing a [`ProfileName`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileNameError {
    /// The name is empty after trimming whitespace.
    #[error("profile name must not be empty")]
    Empty,
}

impl ProfileName {
    /// Construct a profile name, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ProfileNameError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(ProfileNameError::Empty);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the underlying name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ProfileName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for ProfileName {
    type Error = ProfileNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProfileName> for String {
    fn from(value: ProfileName) -> Self {
        value.0
    }
}
