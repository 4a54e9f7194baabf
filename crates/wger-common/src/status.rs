//! Moderation status of an exercise.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Moderation state of an exercise.
///
/// The stored form is a one-character code; that code is also what ends up
/// in the `status` attribute of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseStatus {
    /// Submitted, waiting for review.
    Pending,
    /// Passed review and visible to users.
    Accepted,
    /// Rejected by a moderator.
    Declined,
}

impl ExerciseStatus {
    /// Stored code for this status.
    #[inline]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "1",
            Self::Accepted => "2",
            Self::Declined => "3",
        }
    }

    /// Parse a stored status code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Pending),
            "2" => Some(Self::Accepted),
            "3" => Some(Self::Declined),
            _ => None,
        }
    }
}

impl fmt::Display for ExerciseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ExerciseStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| Error::InvalidStatus(s.to_string()))
    }
}
