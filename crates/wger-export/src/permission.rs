//! Capabilities and the permission gate.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::{Error, Result};

/// A named capability a caller may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Edit exercises; required for any export.
    ChangeExercise,
}

impl Capability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChangeExercise => "exercises.change_exercise",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "exercises.change_exercise" => Ok(Self::ChangeExercise),
            _ => Err(ConfigError::UnknownCapability(s.to_string())),
        }
    }
}

/// The set of capabilities held by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    granted: HashSet<Capability>,
}

impl Permissions {
    /// No capabilities at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn grant(mut self, capability: Capability) -> Self {
        self.granted.insert(capability);
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    /// Fail with [`Error::PermissionDenied`] unless `capability` is held.
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.has(capability) {
            Ok(())
        } else {
            Err(Error::PermissionDenied { capability })
        }
    }
}

impl FromIterator<Capability> for Permissions {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        let granted = Permissions::none().grant(Capability::ChangeExercise);
        assert!(granted.require(Capability::ChangeExercise).is_ok());

        let err = Permissions::none()
            .require(Capability::ChangeExercise)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::PermissionDenied {
                capability: Capability::ChangeExercise
            }
        ));
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_parse_capability() {
        assert_eq!(
            "exercises.change_exercise".parse::<Capability>().unwrap(),
            Capability::ChangeExercise
        );
        assert!(matches!(
            "exercises.delete_exercise".parse::<Capability>(),
            Err(ConfigError::UnknownCapability(_))
        ));
    }
}
