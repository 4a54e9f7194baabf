//! Language selector of an export request.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Which exercises an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSelector {
    /// Every exercise, in every language and status.
    All,
    /// Accepted exercises in the configured display languages.
    User,
}

impl LanguageSelector {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::User => "user",
        }
    }
}

impl fmt::Display for LanguageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageSelector {
    type Err = Error;

    /// Matching is exact; `All` or `USER` are bad requests.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "user" => Ok(Self::User),
            _ => Err(Error::BadRequest {
                selector: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("all".parse::<LanguageSelector>().unwrap(), LanguageSelector::All);
        assert_eq!("user".parse::<LanguageSelector>().unwrap(), LanguageSelector::User);
    }

    #[test]
    fn test_unknown_selector_is_bad_request() {
        for selector in ["", "de", "All", "users", " all"] {
            let err = selector.parse::<LanguageSelector>().unwrap_err();
            assert_eq!(err.status_code(), 400, "selector {selector:?}");
        }
    }
}
