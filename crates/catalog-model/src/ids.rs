#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Primary key of a book record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for BookId {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(parsed) = trimmed.parse::<i64>() {
            return Ok(Self(parsed));
        }
        // Spreadsheet exports write integer keys as "7.0".
        match trimmed.strip_suffix(".0").map(str::parse::<i64>) {
            Some(Ok(parsed)) => Ok(Self(parsed)),
            _ => Err(ModelError::InvalidBookId(value.to_string())),
        }
    }
}

impl From<i64> for BookId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
