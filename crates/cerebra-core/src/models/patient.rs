use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The identity and demographics the report header is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDetails {
    pub patient_id: String,
    pub patient_name: String,
    pub age: Age,
    pub gender: Gender,
}

impl PatientDetails {
    /// Both identifiers must be present before a report may be produced.
    /// Whitespace is not trimmed here; an id of `" "` counts as entered.
    pub fn has_identity(&self) -> bool {
        !self.patient_id.is_empty() && !self.patient_name.is_empty()
    }
}

/// Patient age in whole years, bounded the way the age widget is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Age(u8);

impl Age {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 120;

    pub fn years(self) -> u8 {
        self.0
    }
}

impl Default for Age {
    fn default() -> Self {
        Age(30)
    }
}

impl TryFrom<i64> for Age {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Age::MIN)..=i64::from(Age::MAX)).contains(&value) {
            // Range-checked above.
            Ok(Age(value as u8))
        } else {
            Err(CoreError::InvalidAge {
                value: value.to_string(),
                min: Age::MIN,
                max: Age::MAX,
            })
        }
    }
}

impl FromStr for Age {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map_err(|_| CoreError::InvalidAge {
                value: trimmed.to_string(),
                min: Age::MIN,
                max: Age::MAX,
            })
            .and_then(Age::try_from)
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| CoreError::UnknownGender(s.to_string()))
    }
}
