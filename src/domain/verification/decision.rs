//! Decision Engine - maps a parsed age onto a verification outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::age::AgeInYears;

/// Default minimum age in years.
pub const DEFAULT_MINIMUM_AGE: f64 = 18.0;

/// Outcome of evaluating one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Old enough; the membership capability is granted.
    Pass,
    /// Too young; the applicant is removed from the space.
    Fail,
    /// The birthdate could not be parsed; nothing happens beyond a reply.
    Invalid,
}

impl Outcome {
    /// Whether this outcome produces an audit event and a platform action.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Outcome::Invalid)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Pass => "pass",
            Outcome::Fail => "fail",
            Outcome::Invalid => "invalid",
        };
        write!(f, "{}", s)
    }
}

/// The terminal result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    outcome: Outcome,
    age: Option<AgeInYears>,
    raw_input: String,
}

impl Decision {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Floor of the computed age, if one was computed.
    pub fn whole_years(&self) -> Option<u32> {
        self.age.map(|age| age.whole_years())
    }

    /// The birthdate text exactly as the applicant entered it.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }
}

/// Pure threshold comparison over an optional age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionEngine {
    minimum_age: f64,
}

impl DecisionEngine {
    pub fn new(minimum_age: f64) -> Self {
        Self { minimum_age }
    }

    /// Decides a submission.
    ///
    /// `None` means the birthdate did not parse. The comparison uses the
    /// unfloored age and is inclusive at the threshold.
    pub fn decide(&self, age: Option<AgeInYears>, raw_input: impl Into<String>) -> Decision {
        let outcome = match age {
            None => Outcome::Invalid,
            Some(age) if age.value() >= self.minimum_age => Outcome::Pass,
            Some(_) => Outcome::Fail,
        };

        Decision {
            outcome,
            age,
            raw_input: raw_input.into(),
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_AGE)
    }
}
