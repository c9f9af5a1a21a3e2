//! Aggregate onboarding status and its derivation rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Derived summary of one employee's onboarding workflow.
///
/// Stored as lowercase text in the `onboarding_progress` table; the
/// database CHECK constraint and this enum must stay in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    Pending,
    InProgress,
    Completed,
}

impl OnboardingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStatus::Pending => "pending",
            OnboardingStatus::InProgress => "in_progress",
            OnboardingStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OnboardingStatus::Pending),
            "in_progress" => Ok(OnboardingStatus::InProgress),
            "completed" => Ok(OnboardingStatus::Completed),
            other => Err(format!("unknown onboarding status '{other}'")),
        }
    }
}

/// Derive the aggregate status from submission counts.
///
/// Zero submitted form types means onboarding has not started; a full set
/// means it is complete; anything in between is in progress. Submissions
/// are never deleted, so under this rule the derived status is monotone in
/// the ledger -- only an explicit reset or override can move it backwards.
pub fn derive_status(submitted: usize, required: usize) -> OnboardingStatus {
    if submitted == 0 {
        OnboardingStatus::Pending
    } else if submitted >= required {
        OnboardingStatus::Completed
    } else {
        OnboardingStatus::InProgress
    }
}
