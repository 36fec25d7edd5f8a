//! Mapping of the service's probability onto the three result tiers.

use std::fmt;

use crate::error::WorkflowError;

/// Success likelihood in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Probability(u8);

impl Probability {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Probability {
    type Error = WorkflowError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(percent) if percent <= 100 => Ok(Probability(percent)),
            _ => Err(WorkflowError::OutOfRange(value)),
        }
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// No result yet.
    Neutral,
    /// Exactly 0: the destination is unreachable in time.
    Failure,
    /// Strictly between 0 and 100.
    Caution,
    /// Exactly 100.
    Success,
}

impl Tier {
    pub fn name(self) -> &'static str {
        match self {
            Tier::Neutral => "neutral",
            Tier::Failure => "failure",
            Tier::Caution => "caution",
            Tier::Success => "success",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Tier::Neutral => "",
            Tier::Failure => "❌",
            Tier::Caution => "⚠",
            Tier::Success => "✅",
        }
    }

    /// Panel background as a hex color.
    pub fn background_hex(self) -> &'static str {
        match self {
            Tier::Neutral => "#F3F4F6",
            Tier::Failure => "#FEE2E2",
            Tier::Caution => "#FEF9C3",
            Tier::Success => "#DCFCE7",
        }
    }

    /// Icon and heading accent as a hex color.
    pub fn accent_hex(self) -> &'static str {
        match self {
            Tier::Neutral => "#6B7280",
            Tier::Failure => "#DC2626",
            Tier::Caution => "#CA8A04",
            Tier::Success => "#16A34A",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    pub message: Option<&'static str>,
}

pub const UNREACHABLE_MESSAGE: &str = "cannot reach destination in time";
pub const SAFE_MESSAGE: &str = "can reach destination safely";
pub const RISKY_MESSAGE: &str = "might encounter adversaries en route";

pub fn classify(probability: Option<Probability>) -> Classification {
    match probability.map(Probability::value) {
        None => Classification {
            tier: Tier::Neutral,
            message: None,
        },
        Some(0) => Classification {
            tier: Tier::Failure,
            message: Some(UNREACHABLE_MESSAGE),
        },
        Some(100) => Classification {
            tier: Tier::Success,
            message: Some(SAFE_MESSAGE),
        },
        Some(_) => Classification {
            tier: Tier::Caution,
            message: Some(RISKY_MESSAGE),
        },
    }
}
