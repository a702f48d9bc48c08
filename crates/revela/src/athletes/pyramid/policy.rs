use serde::{Deserialize, Serialize};

/// Verification rank on the trust pyramid, ordered from the base upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Bronze, Tier::Silver, Tier::Gold, Tier::Platinum];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }

    /// Minimum overall percentage needed to hold this tier.
    ///
    /// These cutoffs are fixed policy and are not derived from the weights of
    /// the tier's own requirements.
    pub const fn threshold(self) -> u8 {
        match self {
            Self::Bronze => 0,
            Self::Silver => 30,
            Self::Gold => 60,
            Self::Platinum => 80,
        }
    }
}

/// Highest tier whose threshold the overall percentage reaches.
pub fn determine_tier(overall_percentage: u8) -> Tier {
    Tier::ALL
        .iter()
        .rev()
        .copied()
        .find(|tier| overall_percentage >= tier.threshold())
        .unwrap_or(Tier::Bronze)
}
