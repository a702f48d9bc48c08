use serde::Serialize;

use super::pyramid::{EvaluationResult, RequirementKind, Tier};
use super::streak::StreakState;

/// Badge shown on the athlete dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    ProfileStarted,
    FirstTest,
    TestVeteran,
    SkillsVerified,
    ScoutApproved,
    BronzeComplete,
    StreakWeek,
    StreakMonth,
    PyramidSummit,
}

impl Achievement {
    pub const ALL: [Achievement; 9] = [
        Achievement::ProfileStarted,
        Achievement::FirstTest,
        Achievement::TestVeteran,
        Achievement::SkillsVerified,
        Achievement::ScoutApproved,
        Achievement::BronzeComplete,
        Achievement::StreakWeek,
        Achievement::StreakMonth,
        Achievement::PyramidSummit,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::ProfileStarted => "Profile started",
            Self::FirstTest => "First test completed",
            Self::TestVeteran => "Test veteran",
            Self::SkillsVerified => "Skills verified",
            Self::ScoutApproved => "Scout approved",
            Self::BronzeComplete => "Bronze complete",
            Self::StreakWeek => "7-day streak",
            Self::StreakMonth => "30-day streak",
            Self::PyramidSummit => "Top of the pyramid",
        }
    }

    fn is_unlocked(self, result: &EvaluationResult, streak: &StreakState) -> bool {
        match self {
            Self::ProfileStarted => result.is_met(RequirementKind::BasicInfo),
            Self::FirstTest => result.is_met(RequirementKind::FirstTest),
            Self::TestVeteran => result.is_met(RequirementKind::ThreeTests),
            Self::SkillsVerified => result.is_met(RequirementKind::SkillsVerified),
            Self::ScoutApproved => result.is_met(RequirementKind::ScoutValidated),
            Self::BronzeComplete => result
                .tier(Tier::Bronze)
                .is_some_and(|progress| progress.percentage == 100),
            Self::StreakWeek => streak.longest >= 7,
            Self::StreakMonth => streak.longest >= 30,
            Self::PyramidSummit => result.current_tier == Tier::Platinum,
        }
    }
}

/// Achievements earned so far, in display order.
pub fn unlocked(result: &EvaluationResult, streak: &StreakState) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|achievement| achievement.is_unlocked(result, streak))
        .collect()
}
