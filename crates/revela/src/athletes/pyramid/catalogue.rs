use super::policy::Tier;
use serde::Serialize;

/// Atomic check scored by the trust pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    BasicInfo,
    PhysicalAttributes,
    SkillsAssessment,
    SkillsVerified,
    FirstTest,
    ThreeTests,
    TeamAffiliation,
    ScoutValidated,
    CompleteProfile,
}

impl RequirementKind {
    pub const fn key(self) -> &'static str {
        match self {
            Self::BasicInfo => "basic_info",
            Self::PhysicalAttributes => "physical_attributes",
            Self::SkillsAssessment => "skills_assessment",
            Self::SkillsVerified => "skills_verified",
            Self::FirstTest => "first_test",
            Self::ThreeTests => "three_tests",
            Self::TeamAffiliation => "team_affiliation",
            Self::ScoutValidated => "scout_validated",
            Self::CompleteProfile => "complete_profile",
        }
    }
}

/// Named, weighted requirement as published to athletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequirementDefinition {
    pub kind: RequirementKind,
    pub label: &'static str,
    pub weight: u32,
}

/// A pyramid level together with the requirements scored for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierDefinition {
    pub tier: Tier,
    pub requirements: &'static [RequirementDefinition],
}

impl TierDefinition {
    pub fn total_weight(&self) -> u32 {
        self.requirements.iter().map(|requirement| requirement.weight).sum()
    }
}

const fn requirement(
    kind: RequirementKind,
    label: &'static str,
    weight: u32,
) -> RequirementDefinition {
    RequirementDefinition {
        kind,
        label,
        weight,
    }
}

/// The fixed requirement catalogue, shared by every evaluation.
pub const TRUST_PYRAMID: [TierDefinition; 4] = [
    TierDefinition {
        tier: Tier::Bronze,
        requirements: &[
            requirement(
                RequirementKind::BasicInfo,
                "Name, birth date and position filled in",
                10,
            ),
            requirement(
                RequirementKind::PhysicalAttributes,
                "Height and weight filled in",
                5,
            ),
            requirement(
                RequirementKind::SkillsAssessment,
                "Skills self-assessment submitted",
                10,
            ),
        ],
    },
    TierDefinition {
        tier: Tier::Silver,
        requirements: &[
            requirement(RequirementKind::SkillsVerified, "Skills verified", 15),
            requirement(RequirementKind::FirstTest, "First verification test", 10),
        ],
    },
    TierDefinition {
        tier: Tier::Gold,
        requirements: &[
            requirement(RequirementKind::ThreeTests, "Three verification tests", 15),
            requirement(
                RequirementKind::TeamAffiliation,
                "Current team or league history",
                10,
            ),
        ],
    },
    TierDefinition {
        tier: Tier::Platinum,
        requirements: &[
            requirement(RequirementKind::ScoutValidated, "Validated by a scout", 20),
            requirement(RequirementKind::CompleteProfile, "Profile 100% complete", 5),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn tiers_are_listed_in_rank_order() {
        let tiers: Vec<Tier> = TRUST_PYRAMID.iter().map(|definition| definition.tier).collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }

    #[test]
    fn every_requirement_appears_once() {
        let kinds: Vec<RequirementKind> = TRUST_PYRAMID
            .iter()
            .flat_map(|definition| definition.requirements.iter().map(|r| r.kind))
            .collect();
        let unique: BTreeSet<RequirementKind> = kinds.iter().copied().collect();
        assert_eq!(kinds.len(), 9);
        assert_eq!(unique.len(), kinds.len());
    }

    #[test]
    fn weights_sum_to_one_hundred() {
        let total: u32 = TRUST_PYRAMID.iter().map(TierDefinition::total_weight).sum();
        assert_eq!(total, 100);
        assert_eq!(TRUST_PYRAMID[0].total_weight(), 25);
    }
}
