use super::super::completeness::profile_completeness;
use super::super::domain::AthleteProfile;
use super::catalogue::RequirementKind;

/// Facts gathered once per evaluation and shared by every predicate.
pub(crate) struct RequirementContext<'a> {
    profile: Option<&'a AthleteProfile>,
    completed_tests: u32,
    profile_completeness: u8,
}

impl<'a> RequirementContext<'a> {
    pub(crate) fn new(profile: Option<&'a AthleteProfile>, completed_tests: u32) -> Self {
        Self {
            profile,
            completed_tests,
            profile_completeness: profile_completeness(profile),
        }
    }

    /// Without a profile nothing is met, test counts included.
    pub(crate) fn is_met(&self, kind: RequirementKind) -> bool {
        let Some(profile) = self.profile else {
            return false;
        };

        match kind {
            RequirementKind::BasicInfo => profile.has_basic_info(),
            RequirementKind::PhysicalAttributes => profile.has_physical_attributes(),
            RequirementKind::SkillsAssessment => profile.has_skills_assessment(),
            RequirementKind::SkillsVerified => profile.skills_verified,
            RequirementKind::FirstTest => self.completed_tests >= 1,
            RequirementKind::ThreeTests => self.completed_tests >= 3,
            RequirementKind::TeamAffiliation => profile.has_team_affiliation(),
            RequirementKind::ScoutValidated => profile.scout_validated,
            RequirementKind::CompleteProfile => self.profile_completeness == 100,
        }
    }
}
