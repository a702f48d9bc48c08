//! Trust pyramid progress evaluation.
//!
//! The evaluator is a total function: every input, including an absent or
//! unreadable profile, produces a renderable [`EvaluationResult`].

mod catalogue;
mod policy;
mod rules;

pub use catalogue::{RequirementDefinition, RequirementKind, TierDefinition, TRUST_PYRAMID};
pub use policy::{determine_tier, Tier};

use super::domain::AthleteProfile;
use rules::RequirementContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Stateless evaluator over a fixed tier catalogue.
#[derive(Debug, Clone, Copy)]
pub struct ProgressEvaluator {
    tiers: &'static [TierDefinition],
}

impl Default for ProgressEvaluator {
    fn default() -> Self {
        Self::standard()
    }
}

impl ProgressEvaluator {
    pub const fn standard() -> Self {
        Self {
            tiers: &TRUST_PYRAMID,
        }
    }

    #[cfg(test)]
    pub(crate) const fn with_tiers(tiers: &'static [TierDefinition]) -> Self {
        Self { tiers }
    }

    pub fn tiers(&self) -> &'static [TierDefinition] {
        self.tiers
    }

    pub fn evaluate(
        &self,
        profile: Option<&AthleteProfile>,
        completed_tests: u32,
    ) -> EvaluationResult {
        let context = RequirementContext::new(profile, completed_tests);

        let mut completed_weight = 0;
        let mut total_weight = 0;
        let tiers = self
            .tiers
            .iter()
            .map(|definition| {
                let requirements: Vec<RequirementStatus> = definition
                    .requirements
                    .iter()
                    .map(|requirement| RequirementStatus {
                        kind: requirement.kind,
                        label: requirement.label,
                        weight: requirement.weight,
                        completed: context.is_met(requirement.kind),
                    })
                    .collect();

                let tier_total = definition.total_weight();
                let tier_completed: u32 = requirements
                    .iter()
                    .filter(|status| status.completed)
                    .map(|status| status.weight)
                    .sum();
                completed_weight += tier_completed;
                total_weight += tier_total;

                TierProgress {
                    tier: definition.tier,
                    label: definition.tier.label(),
                    requirements,
                    percentage: percentage(tier_completed, tier_total),
                }
            })
            .collect();

        let overall_percentage = percentage(completed_weight, total_weight);
        let current_tier = determine_tier(overall_percentage);

        EvaluationResult {
            tiers,
            overall_percentage,
            current_tier,
            current_tier_label: current_tier.label(),
        }
    }

    /// Scores an untyped snapshot. Fields are read one by one, so a badly
    /// typed field only fails its own requirement. JSON `null` and snapshots
    /// that are not an object are scored as an absent profile.
    pub fn evaluate_snapshot(&self, snapshot: &Value, completed_tests: u32) -> EvaluationResult {
        if snapshot.is_null() {
            return self.evaluate(None, completed_tests);
        }

        match AthleteProfile::deserialize(snapshot) {
            Ok(profile) => self.evaluate(Some(&profile), completed_tests),
            Err(error) => {
                warn!(%error, "unreadable athlete snapshot, scoring as absent profile");
                self.evaluate(None, completed_tests)
            }
        }
    }
}

/// Evaluates against the standard trust pyramid.
pub fn evaluate(profile: Option<&AthleteProfile>, completed_tests: u32) -> EvaluationResult {
    ProgressEvaluator::standard().evaluate(profile, completed_tests)
}

/// `round(completed / total * 100)` with halves rounded up; 0 when `total` is 0.
pub fn percentage(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    ((completed * 200 + total) / (total * 2)) as u8
}

/// Outcome of one requirement within an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementStatus {
    #[serde(rename = "key")]
    pub kind: RequirementKind,
    pub label: &'static str,
    pub weight: u32,
    pub completed: bool,
}

/// Progress within a single tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierProgress {
    pub tier: Tier,
    pub label: &'static str,
    pub requirements: Vec<RequirementStatus>,
    pub percentage: u8,
}

/// Snapshot of an athlete's standing on the pyramid. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub tiers: Vec<TierProgress>,
    pub overall_percentage: u8,
    pub current_tier: Tier,
    pub current_tier_label: &'static str,
}

impl EvaluationResult {
    pub fn tier(&self, tier: Tier) -> Option<&TierProgress> {
        self.tiers.iter().find(|progress| progress.tier == tier)
    }

    pub fn is_met(&self, kind: RequirementKind) -> bool {
        self.tiers
            .iter()
            .flat_map(|progress| progress.requirements.iter())
            .any(|status| status.kind == kind && status.completed)
    }
}
