//! Athlete profiles, trust pyramid evaluation, streaks, and achievements.

pub mod achievements;
pub mod completeness;
pub mod domain;
pub mod pyramid;
pub mod repository;
pub mod router;
pub mod service;
pub mod streak;

#[cfg(test)]
mod tests;

pub use achievements::Achievement;
pub use completeness::profile_completeness;
pub use domain::{AthleteId, AthleteProfile, CompletedTest};
pub use pyramid::{
    determine_tier, evaluate, EvaluationResult, ProgressEvaluator, RequirementKind,
    RequirementStatus, Tier, TierProgress,
};
pub use repository::{AthleteRepository, RepositoryError};
pub use router::athlete_router;
pub use service::{AchievementView, ProgressView, VerificationService, VerificationServiceError};
pub use streak::{KeyValueStore, StoreError, StreakError, StreakState, StreakTracker};
