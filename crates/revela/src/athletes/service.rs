use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::achievements::{self, Achievement};
use super::completeness::profile_completeness;
use super::domain::{AthleteId, AthleteProfile, CompletedTest};
use super::pyramid::{EvaluationResult, ProgressEvaluator};
use super::repository::{AthleteRepository, RepositoryError};
use super::streak::{KeyValueStore, StreakError, StreakState, StreakTracker};
use crate::config::StreakConfig;

/// Service composing the athlete repository, streak tracker, and evaluator.
pub struct VerificationService<R, S> {
    repository: Arc<R>,
    streaks: StreakTracker<S>,
    evaluator: ProgressEvaluator,
}

impl<R, S> VerificationService<R, S>
where
    R: AthleteRepository + 'static,
    S: KeyValueStore + 'static,
{
    pub fn new(repository: Arc<R>, store: Arc<S>, config: &StreakConfig) -> Self {
        Self {
            repository,
            streaks: StreakTracker::new(store, config),
            evaluator: ProgressEvaluator::standard(),
        }
    }

    pub fn evaluator(&self) -> &ProgressEvaluator {
        &self.evaluator
    }

    pub fn save_profile(
        &self,
        athlete_id: &AthleteId,
        profile: AthleteProfile,
    ) -> Result<(), VerificationServiceError> {
        self.repository.save_profile(athlete_id, profile)?;
        info!(athlete = %athlete_id, "athlete profile saved");
        Ok(())
    }

    /// Record a completed test, returning the athlete's new test count.
    pub fn record_test(
        &self,
        athlete_id: &AthleteId,
        test: CompletedTest,
    ) -> Result<u32, VerificationServiceError> {
        if self.repository.profile(athlete_id)?.is_none() {
            return Err(RepositoryError::NotFound.into());
        }

        let test_key = test.test_key.clone();
        self.repository.record_test(athlete_id, test)?;
        let count = self.completed_test_count(athlete_id)?;
        info!(athlete = %athlete_id, %test_key, count, "verification test recorded");
        Ok(count)
    }

    /// Evaluate the athlete's current standing. An unknown athlete yields the zero result.
    pub fn progress(
        &self,
        athlete_id: &AthleteId,
        today: NaiveDate,
    ) -> Result<ProgressView, VerificationServiceError> {
        let profile = self.repository.profile(athlete_id)?;
        let completed_tests = self.completed_test_count(athlete_id)?;
        let streak = self.streaks.load(athlete_id)?;

        let evaluation = self.evaluator.evaluate(profile.as_ref(), completed_tests);
        let achievements = achievements::unlocked(&evaluation, &streak)
            .into_iter()
            .map(AchievementView::from)
            .collect();

        debug!(
            athlete = %athlete_id,
            overall = evaluation.overall_percentage,
            tier = evaluation.current_tier_label,
            "progress evaluated"
        );

        Ok(ProgressView {
            athlete_id: athlete_id.clone(),
            profile_found: profile.is_some(),
            completed_tests,
            profile_completeness: profile_completeness(profile.as_ref()),
            current_streak: streak.current_as_of(today),
            streak,
            achievements,
            evaluation,
        })
    }

    pub fn completeness(&self, athlete_id: &AthleteId) -> Result<u8, VerificationServiceError> {
        let profile = self.repository.profile(athlete_id)?;
        Ok(profile_completeness(profile.as_ref()))
    }

    pub fn check_in(
        &self,
        athlete_id: &AthleteId,
        today: NaiveDate,
    ) -> Result<StreakState, VerificationServiceError> {
        Ok(self.streaks.record_activity(athlete_id, today)?)
    }

    fn completed_test_count(&self, athlete_id: &AthleteId) -> Result<u32, RepositoryError> {
        let tests = self.repository.completed_tests(athlete_id)?;
        Ok(u32::try_from(tests.len()).unwrap_or(u32::MAX))
    }
}

/// Dashboard payload combining the evaluation with streak and badge data.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub athlete_id: AthleteId,
    pub profile_found: bool,
    pub completed_tests: u32,
    pub profile_completeness: u8,
    pub current_streak: u32,
    pub streak: StreakState,
    pub achievements: Vec<AchievementView>,
    pub evaluation: EvaluationResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementView {
    pub key: Achievement,
    pub title: &'static str,
}

impl From<Achievement> for AchievementView {
    fn from(value: Achievement) -> Self {
        Self {
            key: value,
            title: value.title(),
        }
    }
}

/// Error raised by the verification service.
#[derive(Debug, thiserror::Error)]
pub enum VerificationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Streak(#[from] StreakError),
}
