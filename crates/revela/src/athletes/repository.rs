use super::domain::{AthleteId, AthleteProfile, CompletedTest};

/// Storage abstraction for profiles and completed tests.
pub trait AthleteRepository: Send + Sync {
    fn save_profile(&self, id: &AthleteId, profile: AthleteProfile) -> Result<(), RepositoryError>;
    fn profile(&self, id: &AthleteId) -> Result<Option<AthleteProfile>, RepositoryError>;
    fn record_test(&self, id: &AthleteId, test: CompletedTest) -> Result<(), RepositoryError>;
    fn completed_tests(&self, id: &AthleteId) -> Result<Vec<CompletedTest>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("athlete not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
