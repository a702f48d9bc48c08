use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::athletes::domain::{AthleteId, AthleteProfile, CompletedTest};
use crate::athletes::repository::{AthleteRepository, RepositoryError};
use crate::athletes::streak::{KeyValueStore, StoreError};
use crate::athletes::{athlete_router, VerificationService};
use crate::config::StreakConfig;

pub(super) fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid date")
}

pub(super) fn athlete_id() -> AthleteId {
    AthleteId("ath-042".to_string())
}

pub(super) fn basic_profile() -> AthleteProfile {
    AthleteProfile {
        name: Some("Joao Pedro Alves".to_string()),
        birth_date: NaiveDate::from_ymd_opt(2009, 8, 14),
        position: Some("Meia".to_string()),
        height_cm: Some(168),
        weight_kg: Some(57.5),
        ..AthleteProfile::default()
    }
}

pub(super) fn verified_profile() -> AthleteProfile {
    AthleteProfile {
        skills_assessment: Some(json!({ "visao_de_jogo": 5, "finalizacao": 3 })),
        skills_verified: true,
        current_team: Some("Bahia Sub-16".to_string()),
        ..basic_profile()
    }
}

pub(super) fn completed_test(key: &str, on: NaiveDate) -> CompletedTest {
    CompletedTest {
        test_key: key.to_string(),
        completed_on: on,
        score: Some(78),
    }
}

pub(super) fn build_service() -> (
    VerificationService<MemoryRepository, MemoryStore>,
    Arc<MemoryRepository>,
    Arc<MemoryStore>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let store = Arc::new(MemoryStore::default());
    let service =
        VerificationService::new(repository.clone(), store.clone(), &StreakConfig::default());
    (service, repository, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    profiles: Arc<Mutex<HashMap<AthleteId, AthleteProfile>>>,
    tests: Arc<Mutex<HashMap<AthleteId, Vec<CompletedTest>>>>,
}

impl AthleteRepository for MemoryRepository {
    fn save_profile(&self, id: &AthleteId, profile: AthleteProfile) -> Result<(), RepositoryError> {
        self.profiles
            .lock()
            .expect("repository mutex poisoned")
            .insert(id.clone(), profile);
        Ok(())
    }

    fn profile(&self, id: &AthleteId) -> Result<Option<AthleteProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn record_test(&self, id: &AthleteId, test: CompletedTest) -> Result<(), RepositoryError> {
        self.tests
            .lock()
            .expect("repository mutex poisoned")
            .entry(id.clone())
            .or_default()
            .push(test);
        Ok(())
    }

    fn completed_tests(&self, id: &AthleteId) -> Result<Vec<CompletedTest>, RepositoryError> {
        let guard = self.tests.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub(super) fn raw(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.values
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl AthleteRepository for UnavailableRepository {
    fn save_profile(&self, _id: &AthleteId, _profile: AthleteProfile) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn profile(&self, _id: &AthleteId) -> Result<Option<AthleteProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_test(&self, _id: &AthleteId, _test: CompletedTest) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn completed_tests(&self, _id: &AthleteId) -> Result<Vec<CompletedTest>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: VerificationService<MemoryRepository, MemoryStore>,
) -> axum::Router {
    athlete_router(Arc::new(service))
}
