use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use revela::athletes::{
    AthleteId, AthleteProfile, AthleteRepository, CompletedTest, KeyValueStore, RepositoryError,
    StoreError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAthleteRepository {
    profiles: Arc<Mutex<HashMap<AthleteId, AthleteProfile>>>,
    tests: Arc<Mutex<HashMap<AthleteId, Vec<CompletedTest>>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}

impl AthleteRepository for InMemoryAthleteRepository {
    fn save_profile(&self, id: &AthleteId, profile: AthleteProfile) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().map_err(poisoned)?;
        guard.insert(id.clone(), profile);
        Ok(())
    }

    fn profile(&self, id: &AthleteId) -> Result<Option<AthleteProfile>, RepositoryError> {
        let guard = self.profiles.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn record_test(&self, id: &AthleteId, test: CompletedTest) -> Result<(), RepositoryError> {
        let mut guard = self.tests.lock().map_err(poisoned)?;
        guard.entry(id.clone()).or_default().push(test);
        Ok(())
    }

    fn completed_tests(&self, id: &AthleteId) -> Result<Vec<CompletedTest>, RepositoryError> {
        let guard = self.tests.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned().unwrap_or_default())
    }
}

/// Process-local stand-in for the durable key/value store.
#[derive(Default, Clone)]
pub(crate) struct InMemoryKeyValueStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut guard = self
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        guard.insert(key.to_string(), value);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_trims_and_reports_failures() {
        assert_eq!(
            parse_date(" 2025-03-01 "),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"))
        );
        assert!(parse_date("01/03/2025")
            .expect_err("wrong format")
            .contains("01/03/2025"));
    }

    #[test]
    fn repository_keeps_tests_per_athlete() {
        let repository = InMemoryAthleteRepository::default();
        let first = AthleteId("a".to_string());
        let test = CompletedTest {
            test_key: "sprint_30m".to_string(),
            completed_on: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
            score: None,
        };

        repository.record_test(&first, test).expect("recorded");

        assert_eq!(repository.completed_tests(&first).expect("read").len(), 1);
        assert!(repository
            .completed_tests(&AthleteId("b".to_string()))
            .expect("read")
            .is_empty());
    }
}
