use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier wrapper for athlete profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AthleteId(pub String);

impl std::fmt::Display for AthleteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of an athlete profile as recorded by the platform.
///
/// Every field is optional on the wire and read on its own. A missing or
/// oddly typed field never fails deserialization; it only leaves the
/// dependent requirement unmet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AthleteProfile {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub birth_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_text")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient_height")]
    pub height_cm: Option<u16>,
    #[serde(deserialize_with = "lenient_weight")]
    pub weight_kg: Option<f32>,
    #[serde(deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub preferred_foot: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub current_team: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub league_history: Vec<String>,
    /// Free-form self assessment. Only its presence is scored.
    pub skills_assessment: Option<Value>,
    #[serde(deserialize_with = "lenient_flag")]
    pub skills_verified: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub scout_validated: bool,
}

impl AthleteProfile {
    pub fn has_basic_info(&self) -> bool {
        is_filled(&self.name) && self.birth_date.is_some() && is_filled(&self.position)
    }

    pub fn has_physical_attributes(&self) -> bool {
        self.has_height() && self.has_weight()
    }

    pub fn has_skills_assessment(&self) -> bool {
        match &self.skills_assessment {
            None | Some(Value::Null) => false,
            Some(Value::String(text)) => !text.trim().is_empty(),
            Some(Value::Object(fields)) => !fields.is_empty(),
            Some(Value::Array(entries)) => !entries.is_empty(),
            Some(_) => true,
        }
    }

    pub fn has_team_affiliation(&self) -> bool {
        is_filled(&self.current_team)
            || self
                .league_history
                .iter()
                .any(|league| !league.trim().is_empty())
    }

    pub(crate) fn has_height(&self) -> bool {
        self.height_cm.is_some_and(|height| height > 0)
    }

    pub(crate) fn has_weight(&self) -> bool {
        self.weight_kg
            .is_some_and(|weight| weight.is_finite() && weight > 0.0)
    }
}

pub(crate) fn is_filled(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false)
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp such as `2009-02-17T00:00:00.000Z`.
fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|timestamp| timestamp.date_naive())
    })
}

fn positive_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (number.is_finite() && number > 0.0).then_some(number)
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => parse_birth_date(&raw),
        _ => None,
    })
}

fn lenient_height<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(positive_number(&Value::deserialize(deserializer)?)
        .filter(|height| *height <= f64::from(u16::MAX))
        .map(|height| height.round() as u16))
}

fn lenient_weight<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(positive_number(&Value::deserialize(deserializer)?)
        .filter(|weight| *weight <= f64::from(f32::MAX))
        .map(|weight| weight as f32))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Null => None,
                Value::String(text) => Some(text),
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(text) => vec![text],
        _ => Vec::new(),
    })
}

/// A verification test the athlete completed (sprint, dribbling circuit, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTest {
    pub test_key: String,
    pub completed_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_strings_do_not_count_as_filled() {
        let profile = AthleteProfile {
            name: Some("   ".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2009, 4, 2),
            position: Some("Volante".to_string()),
            ..AthleteProfile::default()
        };
        assert!(!profile.has_basic_info());
    }

    #[test]
    fn skills_assessment_requires_content() {
        let mut profile = AthleteProfile::default();
        for empty in [json!(null), json!(""), json!({}), json!([])] {
            profile.skills_assessment = Some(empty);
            assert!(!profile.has_skills_assessment());
        }

        profile.skills_assessment = Some(json!({ "passe": 4 }));
        assert!(profile.has_skills_assessment());
    }

    #[test]
    fn league_history_counts_as_affiliation() {
        let profile = AthleteProfile {
            league_history: vec!["Copa SP Sub-15".to_string()],
            ..AthleteProfile::default()
        };
        assert!(profile.has_team_affiliation());
    }

    #[test]
    fn zero_measurements_are_unset() {
        let profile = AthleteProfile {
            height_cm: Some(0),
            weight_kg: Some(58.5),
            ..AthleteProfile::default()
        };
        assert!(!profile.has_physical_attributes());
    }

    #[test]
    fn odd_field_types_only_affect_their_own_field() {
        let profile: AthleteProfile = serde_json::from_value(json!({
            "name": "Ana",
            "birth_date": "2009-02-17T00:00:00.000Z",
            "position": "Goleira",
            "height_cm": 172.5,
            "weight_kg": "54.2",
            "phone": 5519999990000u64,
            "city": { "nome": "Campinas" },
            "league_history": "Paulista Sub-15",
            "skills_verified": true,
            "scout_validated": "yes"
        }))
        .expect("lenient profile");

        assert_eq!(profile.birth_date, NaiveDate::from_ymd_opt(2009, 2, 17));
        assert_eq!(profile.height_cm, Some(173));
        assert_eq!(profile.weight_kg, Some(54.2));
        assert_eq!(profile.phone.as_deref(), Some("5519999990000"));
        assert_eq!(profile.city, None);
        assert_eq!(profile.league_history, vec!["Paulista Sub-15".to_string()]);
        assert!(profile.skills_verified);
        assert!(!profile.scout_validated);
        assert!(profile.has_basic_info());
        assert!(profile.has_physical_attributes());
    }

    #[test]
    fn non_positive_or_unparseable_measurements_are_unset() {
        let profile: AthleteProfile = serde_json::from_value(json!({
            "height_cm": -170,
            "weight_kg": "heavy",
            "birth_date": "17/02/2009"
        }))
        .expect("lenient profile");

        assert_eq!(profile.height_cm, None);
        assert_eq!(profile.weight_kg, None);
        assert_eq!(profile.birth_date, None);
    }

    #[test]
    fn serialized_profile_reads_back_unchanged() {
        let profile = AthleteProfile {
            name: Some("Ana".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2010, 5, 1),
            height_cm: Some(158),
            weight_kg: Some(49.5),
            league_history: vec!["Copa Rio Sub-14".to_string()],
            skills_assessment: Some(json!({ "passe": 4 })),
            scout_validated: true,
            ..AthleteProfile::default()
        };
        let value = serde_json::to_value(&profile).expect("serializes");
        let read: AthleteProfile = serde_json::from_value(value).expect("deserializes");
        assert_eq!(read, profile);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let profile: AthleteProfile =
            serde_json::from_value(json!({ "name": "Ana" })).expect("lenient profile");
        assert_eq!(profile.name.as_deref(), Some("Ana"));
        assert!(!profile.skills_verified);
        assert!(profile.league_history.is_empty());
    }
}
