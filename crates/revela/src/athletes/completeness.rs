use super::domain::{is_filled, AthleteProfile};
use super::pyramid::percentage;

/// Fields an athlete must fill before the profile counts as complete.
pub const REQUIRED_PROFILE_FIELDS: [&str; 9] = [
    "name",
    "birth_date",
    "position",
    "height_cm",
    "weight_kg",
    "city",
    "state",
    "phone",
    "preferred_foot",
];

/// Rounded share of [`REQUIRED_PROFILE_FIELDS`] that is filled. Absent profiles score 0.
pub fn profile_completeness(profile: Option<&AthleteProfile>) -> u8 {
    let Some(profile) = profile else {
        return 0;
    };

    let filled = [
        is_filled(&profile.name),
        profile.birth_date.is_some(),
        is_filled(&profile.position),
        profile.has_height(),
        profile.has_weight(),
        is_filled(&profile.city),
        is_filled(&profile.state),
        is_filled(&profile.phone),
        is_filled(&profile.preferred_foot),
    ]
    .into_iter()
    .filter(|filled| *filled)
    .count() as u32;

    percentage(filled, REQUIRED_PROFILE_FIELDS.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn five_of_nine() -> AthleteProfile {
        AthleteProfile {
            name: Some("Lucas Ferreira".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2008, 11, 3),
            position: Some("Atacante".to_string()),
            height_cm: Some(172),
            weight_kg: Some(63.0),
            ..AthleteProfile::default()
        }
    }

    #[test]
    fn five_of_nine_fields_rounds_to_56() {
        assert_eq!(profile_completeness(Some(&five_of_nine())), 56);
    }

    #[test]
    fn absent_profile_is_zero() {
        assert_eq!(profile_completeness(None), 0);
        assert_eq!(profile_completeness(Some(&AthleteProfile::default())), 0);
    }

    #[test]
    fn all_fields_reach_one_hundred() {
        let mut profile = five_of_nine();
        profile.city = Some("Campinas".to_string());
        profile.state = Some("SP".to_string());
        profile.phone = Some("+55 19 99999-0000".to_string());
        profile.preferred_foot = Some("direito".to_string());
        assert_eq!(profile_completeness(Some(&profile)), 100);
    }

    #[test]
    fn fields_outside_the_list_are_ignored() {
        let profile = AthleteProfile {
            current_team: Some("Guarani".to_string()),
            skills_verified: true,
            ..AthleteProfile::default()
        };
        assert_eq!(profile_completeness(Some(&profile)), 0);
    }
}
