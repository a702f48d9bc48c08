use crate::infra::{InMemoryAthleteRepository, InMemoryKeyValueStore};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use revela::athletes::{
    profile_completeness, AthleteId, AthleteProfile, CompletedTest, EvaluationResult,
    ProgressEvaluator, ProgressView, VerificationService,
};
use revela::config::StreakConfig;
use revela::error::AppError;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Athlete profile snapshot (JSON)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Number of completed verification tests
    #[arg(long, default_value_t = 0)]
    pub(crate) tests: u32,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reporting date for streaks (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs { profile, tests } = args;

    let raw = std::fs::read_to_string(&profile)?;
    let snapshot = match serde_json::from_str::<Value>(&raw) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!(
                "warning: {} is not valid JSON ({err}); scoring as an empty profile",
                profile.display()
            );
            Value::Null
        }
    };

    let result = ProgressEvaluator::standard().evaluate_snapshot(&snapshot, tests);
    let completeness = serde_json::from_value::<AthleteProfile>(snapshot)
        .ok()
        .map(|profile| profile_completeness(Some(&profile)))
        .unwrap_or(0);

    println!("Trust pyramid evaluation ({})", profile.display());
    println!("Completed tests: {tests}");
    println!("Profile completeness: {completeness}%");
    render_evaluation(&result);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = VerificationService::new(
        Arc::new(InMemoryAthleteRepository::default()),
        Arc::new(InMemoryKeyValueStore::default()),
        &StreakConfig::default(),
    );
    let athlete = AthleteId("demo-athlete".to_string());

    println!("Revela progress demo (as of {today})");

    let mut profile = AthleteProfile {
        name: Some("Gabriel Nunes".to_string()),
        birth_date: NaiveDate::from_ymd_opt(2009, 3, 12),
        position: Some("Volante".to_string()),
        height_cm: Some(170),
        weight_kg: Some(61.5),
        ..AthleteProfile::default()
    };
    service.save_profile(&athlete, profile.clone())?;
    render_step("Basic profile saved", &service.progress(&athlete, today)?);

    profile.skills_assessment = Some(json!({
        "passe": 4,
        "marcacao": 5,
        "observacoes": "Boa leitura de jogo"
    }));
    profile.city = Some("Fortaleza".to_string());
    profile.state = Some("CE".to_string());
    profile.phone = Some("+55 85 96666-3333".to_string());
    profile.preferred_foot = Some("direito".to_string());
    profile.current_team = Some("Ceara Sub-15".to_string());
    service.save_profile(&athlete, profile.clone())?;
    render_step(
        "Self-assessment and contact details added",
        &service.progress(&athlete, today)?,
    );

    for (offset, test_key) in ["sprint_30m", "yo_yo_intermitente", "passe_curto"]
        .iter()
        .enumerate()
    {
        service.record_test(
            &athlete,
            CompletedTest {
                test_key: test_key.to_string(),
                completed_on: today - Duration::days(3 - offset as i64),
                score: Some(70 + offset as u16 * 5),
            },
        )?;
    }
    profile.skills_verified = true;
    service.save_profile(&athlete, profile)?;
    render_step(
        "Three tests completed and skills verified",
        &service.progress(&athlete, today)?,
    );

    for days_ago in (0..7).rev() {
        service.check_in(&athlete, today - Duration::days(days_ago))?;
    }
    render_step("Seven daily check-ins", &service.progress(&athlete, today)?);

    Ok(())
}

fn render_step(title: &str, view: &ProgressView) {
    println!("\n== {title}");
    println!(
        "Completed tests: {} | profile completeness: {}% | streak: {} (best {})",
        view.completed_tests, view.profile_completeness, view.current_streak, view.streak.longest
    );
    render_evaluation(&view.evaluation);

    if view.achievements.is_empty() {
        println!("Achievements: none yet");
    } else {
        let titles: Vec<&str> = view
            .achievements
            .iter()
            .map(|achievement| achievement.title)
            .collect();
        println!("Achievements: {}", titles.join(", "));
    }
}

fn render_evaluation(result: &EvaluationResult) {
    println!(
        "Overall: {}% -> {} tier",
        result.overall_percentage, result.current_tier_label
    );

    for tier in &result.tiers {
        println!("- {}: {}%", tier.label, tier.percentage);
        for requirement in &tier.requirements {
            let mark = if requirement.completed { "x" } else { " " };
            println!(
                "    [{mark}] {} (weight {})",
                requirement.label, requirement.weight
            );
        }
    }
}
