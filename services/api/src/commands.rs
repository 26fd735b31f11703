use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use fitness_ladder::error::AppError;
use fitness_ladder::history::{AssessmentHistoryImporter, HistoryFormat};
use fitness_ladder::scoring::ladder::{age_factor, raw_ladder_score};
use fitness_ladder::scoring::{
    apply_limit_break, compute_ladder_score, compute_radar_data, summarize_at, AssessmentInput,
    Category, RadarPoint, StatsSummary, TimeWindow,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Strength sub-score
    #[arg(long, default_value_t = 0.0)]
    pub(crate) strength: f64,
    /// Cardio sub-score
    #[arg(long, default_value_t = 0.0)]
    pub(crate) cardio: f64,
    /// Power sub-score
    #[arg(long, default_value_t = 0.0)]
    pub(crate) power: f64,
    /// Muscle sub-score
    #[arg(long, default_value_t = 0.0)]
    pub(crate) muscle: f64,
    /// FFMI sub-score
    #[arg(long, default_value_t = 0.0)]
    pub(crate) ffmi: f64,
    /// Athlete age in years
    #[arg(long)]
    pub(crate) age: Option<u32>,
    /// Treat sub-scores as 0-100 instead of 0-1
    #[arg(long)]
    pub(crate) percent: bool,
    /// Athlete is verified and may exceed the 100 point cap
    #[arg(long)]
    pub(crate) verified: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RadarArgs {
    /// Comma-separated scores: strength,cardio,power,muscle,body fat
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) scores: Vec<f64>,
    /// Comma-separated maxima aligned with --scores
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) max_scores: Vec<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// Assessment history export (JSON array or CSV)
    #[arg(long)]
    pub(crate) history: PathBuf,
    /// Force the history format instead of guessing from the extension
    #[arg(long)]
    pub(crate) format: Option<HistoryFormat>,
    /// week, month, year, or all
    #[arg(long, default_value = "all")]
    pub(crate) window: String,
    /// Evaluate the window as of the end of this date (YYYY-MM-DD, defaults to now)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let input = score_input(&args);
    let score = compute_ladder_score(&input);
    let raw = raw_ladder_score(&input);
    let ranked = apply_limit_break(raw, args.verified);

    println!("Ladder score");
    for category in Category::ordered() {
        println!(
            "- {:<8} {:>6.3} x {:.2}",
            category.label(),
            input.value(category),
            category.weight()
        );
    }
    match input.age {
        Some(age) => println!("Age factor: {:.2} (age {age})", age_factor(Some(age))),
        None => println!("Age factor: 1.00 (age not provided)"),
    }
    println!("\nScore: {score}");
    if ranked < raw {
        println!("Ladder rank uses {ranked:.0} (unverified scores are capped at 100)");
    }

    Ok(())
}

pub(crate) fn run_radar(args: RadarArgs) -> Result<(), AppError> {
    let points = compute_radar_data(&args.scores, &args.max_scores)?;
    render_radar(&points);
    Ok(())
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let StatsArgs {
        history,
        format,
        window,
        as_of,
    } = args;

    let records = AssessmentHistoryImporter::from_path(&history, format)?;
    let window = TimeWindow::parse(&window);
    let now = evaluation_instant(as_of);
    let summary = summarize_at(&records, window, now);

    println!("Assessment history: {}", history.display());
    println!(
        "Window: {} (evaluated {})",
        window.as_str(),
        now.format("%Y-%m-%d %H:%M UTC")
    );
    render_summary(&summary);
    Ok(())
}

fn score_input(args: &ScoreArgs) -> AssessmentInput {
    if args.percent {
        AssessmentInput::from_percentages(
            args.strength,
            args.cardio,
            args.power,
            args.muscle,
            args.ffmi,
            args.age,
        )
    } else {
        AssessmentInput {
            strength: args.strength,
            cardio: args.cardio,
            power: args.power,
            muscle: args.muscle,
            ffmi: args.ffmi,
            age: args.age,
        }
    }
}

fn evaluation_instant(as_of: Option<NaiveDate>) -> DateTime<Utc> {
    as_of
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
        .unwrap_or_else(Utc::now)
}

fn render_radar(points: &[RadarPoint]) {
    println!("Radar chart");
    for point in points {
        println!("- {:<12} {:>6.1}%", point.label.label(), point.value);
    }
}

fn render_summary(summary: &StatsSummary) {
    println!("\nAssessments in window: {}", summary.total);
    if summary.average.is_empty() {
        println!("Averages: no data");
        return;
    }

    println!("Averages");
    for (category, average) in &summary.average {
        println!("- {}: {:.1}", category.label(), average);
    }
}
