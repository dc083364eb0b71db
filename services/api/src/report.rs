use crate::infra::parse_policy;
use chrono::Utc;
use clap::Args;
use gradebook::config::{AppConfig, GpaConfig};
use gradebook::error::AppError;
use gradebook::gpa::{ConversionPolicy, GpaEngine, InputMode};
use gradebook::import::TranscriptImporter;
use gradebook::records::UserId;
use gradebook::transcript::TranscriptReport;
use std::fmt::Write as _;
use std::path::PathBuf;

const LOCAL_USER: &str = "local";

#[derive(Args, Debug)]
pub(crate) struct ConvertArgs {
    /// Score on the 10-point scale to convert to the 4-point scale
    #[arg(long, conflicts_with = "score4", required_unless_present = "score4")]
    pub(crate) score10: Option<f64>,
    /// Score on the 4-point scale to convert back to the 10-point scale
    #[arg(long)]
    pub(crate) score4: Option<f64>,
    /// Conversion policy: linear, standard_table or semester_table
    #[arg(long, value_parser = parse_policy)]
    pub(crate) policy: Option<ConversionPolicy>,
}

#[derive(Args, Debug)]
pub(crate) struct TranscriptArgs {
    /// CSV export with one row per grade component
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Conversion policy used for the 4-point figures
    #[arg(long, value_parser = parse_policy)]
    pub(crate) policy: Option<ConversionPolicy>,
    /// Reject negative weights, zero credits and out-of-range scores
    #[arg(long)]
    pub(crate) strict: bool,
    /// Include every course with its average under each semester
    #[arg(long)]
    pub(crate) list_courses: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScaleArgs {
    /// Print a single policy instead of every table
    #[arg(long, value_parser = parse_policy)]
    pub(crate) policy: Option<ConversionPolicy>,
}

pub(crate) fn run_convert(args: ConvertArgs) -> Result<(), AppError> {
    let defaults = AppConfig::load()?.gpa;
    let policy = resolve_engine(defaults, args.policy, false).policy();
    print!("{}", render_conversion(policy, args.score10, args.score4));
    Ok(())
}

pub(crate) fn run_transcript(args: TranscriptArgs) -> Result<(), AppError> {
    let TranscriptArgs {
        csv,
        policy,
        strict,
        list_courses,
    } = args;

    let engine = resolve_engine(AppConfig::load()?.gpa, policy, strict);

    let records = TranscriptImporter::from_path(&csv, &UserId::new(LOCAL_USER), Utc::now())?;
    let report = TranscriptReport::build(&records, &engine)?;

    println!("Transcript: {}", csv.display());
    print!("{}", render_transcript(&report, list_courses));
    Ok(())
}

/// Command-line flags override the configured grading defaults; `--strict` only ever tightens.
fn resolve_engine(
    defaults: GpaConfig,
    policy: Option<ConversionPolicy>,
    strict: bool,
) -> GpaEngine {
    let mode = if strict {
        InputMode::Strict
    } else {
        defaults.input_mode
    };
    GpaEngine::new(policy.unwrap_or(defaults.policy), mode)
}

pub(crate) fn run_scale(args: ScaleArgs) -> Result<(), AppError> {
    let policies = match args.policy {
        Some(policy) => vec![policy],
        None => ConversionPolicy::ALL.to_vec(),
    };

    for policy in policies {
        print!("{}", render_scale(policy));
    }
    Ok(())
}

pub(crate) fn render_conversion(
    policy: ConversionPolicy,
    score10: Option<f64>,
    score4: Option<f64>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Policy: {}", policy.label());

    if let Some(score10) = score10 {
        let _ = writeln!(
            out,
            "{:.2} / 10 -> {:.2} / 4",
            score10,
            policy.to_four(score10)
        );
        if let Some(letter) = policy.letter_grade(score10) {
            let _ = writeln!(out, "Letter grade: {letter}");
        }
    }

    if let Some(score4) = score4 {
        let _ = writeln!(out, "{:.2} / 4 -> {} / 10", score4, policy.to_ten(score4));
    }

    out
}

pub(crate) fn render_transcript(report: &TranscriptReport, list_courses: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Policy: {}", report.policy.label());

    if report.semesters.is_empty() {
        let _ = writeln!(out, "\nNo semesters recorded");
    }

    for semester in &report.semesters {
        let letter = semester
            .letter_grade
            .map(|letter| format!(" ({letter})"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "\n{}: GPA {:.2} / 10 | {:.2} / 4{} | {} credits ({} counted)",
            semester.name,
            semester.semester_gpa10,
            semester.semester_gpa4,
            letter,
            semester.total_credits,
            semester.gpa_credits
        );

        if list_courses {
            for course in &semester.courses {
                let mut flags = Vec::new();
                if !course.counts_toward_gpa {
                    flags.push("not counted");
                }
                if !course.passed {
                    flags.push("failed");
                }
                let suffix = if flags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", flags.join(", "))
                };
                let _ = writeln!(
                    out,
                    "  - {} ({} cr): {:.1}{}",
                    course.name, course.credit, course.average_score, suffix
                );
            }
        }
    }

    let _ = writeln!(
        out,
        "\nCumulative GPA: {:.2} / 10 | {:.2} / 4",
        report.cumulative_gpa10, report.cumulative_gpa4
    );
    let _ = writeln!(out, "Total credits: {}", report.total_credits);
    if let Some(latest) = report.latest_semester_gpa10 {
        let _ = writeln!(out, "Latest semester GPA: {latest:.2}");
    }

    out
}

pub(crate) fn render_scale(policy: ConversionPolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", policy.label());

    let bands = policy.bands();
    if bands.is_empty() {
        let _ = writeln!(out, "  score4 = score10 / 10 * 4 (no letter grades)");
        return out;
    }

    for band in bands {
        let _ = writeln!(
            out,
            "  {:<12} {:>4.1}  {}",
            band.range_label, band.score4, band.letter
        );
    }
    out
}
