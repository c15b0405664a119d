use crate::server;
use clap::{Args, Parser, Subcommand};
use school_grading::error::AppError;
use school_grading::grading::{select_grader, CurriculumGrader, GradeResult};
use school_grading::results::{merge_components, ComponentKind, MarkEntry, ResultServiceError};

#[derive(Parser, Debug)]
#[command(
    name = "School Grading Engine",
    about = "Grade curriculum marks from the command line or serve the grading API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Grade one subject and print the result as JSON
    Grade(GradeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct GradeArgs {
    /// Class level, e.g. P6, S3 or S6
    #[arg(long)]
    pub(crate) level: String,
    /// Coursework or school-based mark as SCORE/MAX (repeatable)
    #[arg(long, value_parser = parse_fraction)]
    pub(crate) coursework: Vec<(f64, f64)>,
    /// Examination or external mark as SCORE/MAX (repeatable)
    #[arg(long, value_parser = parse_fraction)]
    pub(crate) exam: Vec<(f64, f64)>,
    /// Paper mark as SCORE or SCORE/MAX, numbered in the order given (repeatable)
    #[arg(long, value_parser = parse_paper)]
    pub(crate) paper: Vec<(f64, f64)>,
}

impl GradeArgs {
    fn mark_entries(&self) -> Result<Vec<MarkEntry>, AppError> {
        let coursework = self
            .coursework
            .iter()
            .map(|(score, max)| MarkEntry::new(ComponentKind::Coursework, *score, *max));
        let exam = self
            .exam
            .iter()
            .map(|(score, max)| MarkEntry::new(ComponentKind::Examination, *score, *max));
        let mut entries: Vec<MarkEntry> = coursework.chain(exam).collect();

        for (index, (score, max)) in self.paper.iter().enumerate() {
            let number = u8::try_from(index + 1).map_err(|_| {
                AppError::Input(format!(
                    "at most {} --paper marks are accepted, got {}",
                    u8::MAX,
                    self.paper.len()
                ))
            })?;
            entries.push(MarkEntry::new(ComponentKind::Paper { number }, *score, *max));
        }

        Ok(entries)
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Grade(args) => {
            let result = grade_from_args(&args)?;
            let rendered = serde_json::to_string_pretty(&result)
                .map_err(|err| AppError::Input(err.to_string()))?;
            println!("{rendered}");
            Ok(())
        }
    }
}

pub(crate) fn grade_from_args(args: &GradeArgs) -> Result<GradeResult, AppError> {
    let grader = select_grader(&args.level)
        .ok_or_else(|| ResultServiceError::UnknownLevel(args.level.clone()))?;
    let input = merge_components(grader.curriculum(), &args.mark_entries()?)
        .map_err(ResultServiceError::from)?;
    let result = grader.grade(&input).map_err(ResultServiceError::from)?;
    Ok(result)
}

pub(crate) fn parse_fraction(raw: &str) -> Result<(f64, f64), String> {
    let (score, max) = raw
        .split_once('/')
        .ok_or_else(|| format!("expected SCORE/MAX, got '{raw}'"))?;
    Ok((parse_number(score)?, parse_number(max)?))
}

pub(crate) fn parse_paper(raw: &str) -> Result<(f64, f64), String> {
    if raw.contains('/') {
        parse_fraction(raw)
    } else {
        Ok((parse_number(raw)?, 100.0))
    }
}

fn parse_number(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))
}
