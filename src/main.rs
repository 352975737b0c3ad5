use clap::Parser;
use course_schedule::config::BusyQuery;
use course_schedule::utils::logger::{self, LogFormat};
use course_schedule::utils::validation::Validate;
use course_schedule::{CliConfig, ScheduleFile, ScheduleSet};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Summary<'a> {
    name: Option<&'a str>,
    sections: Vec<&'a str>,
    total_credits: i32,
    earliest_start: Option<String>,
    latest_end: Option<String>,
    busy: Vec<BusyAnswer>,
}

#[derive(Debug, Serialize)]
struct BusyAnswer {
    #[serde(flatten)]
    query: BusyQuery,
    busy: bool,
}

fn clock(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

fn summarize<'a>(
    file: &'a ScheduleFile,
    schedule: &'a ScheduleSet,
    queries: &[BusyQuery],
) -> Summary<'a> {
    Summary {
        name: file.name(),
        sections: schedule.iter().map(|s| s.crn.as_str()).collect(),
        total_credits: schedule.total_credits(),
        earliest_start: schedule.earliest_start().map(clock),
        latest_end: schedule.latest_end().map(clock),
        busy: queries
            .iter()
            .map(|q| BusyAnswer {
                query: *q,
                busy: schedule.is_busy(q.day, q.minute),
            })
            .collect(),
    }
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(config.verbose, format);

    tracing::info!("Loading schedule from: {}", config.file);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = ScheduleFile::from_file(&config.file)
        .and_then(|file| file.build_schedule().map(|schedule| (file, schedule)));

    let (file, schedule) = match result {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Schedule rejected: {} (category: {:?})", e, e.category());
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(match e.category() {
                course_schedule::utils::error::ErrorCategory::Conflict => 2,
                _ => 1,
            });
        }
    };

    let summary = summarize(&file, &schedule, &config.busy);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    for section in &schedule {
        println!("{}", section);
    }
    println!("Total credits: {}", summary.total_credits);
    if let (Some(start), Some(end)) = (&summary.earliest_start, &summary.latest_end) {
        println!("Day span: {} - {}", start, end);
    }
    for answer in &summary.busy {
        println!(
            "{} {}: {}",
            answer.query.day,
            clock(answer.query.minute),
            if answer.busy { "busy" } else { "free" }
        );
    }

    Ok(())
}
