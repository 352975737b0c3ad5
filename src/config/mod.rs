pub mod schedule_file;

pub use schedule_file::ScheduleFile;

#[cfg(feature = "cli")]
pub use cli::{BusyQuery, CliConfig};

#[cfg(feature = "cli")]
pub mod cli {
    use crate::core::{Day, Minute};
    use crate::domain::model::parse_clock;
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::Parser;
    use serde::Serialize;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "course-schedule")]
    #[command(about = "Check a student's sections for time conflicts")]
    pub struct CliConfig {
        /// Path to the TOML schedule file
        #[arg(short, long, default_value = "schedule.toml")]
        pub file: String,

        /// Busy checks such as `Mon@09:30` or `R@14:00`
        #[arg(long, value_parser = parse_busy_query)]
        pub busy: Vec<BusyQuery>,

        /// Print the summary as JSON
        #[arg(long)]
        pub json: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        pub log_json: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("file", &self.file)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct BusyQuery {
        pub day: Day,
        pub minute: Minute,
    }

    pub fn parse_busy_query(value: &str) -> std::result::Result<BusyQuery, String> {
        let (day, time) = value
            .split_once('@')
            .ok_or_else(|| format!("expected DAY@HH:MM, got '{}'", value))?;
        let day = day.parse::<Day>().map_err(|e| e.to_string())?;
        let minute = parse_clock(time).map_err(|e| e.to_string())?;
        Ok(BusyQuery { day, minute })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_busy_query() {
            assert_eq!(
                parse_busy_query("Mon@09:30").unwrap(),
                BusyQuery { day: Day::Mon, minute: 570 }
            );
            assert_eq!(parse_busy_query("R@14:00").unwrap().day, Day::Thu);
            assert!(parse_busy_query("Mon 09:30").is_err());
            assert!(parse_busy_query("Sun@09:30").is_err());
        }

        #[test]
        fn test_cli_defaults() {
            let config = CliConfig::parse_from(["course-schedule", "--busy", "W@10:00"]);
            assert_eq!(config.file, "schedule.toml");
            assert_eq!(config.busy.len(), 1);
            assert!(config.validate().is_ok());
        }
    }
}
