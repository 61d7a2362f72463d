pub mod output;
pub mod watch;

use std::{io::IsTerminal, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use output::{
    report::{life_grid, life_summary, progress_report, snapshot_line},
    Painter,
};
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use watch::watch_progress;

use crate::{
    error::ProfileError,
    progress::{
        entities::{
            Profile, ProgressStyle, Theme, DEFAULT_DISPLAY_NAME, DEFAULT_LIFE_EXPECTANCY,
            LIFE_EXPECTANCY_RANGE,
        },
        refresh::REFRESH_INTERVAL,
    },
    session::LifeSession,
    storage::profile_store::ProfileStore,
    utils::{
        clock::DefaultClock,
        dir::{logs_dir, resolve_application_path},
        logging::{enable_logging, APP_PREFIX},
        shutdown::detect_shutdown,
    },
};

#[derive(Parser, Debug)]
#[command(name = "lifeprogress", version, long_about = None)]
#[command(about = "Shows how much of your life, year, month, week and day has passed", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Enter your birth date and preferences. Needed before anything is shown")]
    Setup {
        #[command(flatten)]
        profile: SetupArgs,
    },
    #[command(about = "Display life progress and progress through the current day, week, month and year")]
    Show {
        #[arg(long, help = "Also draw the whole expected lifespan, one cell per week")]
        grid: bool,
        #[arg(long, help = "Disable colours")]
        plain: bool,
    },
    #[command(about = "Change a single profile setting")]
    Set {
        #[command(subcommand)]
        field: SetCommand,
    },
    #[command(about = "Keep printing progress as it changes until interrupted")]
    Watch {
        #[arg(long, help = "Disable colours")]
        plain: bool,
        #[arg(
            long,
            value_name = "SECONDS",
            default_value_t = REFRESH_INTERVAL.as_secs(),
            value_parser = clap::value_parser!(u64).range(1..),
            help = "Seconds between refreshes"
        )]
        interval: u64,
    },
    #[command(about = "Remove every stored setting and start over")]
    Reset {},
    #[command(about = "Print what is stored. Used for debugging")]
    Dump {},
}

#[derive(Parser, Debug)]
struct SetupArgs {
    #[arg(long, value_parser = parse_birth_date, help = "Birth date as YYYY-MM-DD")]
    birth: DateTime<Utc>,
    #[arg(
        long,
        default_value_t = DEFAULT_LIFE_EXPECTANCY,
        value_parser = clap::value_parser!(u32).range(expectancy_range()),
        help = "Expected lifespan in years"
    )]
    expectancy: u32,
    #[arg(long, default_value = DEFAULT_DISPLAY_NAME)]
    name: String,
    #[arg(long, value_enum, default_value_t = Theme::default())]
    theme: Theme,
    #[arg(long, value_enum, default_value_t = ProgressStyle::default())]
    style: ProgressStyle,
}

#[derive(Subcommand, Debug)]
enum SetCommand {
    #[command(about = "Birth date as YYYY-MM-DD")]
    Birth {
        #[arg(value_parser = parse_birth_date)]
        date: DateTime<Utc>,
    },
    #[command(about = "Expected lifespan in years")]
    Expectancy {
        #[arg(value_parser = clap::value_parser!(u32).range(expectancy_range()))]
        years: u32,
    },
    #[command(about = "Name shown above the progress")]
    Name { name: String },
    #[command(about = "Colour theme")]
    Theme {
        #[arg(value_enum)]
        theme: Theme,
    },
    #[command(about = "How progress bars are drawn")]
    Style {
        #[arg(value_enum)]
        style: ProgressStyle,
    },
}

fn expectancy_range() -> std::ops::RangeInclusive<i64> {
    i64::from(*LIFE_EXPECTANCY_RANGE.start())..=i64::from(*LIFE_EXPECTANCY_RANGE.end())
}

/// Interprets a calendar date as local midnight.
fn parse_birth_date(value: &str) -> Result<DateTime<Utc>, String> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))?;
    Local
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|v| v.with_timezone(&Utc))
        .ok_or_else(|| format!("{value} has no valid local time"))
}

fn rejected(error: ProfileError) -> anyhow::Error {
    Args::command()
        .error(clap::error::ErrorKind::ValueValidation, error.to_string())
        .into()
}

fn painter_for(profile: &Profile, plain: bool) -> Painter {
    Painter::new(
        profile.theme,
        profile.progress_style,
        !plain && std::io::stdout().is_terminal(),
    )
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = resolve_application_path(args.dir)?;
    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(APP_PREFIX, &logs_dir(&app_dir), logging_level, args.log)?;

    let store = ProfileStore::open(&app_dir);
    let mut session = LifeSession::open(store, Arc::new(DefaultClock));

    match args.commands {
        Commands::Setup { profile } => {
            let profile = Profile {
                birth_date: profile.birth,
                life_expectancy: profile.expectancy,
                display_name: profile.name,
                theme: profile.theme,
                progress_style: profile.style,
            };
            session.complete_onboarding(profile).map_err(rejected)?;
            print_report(&session, false, false);
            Ok(())
        }
        Commands::Show { grid, plain } => {
            if !session.is_onboarding_completed() {
                println!("Nothing to show yet. Run `lifeprogress setup --birth YYYY-MM-DD` first.");
                return Ok(());
            }
            print_report(&session, grid, plain);
            Ok(())
        }
        Commands::Set { field } => {
            match field {
                SetCommand::Birth { date } => session.update_birth_date(date),
                SetCommand::Expectancy { years } => session.update_life_expectancy(years),
                SetCommand::Name { name } => session.update_display_name(&name),
                SetCommand::Theme { theme } => {
                    session.update_theme(theme);
                    Ok(())
                }
                SetCommand::Style { style } => {
                    session.update_progress_style(style);
                    Ok(())
                }
            }
            .map_err(rejected)?;
            println!("{}", life_summary(&session.engine().snapshot().life));
            Ok(())
        }
        Commands::Watch { plain, interval } => {
            let painter = painter_for(&session.profile(), plain);
            let shutdown = CancellationToken::new();
            tokio::spawn(detect_shutdown(shutdown.clone()));
            watch_progress(
                session.engine().clone(),
                Duration::from_secs(interval),
                shutdown,
                |snapshot| println!("{}", snapshot_line(snapshot, &painter)),
            )
            .await;
            Ok(())
        }
        Commands::Reset {} => {
            session.reset();
            println!("All stored data removed.");
            Ok(())
        }
        Commands::Dump {} => {
            print!("{}", session.store().dump());
            Ok(())
        }
    }
}

fn print_report(session: &LifeSession, grid: bool, plain: bool) {
    let profile = session.profile();
    let painter = painter_for(&profile, plain);
    let snapshot = session.engine().snapshot();
    print!(
        "{}",
        progress_report(&profile, &snapshot, session.age(), &painter)
    );
    if grid {
        println!();
        println!("{}", life_grid(&snapshot.life, &painter));
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, Timelike};
    use clap::Parser;

    use crate::progress::entities::Theme;

    use super::{parse_birth_date, Args, Commands, SetCommand};

    #[test]
    fn birth_date_is_local_midnight() {
        let parsed = parse_birth_date("1990-06-15").unwrap().with_timezone(&Local);
        assert_eq!(parsed.date_naive().to_string(), "1990-06-15");
        assert_eq!(parsed.hour(), 0);

        assert!(parse_birth_date("15/06/1990").is_err());
        assert!(parse_birth_date("1990-02-30").is_err());
    }

    #[test]
    fn setup_arguments() {
        let args = Args::parse_from([
            "lifeprogress",
            "setup",
            "--birth",
            "1990-06-15",
            "--expectancy",
            "90",
            "--theme",
            "forest-green",
        ]);
        let Commands::Setup { profile } = args.commands else {
            panic!("expected setup");
        };
        assert_eq!(profile.expectancy, 90);
        assert_eq!(profile.theme, Theme::ForestGreen);
        assert_eq!(profile.name, "My Life");
    }

    #[test]
    fn expectancy_range_is_enforced_by_parser() {
        assert!(Args::try_parse_from(["lifeprogress", "set", "expectancy", "49"]).is_err());
        assert!(Args::try_parse_from(["lifeprogress", "set", "expectancy", "121"]).is_err());

        let args =
            Args::try_parse_from(["lifeprogress", "--dir", "/tmp/x", "set", "expectancy", "120"])
                .unwrap();
        assert!(matches!(
            args.commands,
            Commands::Set {
                field: SetCommand::Expectancy { years: 120 }
            }
        ));
    }

    #[test]
    fn log_flag_is_accepted_after_the_subcommand() {
        let args = Args::try_parse_from(["lifeprogress", "show", "--log"]).unwrap();
        assert!(args.log);
        assert!(matches!(args.commands, Commands::Show { .. }));

        let args = Args::try_parse_from(["lifeprogress", "--log", "dump"]).unwrap();
        assert!(args.log);
    }
}
