use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use routine_core::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "routine")]
#[command(about = "Personalized weekly training plans with progression tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// User whose records to use
    #[arg(long, global = true, default_value = "default")]
    user: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and store a weekly plan from a training profile
    Onboard {
        /// Training days per week (3 or 4)
        #[arg(long)]
        frequency: u8,

        /// beginner, intermediate or advanced
        #[arg(long, default_value = "beginner")]
        level: ExperienceLevel,

        /// muscle, fat-loss or strength
        #[arg(long, default_value = "muscle")]
        goal: Goal,

        /// gym, home or bodyweight
        #[arg(long, default_value = "gym")]
        equipment: Equipment,
    },

    /// Rebuild the plan from the stored profile
    Regenerate,

    /// Show the workout for a day (default)
    Today {
        /// Date to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Show the Sunday-first week around a day
    Week {
        /// Date to center on (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Log a completed session
    Complete {
        /// Session date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Exercise completed; repeat for several. Defaults to the planned workout
        #[arg(long = "exercise")]
        exercises: Vec<String>,
    },

    /// Show level, experience, streak, weight and recent activity
    Stats {
        /// Day to report as of (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Log body weight; a second entry on the same day replaces the first
    Weight {
        /// Body weight in kilograms
        #[arg(long)]
        kg: f64,

        /// Date weighed (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// List recent training days
    History {
        /// Maximum number of days to list
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete the sessions logged on a date
    Delete {
        /// Date to clear (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// Export session history to CSV
    Export {
        /// Destination file
        #[arg(long)]
        out: PathBuf,
    },

    /// List exercises that can replace the given one
    Substitutes {
        /// Exercise name
        name: String,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    routine_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_validation() {
                eprintln!("error: {}", e);
            } else if e.is_storage() {
                eprintln!("error: could not access stored data: {}", e);
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let user = UserId::new(cli.user.as_str())?;

    let catalog = build_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let history_limit = config.history.recent_limit;
    let trainer = Trainer::new(FileStore::new(data_dir, catalog.clone()), catalog, config);

    match cli.command {
        Some(Commands::Onboard {
            frequency,
            level,
            goal,
            equipment,
        }) => {
            let profile = TrainingProfile {
                frequency,
                experience_level: level,
                goal,
                equipment,
            };
            let plan = trainer.onboard(&user, &profile)?;
            println!("✓ Plan created ({} days per week)", frequency);
            display_plan(&plan);
            Ok(())
        }
        Some(Commands::Regenerate) => {
            let plan = trainer.regenerate(&user)?;
            println!("✓ Plan regenerated");
            display_plan(&plan);
            Ok(())
        }
        Some(Commands::Today { date }) => cmd_today(&trainer, &user, resolve_date(date)?),
        Some(Commands::Week { date }) => cmd_week(&trainer, &user, resolve_date(date)?),
        Some(Commands::Complete { date, exercises }) => {
            cmd_complete(&trainer, &user, resolve_date(date)?, exercises)
        }
        Some(Commands::Stats { date }) => cmd_stats(&trainer, &user, resolve_date(date)?),
        Some(Commands::Weight { kg, date }) => {
            let entry = trainer.log_weight(&user, resolve_date(date)?, kg)?;
            println!("✓ Weight logged: {:.1} kg on {}", entry.kg, entry.date);
            Ok(())
        }
        Some(Commands::History { limit }) => {
            let entries = trainer.history(&user, limit.unwrap_or(history_limit))?;
            if entries.is_empty() {
                println!("No sessions logged yet.");
            }
            for entry in entries {
                println!(
                    "  {}  {} exercises",
                    entry.date.format("%b %d %Y"),
                    entry.exercise_count
                );
            }
            Ok(())
        }
        Some(Commands::Delete { date }) => {
            let date = parse_date(&date)?;
            let removed = trainer.delete_session(&user, date)?;
            if removed == 0 {
                println!("No sessions found on {}.", date);
            } else {
                println!("✓ Deleted {} session(s) on {}", removed, date);
            }
            Ok(())
        }
        Some(Commands::Export { out }) => {
            let count = trainer.export(&user, &out)?;
            println!("✓ Exported {} sessions to CSV", count);
            println!("  CSV: {}", out.display());
            Ok(())
        }
        Some(Commands::Substitutes { name }) => {
            let subs = trainer.catalog().substitutes(&name);
            if subs.is_empty() {
                println!("No known substitutes for '{}'.", name);
            }
            for sub in subs {
                println!("  → {}", sub);
            }
            Ok(())
        }
        None => cmd_today(&trainer, &user, local_today()),
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn resolve_date(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(s) => parse_date(&s),
        None => Ok(local_today()),
    }
}

fn cmd_today(trainer: &Trainer<FileStore>, user: &UserId, date: NaiveDate) -> Result<()> {
    let day = trainer.today(user, date)?;

    println!("\n{}", date.format("%A, %B %d"));
    if day.is_needs_setup() {
        println!("  {}", day.label);
        println!("  Run `routine onboard --frequency 3` to create your plan.");
        return Ok(());
    }

    display_day(&day);
    Ok(())
}

fn cmd_week(trainer: &Trainer<FileStore>, user: &UserId, anchor: NaiveDate) -> Result<()> {
    let week = trainer.week(user, anchor)?;

    let header: Vec<_> = week.iter().map(|d| format!("{:^5}", d.day_name)).collect();
    let letters: Vec<_> = week
        .iter()
        .map(|d| {
            if d.is_today {
                format!("[{}]", d.display_letter)
            } else {
                format!(" {} ", d.display_letter)
            }
        })
        .map(|s| format!("{:^5}", s))
        .collect();

    println!("{}", header.join(""));
    println!("{}", letters.join(""));
    println!();
    for day in &week {
        let marker = if day.is_today { "→" } else { " " };
        println!("{} {} {}  {}", marker, day.day_name, day.date.format("%m-%d"), day.label);
    }
    Ok(())
}

fn cmd_complete(
    trainer: &Trainer<FileStore>,
    user: &UserId,
    date: NaiveDate,
    exercises: Vec<String>,
) -> Result<()> {
    let outcome = trainer.complete_session(user, date, exercises)?;

    for notification in &outcome.notifications {
        match notification {
            Notification::SessionLogged { xp_gained } => {
                println!("✓ Session logged! +{} XP", xp_gained);
            }
            Notification::LevelUp { level } => {
                println!("★ Level up! You reached level {}", level);
            }
        }
    }
    println!(
        "  Level {} · {} XP",
        outcome.progress.level, outcome.progress.experience
    );
    Ok(())
}

fn cmd_stats(trainer: &Trainer<FileStore>, user: &UserId, today: NaiveDate) -> Result<()> {
    let stats = trainer.stats(user, today)?;

    println!("Level:          {}", stats.progress.level);
    println!("Experience:     {} XP", stats.progress.experience);
    println!("Streak:         {} day(s)", stats.streak);
    println!("Total workouts: {}", stats.total_workouts);
    match stats.current_weight {
        Some(kg) => println!("Weight:         {:.1} kg", kg),
        None => println!("Weight:         not logged"),
    }

    println!("\nLast {} days:", stats.activity.len());
    for day in &stats.activity {
        println!(
            "  {}  {}",
            day.date.format("%a"),
            "■".repeat(day.exercise_count)
        );
    }

    if stats.weights.len() > 1 {
        println!("\nWeight log:");
        for entry in &stats.weights {
            println!("  {}  {:.1} kg", entry.date.format("%m-%d"), entry.kg);
        }
    }

    if !stats.recent.is_empty() {
        println!("\nRecent sessions:");
        for entry in &stats.recent {
            println!(
                "  {}  {} exercises",
                entry.date.format("%b %d"),
                entry.exercise_count
            );
        }
    }
    Ok(())
}

fn display_plan(plan: &WeeklyPlan) {
    const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    for (index, day) in plan.training_days() {
        println!("\n{}: {}", DAY_NAMES[index], day.label);
        for exercise in &day.exercises {
            println!(
                "  → {}: {} × {}",
                exercise.name, exercise.sets, exercise.rep_range
            );
        }
    }
}

fn display_day(day: &DayPlan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", day.label);
    println!("╰─────────────────────────────────────────╯");

    if day.is_rest_day() {
        println!("\n  Recover and come back tomorrow.");
        return;
    }

    println!();
    for exercise in &day.exercises {
        println!(
            "  → {}: {} × {}",
            exercise.name, exercise.sets, exercise.rep_range
        );
        println!("    ℹ {}", exercise.media_ref);
    }
    println!();
}
