use chrono::NaiveDate;
use cycle_core::*;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "luna")]
#[command(about = "Personal cycle tracker with phase reminders", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's phase and the next predicted start (default)
    Today,

    /// Record a new cycle
    Record {
        /// First day of the cycle (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of bleeding (defaults to start + period length - 1)
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Show the phase for a specific date
    Query {
        /// Date to look up (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },

    /// List recorded cycles
    History,

    /// Summarize recorded cycles
    Stats,

    /// Export recorded cycles to CSV
    Export {
        /// Output CSV path
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    cycle_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let profile_path = Config::profile_path(&data_dir);
    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let load = || CycleProfile::load(&profile_path);

    match cli.command {
        Some(Commands::Record { start, end }) => {
            return cmd_record(&profile_path, start.unwrap_or(today), end, today, &config);
        }
        Some(Commands::Query { date }) => cmd_query(&load()?, date, &config),
        Some(Commands::History) => cmd_history(&load()?),
        Some(Commands::Stats) => cmd_stats(&load()?),
        Some(Commands::Export { out }) => {
            let count = export_csv(&load()?, &out)?;
            println!("✓ Exported {} cycles to {}", count, out.display());
        }
        Some(Commands::Today) | None => cmd_today(&load()?, today, &config),
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_record(
    profile_path: &Path,
    start: NaiveDate,
    end: Option<NaiveDate>,
    today: NaiveDate,
    config: &Config,
) -> Result<ExitCode> {
    let mut outcome = None;

    let result = CycleProfile::update(profile_path, |profile| {
        if let Some(latest) = profile.latest() {
            println!("Latest recorded start: {}", latest.start.format("%Y/%m/%d"));
        }
        let recorded = profile.record_cycle(start, end, today, &config.phases)?;
        let next = recorded.profile.clone();
        outcome = Some(recorded);
        Ok::<_, Error>(next)
    });

    match result {
        Ok(_) => {}
        Err(Error::Rejected(rejection)) => {
            eprintln!("✗ {}", rejection);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e),
    }

    let Some(recorded) = outcome else {
        return Err(Error::Other("record produced no outcome".into()));
    };

    for warning in &recorded.warnings {
        eprintln!("! {}", warning);
    }

    println!(
        "✓ Recorded cycle {} → {}",
        recorded.record.start,
        recorded
            .record
            .end
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".into())
    );
    println!(
        "  Average cycle is now {} days",
        recorded.profile.average_length
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_today(profile: &CycleProfile, today: NaiveDate, config: &Config) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  TODAY {}", today.format("%Y/%m/%d"));
    println!("╰─────────────────────────────────────────╯");
    println!();

    let Some(baseline) = profile.baseline() else {
        println!("  No cycles recorded yet. Run `luna record --start YYYY-MM-DD` first.");
        println!();
        return;
    };

    let reading = classify(today, Some(baseline), profile.average_length, &config.phases);
    display_reading(&reading);

    if let Some(next) = forecast_next(today, Some(baseline), profile.average_length) {
        println!();
        println!("  Next predicted start: {}", next.next_start.format("%Y/%m/%d"));
        match next.status {
            NextCycleStatus::Upcoming(days) => println!("  → {} days to go", days),
            NextCycleStatus::DueToday => println!("  → Expected to start today"),
            NextCycleStatus::Late(days) => {
                println!("  → {} days later than predicted, keep an eye on how you feel", days)
            }
        }
    }

    println!(
        "  Average cycle: {} days (from {} records)",
        profile.average_length,
        profile.history.len()
    );
    println!();
}

fn cmd_query(profile: &CycleProfile, date: NaiveDate, config: &Config) {
    let baseline = profile.baseline();
    let reading = classify(date, baseline, profile.average_length, &config.phases);

    println!();
    println!("  {}", date.format("%Y/%m/%d"));
    display_reading(&reading);

    let Some(baseline) = baseline else {
        println!();
        return;
    };

    let Some(next_start) = next_start_from(date, baseline, profile.average_length) else {
        println!();
        return;
    };
    let days = (next_start - date).num_days();
    println!();
    println!(
        "  Next predicted start after this date: {} ({} days away)",
        next_start.format("%Y/%m/%d"),
        days
    );
    println!();
}

fn cmd_history(profile: &CycleProfile) {
    if profile.is_empty() {
        println!("No cycles recorded.");
        return;
    }

    let mut previous: Option<NaiveDate> = None;
    for record in &profile.history {
        let end = record
            .end
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into());
        match previous {
            Some(p) => println!(
                "  {}  →  {}   (+{} days)",
                record.start,
                end,
                (record.start - p).num_days()
            ),
            None => println!("  {}  →  {}", record.start, end),
        }
        previous = Some(record.start);
    }
    println!();
    println!("Average cycle: {} days", profile.average_length);
}

fn cmd_stats(profile: &CycleProfile) {
    let summary = cycle_summary(&profile.history);
    let or_dash = |v: Option<i64>| v.map(|d| d.to_string()).unwrap_or_else(|| "-".into());

    println!("Records:         {}", summary.total_records);
    println!("Measured gaps:   {}", summary.gap_count);
    println!("Shortest cycle:  {}", or_dash(summary.shortest_gap));
    println!("Longest cycle:   {}", or_dash(summary.longest_gap));
    println!("Average cycle:   {}", summary.average_length);
    if let Some(start) = summary.latest_start {
        println!("Latest start:    {}", start);
    }
    if let Some(end) = summary.latest_end {
        println!("Latest end:      {}", end);
    }
}

fn display_reading(reading: &PhaseReading) {
    let label = if std::io::stdout().is_terminal() {
        format!(
            "\x1b[1;{}m{}\x1b[0m",
            reading.color.ansi_code(),
            reading.phase
        )
    } else {
        format!("{} [{}]", reading.phase, reading.color.name())
    };

    match reading.day_in_cycle {
        Some(day) => println!("  {} (day {})", label, day),
        None => println!("  {}", label),
    }
    println!("  ℹ {}", reading.advice);
}
