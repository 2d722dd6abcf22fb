use std::{io, path::PathBuf};

use clap::{ArgAction, Parser, ValueHint};
use growing_days::{Column, GrowingDays, Layout, Series};
use miette::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cumulative growing degree days from daily averages", long_about = None)]
struct Cli {
    /// CSV file with one row per day
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Base temperature subtracted from each daily average
    #[arg(short, long)]
    base: f64,

    /// Cumulative totals to locate (repeatable)
    #[arg(short, long)]
    target: Vec<f64>,

    /// Column holding the daily average: 0-based index or header name
    #[arg(short, long, default_value = "3")]
    column: Column,

    /// The file has no header row
    #[arg(long, action = ArgAction::SetTrue)]
    no_header: bool,

    /// Print every day
    #[arg(long, action = ArgAction::SetTrue)]
    days: bool,

    /// Verbose logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let layout = Layout {
        column: cli.column,
        header: !cli.no_header,
    };
    info!(?layout, "opening {}", cli.input.display());
    let series = Series::read(&cli.input, &layout)?;
    let days = GrowingDays::from_series(&series, cli.base);

    println!("Days: {}", series.len());
    println!("Degree days above {}: {:.1}", days.base(), days.total());

    if cli.days {
        for (day, reading) in series.readings().iter().enumerate() {
            let date = reading
                .date
                .map(|date| date.to_string())
                .unwrap_or_else(|| String::from("-"));
            println!(
                "{day}\t{date}\t{:.1}\t{:.1}\t{:.1}",
                reading.value,
                days.degree_days()[day],
                days.cumulative()[day]
            );
        }
    }

    for target in cli.target {
        match days.first_day_at_or_above(target) {
            Some(day) => match series.date_of(day) {
                Some(date) => println!("{target}: day {day} ({date})"),
                None => println!("{target}: day {day}"),
            },
            None => println!("{target}: -1"),
        }
    }

    Ok(())
}
