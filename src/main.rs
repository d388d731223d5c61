use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use repeat_rule::{CalendarDate, next_date};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Print the next occurrence of a repeating task.
#[derive(Parser, Debug)]
#[command(name = "next-date", author, version, about, long_about = None)]
struct Args {
    /// Base date of the task (YYYYMMDD)
    #[arg(short, long)]
    date: String,

    /// Repetition rule: "d <n>", "w <weekdays>", "m <days> [<months>]" or "y"
    #[arg(short, long, default_value = "")]
    repeat: String,

    /// Reference date (YYYYMMDD). Defaults to today's local date.
    #[arg(short, long, env = "NEXT_DATE_NOW")]
    now: Option<CalendarDate>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let now = args
        .now
        .unwrap_or_else(|| CalendarDate::from_naive(Local::now().date_naive()));

    debug!(%now, date = %args.date, repeat = %args.repeat, "Computing next date");

    let next = next_date(now, &args.date, &args.repeat)
        .inspect_err(|e| {
            error!(
                error = %e,
                date = %args.date,
                repeat = %args.repeat,
                "Rule evaluation failed"
            );
        })
        .with_context(|| {
            format!(
                "cannot compute next date for {:?} from {}",
                args.repeat, args.date
            )
        })?;

    println!("{next}");
    Ok(())
}
