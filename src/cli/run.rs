//! One-off reconciliation command

use clap::Args;

use super::parse_date_or_today;
use crate::config::Settings;
use crate::display::format_outcome;
use crate::error::FafoResult;
use crate::services::run_job;

/// Arguments for `fafo run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Compute the changes without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Run one job now and print what it did
pub async fn handle_run_command(mut settings: Settings, args: RunArgs) -> FafoResult<()> {
    if args.dry_run {
        settings.dry_run = true;
    }
    let today = parse_date_or_today(args.date.as_deref())?;

    let outcome = run_job(&settings, today).await?;
    print!("{}", format_outcome(&outcome));
    Ok(())
}
