//! Window preview command

use clap::Args;

use super::parse_date_or_today;
use crate::config::settings::{DEFAULT_RECON_END_DAY, DEFAULT_RECON_START_DAY};
use crate::display::format_window;
use crate::error::FafoResult;
use crate::services::select_window;

/// Arguments for `fafo window`
#[derive(Args, Debug)]
pub struct WindowArgs {
    /// Date to check (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// First day of the late-month part of the window
    #[arg(
        long,
        env = "FAFO_RECON_START_DAY",
        default_value_t = DEFAULT_RECON_START_DAY,
        value_parser = clap::value_parser!(u32).range(1..=31)
    )]
    pub start_day: u32,

    /// Last day of the early-month part of the window
    #[arg(
        long,
        env = "FAFO_RECON_END_DAY",
        default_value_t = DEFAULT_RECON_END_DAY,
        value_parser = clap::value_parser!(u32).range(1..=28)
    )]
    pub end_day: u32,
}

/// Print which months a run on the given date would reconcile
pub fn handle_window_command(args: WindowArgs) -> FafoResult<()> {
    let today = parse_date_or_today(args.date.as_deref())?;
    let window = select_window(today, args.start_day, args.end_day);
    print!("{}", format_window(window.as_ref()));
    Ok(())
}
