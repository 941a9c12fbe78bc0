//! Daily scheduling
//!
//! The daemon reconciles once at startup and then once a day at the
//! configured local time. Each run is awaited before the next wait starts,
//! so two runs never overlap.

use std::future::Future;
use std::net::SocketAddr;

use chrono::{Duration, Local, NaiveDateTime};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use crate::config::{ReconTime, Settings};
use crate::error::FafoResult;
use crate::health;
use crate::services::run_job;

/// The next local datetime strictly after `now` whose clock reads `time`
pub fn next_run_after(now: NaiveDateTime, time: ReconTime) -> NaiveDateTime {
    let today = now.date().and_time(time.as_naive_time());
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Run the health endpoint and the daily schedule until `shutdown` completes
pub async fn serve<F>(settings: Settings, shutdown: F) -> FafoResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(
        recon_start_day = settings.recon_start_day,
        recon_end_day = settings.recon_end_day,
        recon_time = %settings.recon_time,
        dry_run = settings.dry_run,
        monthly_target = %settings.monthly_target,
        bank_sync = settings.bank_sync,
        "FAFO Budget Reconciler starting"
    );

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown.await;
        let _ = stop_tx.send(true);
    });

    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], settings.health_port))).await?;
    info!("Health check listening on port {}", settings.health_port);
    let health_task = tokio::spawn(health::serve(listener, stopped(stop_rx.clone())));

    // Failures are already logged by the job; the daemon keeps going
    let _ = run_job(&settings, Local::now().date_naive()).await;

    run_daily(&settings, stop_rx).await;

    match health_task.await {
        Ok(result) => result?,
        Err(e) => error!(error = %e, "Health check task failed"),
    }

    info!("Shutdown complete");
    Ok(())
}

async fn run_daily(settings: &Settings, mut stop_rx: watch::Receiver<bool>) {
    loop {
        let now = Local::now().naive_local();
        let next = next_run_after(now, settings.recon_time);
        let wait = (next - now).to_std().unwrap_or_default();
        info!(next_run = %next, "Scheduler active, next run at {} daily", settings.recon_time);

        tokio::select! {
            _ = wait_for_stop(&mut stop_rx) => {
                info!("Received shutdown signal, stopping scheduler");
                return;
            }
            _ = tokio::time::sleep(wait) => {}
        }

        let _ = run_job(settings, Local::now().date_naive()).await;
    }
}

async fn wait_for_stop(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    wait_for_stop(&mut rx).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_later_today() {
        let two_am = ReconTime::new(2, 0).unwrap();
        assert_eq!(next_run_after(at(10, 1, 59, 59), two_am), at(10, 2, 0, 0));
    }

    #[test]
    fn test_exactly_now_rolls_to_tomorrow() {
        let two_am = ReconTime::new(2, 0).unwrap();
        assert_eq!(next_run_after(at(10, 2, 0, 0), two_am), at(11, 2, 0, 0));
    }

    #[test]
    fn test_already_passed() {
        let time = ReconTime::new(6, 30).unwrap();
        assert_eq!(next_run_after(at(31, 23, 0, 0), time), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(6, 30, 0).unwrap());
    }

    #[tokio::test]
    async fn test_wait_for_stop_returns_after_signal() {
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();
        wait_for_stop(&mut rx).await;
        assert!(*rx.borrow());
    }

    #[tokio::test]
    async fn test_wait_for_stop_returns_when_sender_dropped() {
        let (tx, mut rx) = watch::channel(false);
        drop(tx);
        wait_for_stop(&mut rx).await;
    }
}
