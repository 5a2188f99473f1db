//! Recurring background jobs. Call `spawn_all` once during startup.

use crate::services::EnrollmentService;
use std::time::Duration;

/// Periodically deactivates enrollments past their end date. The sweep is
/// idempotent, so overlapping with request-time sweeps is harmless.
pub fn spawn_expiry_sweep(enrollment_service: EnrollmentService, interval: Duration) {
    tokio::spawn(async move {
        loop {
            match enrollment_service.sweep_expired().await {
                Ok(n) if n > 0 => log::info!("Expiry sweep deactivated {n} enrollment(s)"),
                Ok(_) => log::debug!("Expiry sweep found nothing to do"),
                Err(e) => log::error!("Expiry sweep failed: {e:?}"),
            }
            tokio::time::sleep(interval).await;
        }
    });
}

/// Spawns every background task; returns immediately.
pub fn spawn_all(enrollment_service: EnrollmentService, sweep_interval_secs: u64) {
    spawn_expiry_sweep(
        enrollment_service,
        Duration::from_secs(sweep_interval_secs.max(1)),
    );
}
