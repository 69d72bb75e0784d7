use tokio::time::MissedTickBehavior;

use crate::app::state::AppState;
use crate::services::product;

/// Spawn the scheduled product refresh.
///
/// The task is detached: scheduling sits off the bootstrap critical
/// path and the server never waits on it. The first tick is consumed
/// up front because bootstrap has just fetched.
pub fn start_jobs(state: AppState) {
    let period = state.config.fetch_interval;

    tracing::info!(
        period_secs = period.as_secs(),
        "starting scheduled product refresh"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match product::fetch_and_update_products(&state).await {
                Ok(count) => {
                    tracing::info!(products = count, "scheduled product refresh completed");
                }
                Err(err) => {
                    tracing::error!("scheduled product refresh failed: {err:#}");
                }
            }
        }
    });
}
