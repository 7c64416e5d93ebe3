use chrono::{DateTime, Utc};

use crate::AppState;

/// Periodically evict finished and abandoned sessions.
pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(state.config.sweep_interval);
    loop {
        interval.tick().await;
        sweep(&state, Utc::now()).await;
    }
}

/// One eviction pass as of `now`. Returns how many sessions were removed.
pub async fn sweep(state: &AppState, now: DateTime<Utc>) -> usize {
    let evicted = state.registry.evict(now).await;
    for match_id in &evicted {
        tracing::info!("Session sweep: evicted match {match_id}");
    }
    evicted.len()
}
