use crate::models::session::{MatchSummary, OpenSession};
use crate::ws::registry::GameRegistry;

/// Lobby rows for every session waiting on a second player.
pub async fn open_sessions(registry: &GameRegistry) -> Vec<OpenSession> {
    let mut rows = Vec::new();
    for session in registry.all().await {
        if let Some(row) = session.lock().await.open_listing() {
            rows.push(row);
        }
    }
    rows
}

pub async fn summary(registry: &GameRegistry, match_id: &str) -> Option<MatchSummary> {
    let session = registry.get(match_id).await?;
    let summary = session.lock().await.summary();
    Some(summary)
}
