// Handler for check_api_health
use rand::Rng;
use tokio::sync::Mutex;

use super::SourceState;
use crate::config::EngineSettings;

/// Simulated health check of a flaky backend; succeeds with the configured probability.
pub async fn handle_check_api_health(state: &Mutex<SourceState>, settings: &EngineSettings) -> bool {
    tokio::time::sleep(settings.health_latency()).await;
    let healthy = state.lock().await.rng.gen_bool(settings.health_success_rate);
    tracing::debug!(healthy, "API health check finished");
    healthy
}
