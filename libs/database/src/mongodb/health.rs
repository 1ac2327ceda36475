use mongodb::Client;
use mongodb::bson::doc;
use std::time::Instant;

/// Outcome of a readiness ping.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// `true` when the deployment answers a `ping` on the admin database.
pub async fn check_health(client: &Client) -> bool {
    check_health_detailed(client).await.healthy
}

pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await;
    let response_time_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthStatus {
            healthy: true,
            message: None,
            response_time_ms,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
            response_time_ms,
        },
    }
}
