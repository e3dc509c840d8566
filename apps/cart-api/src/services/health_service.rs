//! Health check service.
//!
//! Reports liveness of the cart engine itself and reachability of the Redis
//! backend as two independent values. A degraded backend is reported as
//! data, never as a failed request, so orchestrators can always read the
//! probe.

use serde::Serialize;

/// Health report returned by `GET /health`.
///
/// ## Serialization
/// ```json
/// { "app": "OK", "redis": true }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Engine liveness. Always "OK" - if the process can answer, it is live.
    pub app: &'static str,

    /// Whether the Redis backend answered a PING.
    pub redis: bool,
}

impl HealthStatus {
    /// Builds a report from the backend probe result.
    pub fn report(redis: bool) -> Self {
        HealthStatus { app: "OK", redis }
    }
}
