//! Per-client rate limiting using the governor token bucket.
//!
//! # Key Extraction
//!
//! Without a trusted reverse proxy, clients are keyed by the socket peer
//! address and forwarding headers are ignored, so a client cannot pick its own
//! bucket. Behind a proxy (`BEHIND_PROXY=true`), `X-Forwarded-For`,
//! `X-Real-IP` and `Forwarded` are read first, falling back to the peer.

use std::sync::Arc;

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Shortlink creations allowed per client per minute (also the burst).
pub const SHORTLINK_PER_MINUTE: u32 = 20;

/// Analytics events allowed per client per minute (also the burst).
pub const TRACK_PER_MINUTE: u32 = 120;

/// Wraps `router` in a per-client limit of `requests` per minute.
///
/// # Limits
///
/// - **Rate**: one token every `60 / requests` seconds
/// - **Burst**: `requests`
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Example
///
/// ```rust,ignore
/// let routes = rate_limit::limit(
///     Router::new().route("/s", post(create_shortlink_handler)),
///     rate_limit::SHORTLINK_PER_MINUTE,
///     config.behind_proxy,
/// );
/// ```
pub fn limit<S>(router: Router<S>, requests: u32, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(per_minute(SmartIpKeyExtractor, requests))
    } else {
        router.layer(per_minute(PeerIpKeyExtractor, requests))
    }
}

fn per_minute<K: KeyExtractor>(
    key_extractor: K,
    requests: u32,
) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_millisecond(60_000 / u64::from(requests.max(1)))
            .burst_size(requests.max(1))
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
