// Rate limiting middleware using tower-governor
//
// Keyed by client IP (X-Forwarded-For / X-Real-IP / Forwarded, then the peer
// address). Quota comes from RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST.
//
// Applied in app.rs as a layer on the API routes (not /health)

/// Milliseconds between replenished requests for a quota of `per_second`.
pub fn replenish_interval_ms(per_second: u64) -> u64 {
    (1000 / per_second.max(1)).max(1)
}
