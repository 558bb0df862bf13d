/// Verdict on the age of a cached result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// TTL of zero: always a hit, never refetched.
    NonExpiring,
    Fresh,
    Stale,
}

/// Applies a resource's TTL to a record age.
///
/// A missing TTL means always stale: an unconfigured resource refetches on
/// every request rather than serving unbounded stale data.
#[must_use]
pub const fn verdict(ttl_minutes: Option<i64>, age_millis: i64) -> Freshness {
    match ttl_minutes {
        None => Freshness::Stale,
        Some(0) => Freshness::NonExpiring,
        Some(ttl) => {
            if age_millis > ttl * 60_000 {
                Freshness::Stale
            } else {
                Freshness::Fresh
            }
        }
    }
}
