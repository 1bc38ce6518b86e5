//! Per-IP rate limiting backed by `governor`'s keyed limiter.
//!
//! Process-local and in-memory: quota state resets on restart and is not
//! shared across instances. The original deployment's windows map onto
//! governor quotas as sustained rate + burst: 50 requests / 15 minutes
//! globally, 5 / minute for AI generation.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter as KeyedLimiter};

use crate::errors::AppError;

type IpLimiter = KeyedLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<IpLimiter>,
    message: &'static str,
}

impl RateLimiter {
    pub fn new(quota: Quota, message: &'static str) -> Self {
        Self {
            limiter: Arc::new(KeyedLimiter::keyed(quota)),
            message,
        }
    }

    /// Global quota from the original deployment: 50 requests / 15 min,
    /// i.e. one request every 18s sustained with a burst of 50.
    pub fn global() -> Self {
        let quota = Quota::with_period(Duration::from_secs(18))
            .expect("non-zero period")
            .allow_burst(NonZeroU32::new(50).expect("50 is non-zero"));
        Self::new(
            quota,
            "Too many requests from this IP, please try again later.",
        )
    }

    /// AI generation quota: 5 requests / minute.
    pub fn ai() -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(5).expect("5 is non-zero"));
        Self::new(quota, "AI generation limit exceeded. Please wait a moment.")
    }

    pub fn check(&self, ip: IpAddr) -> Result<(), AppError> {
        self.limiter
            .check_key(&ip)
            .map_err(|_| AppError::RateLimited(self.message.to_string()))
    }
}

/// Middleware layer; attach with `middleware::from_fn_with_state(limiter, rate_limit)`.
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    limiter.check(addr.ip())?;
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use governor::clock::FakeRelativeClock;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last])
    }

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_allows_burst_up_to_quota() {
        let limiter = RateLimiter::new(Quota::per_minute(nz(3)), "limit");
        for _ in 0..3 {
            assert!(limiter.check(ip(1)).is_ok());
        }
        assert!(limiter.check(ip(1)).is_err());
    }

    #[test]
    fn test_ips_are_independent() {
        let limiter = RateLimiter::new(Quota::per_minute(nz(1)), "limit");
        assert!(limiter.check(ip(1)).is_ok());
        assert!(limiter.check(ip(2)).is_ok());
        assert!(limiter.check(ip(1)).is_err());
    }

    #[test]
    fn test_quota_refills_after_period() {
        let clock = FakeRelativeClock::default();
        let limiter: KeyedLimiter<
            IpAddr,
            DefaultKeyedStateStore<IpAddr>,
            FakeRelativeClock,
            governor::middleware::NoOpMiddleware<governor::nanos::Nanos>,
        > = KeyedLimiter::new(
            Quota::per_minute(nz(1)),
            DefaultKeyedStateStore::default(),
            clock.clone(),
        );
        assert!(limiter.check_key(&ip(1)).is_ok());
        assert!(limiter.check_key(&ip(1)).is_err());
        clock.advance(Duration::from_secs(60));
        assert!(limiter.check_key(&ip(1)).is_ok());
    }

    #[test]
    fn test_rejection_carries_message() {
        let limiter = RateLimiter::new(Quota::per_minute(nz(1)), "custom message");
        assert!(limiter.check(ip(1)).is_ok());
        let err = limiter.check(ip(1)).unwrap_err();
        match err {
            AppError::RateLimited(msg) => assert_eq!(msg, "custom message"),
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_ai_quota_is_five_per_minute() {
        let limiter = RateLimiter::ai();
        for _ in 0..5 {
            assert!(limiter.check(ip(9)).is_ok());
        }
        let err = limiter.check(ip(9)).unwrap_err();
        match err {
            AppError::RateLimited(msg) => {
                assert_eq!(msg, "AI generation limit exceeded. Please wait a moment.")
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }
}
