use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use grantime_compliance::{evaluate, ComplianceMatcher, Inquiry};
use grantime_core::DecisionResult;
use rand::Rng;

use crate::cancel::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The pending reply was cancelled before it was produced.
    Cancelled,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "reply cancelled"),
        }
    }
}

impl std::error::Error for ChatError {}

/// Simulated "thinking" time before a reply, drawn uniformly from
/// `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min: Duration,
    max: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self::between(Duration::from_millis(10_000), Duration::from_millis(12_000))
    }
}

impl Latency {
    pub fn between(a: Duration, b: Duration) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    pub fn fixed(delay: Duration) -> Self {
        Self { min: delay, max: delay }
    }

    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (self.min, self.max)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rng.gen_range(lo..=hi))
    }
}

/// Wait out `delay`, then ask the matcher. Cancellation wins over the timer
/// and skips the matcher entirely.
pub async fn respond(
    matcher: Arc<dyn ComplianceMatcher>,
    inquiry: Inquiry,
    delay: Duration,
    token: CancellationToken,
) -> Result<DecisionResult, ChatError> {
    if token.is_cancelled() {
        return Err(ChatError::Cancelled);
    }

    let waited = smol::future::or(
        async {
            smol::Timer::after(delay).await;
            Ok(())
        },
        async {
            token.cancelled().await;
            Err(ChatError::Cancelled)
        },
    )
    .await;

    if let Err(e) = waited {
        log::debug!("responder: cancelled after < {:?}", delay);
        return Err(e);
    }

    Ok(evaluate(matcher.as_ref(), &inquiry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grantime_compliance::ScriptedMatcher;
    use grantime_core::Decision;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Instant;

    fn scripted() -> Arc<dyn ComplianceMatcher> {
        Arc::new(ScriptedMatcher::default())
    }

    #[test]
    fn latency_samples_stay_in_bounds() {
        let latency = Latency::between(Duration::from_millis(300), Duration::from_millis(100));
        assert_eq!(latency.bounds(), (Duration::from_millis(100), Duration::from_millis(300)));
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let d = latency.sample(&mut rng);
            assert!(d >= Duration::from_millis(100) && d <= Duration::from_millis(300));
        }
        assert_eq!(Latency::none().sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn replies_after_delay() {
        let started = Instant::now();
        let r = smol::block_on(respond(
            scripted(),
            Inquiry::parse("hello"),
            Duration::from_millis(20),
            CancellationToken::new(),
        ))
        .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert_eq!(r.decision, Decision::Unknown);
    }

    #[test]
    fn cancel_beats_long_delay() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        let started = Instant::now();
        let outcome = smol::block_on(async {
            let task = smol::spawn(respond(
                scripted(),
                Inquiry::parse("hello"),
                Duration::from_secs(30),
                token,
            ));
            smol::Timer::after(Duration::from_millis(10)).await;
            canceller.cancel();
            task.await
        });
        assert_eq!(outcome, Err(ChatError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn already_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let outcome = smol::block_on(respond(scripted(), Inquiry::parse("x"), Duration::ZERO, token));
        assert_eq!(outcome, Err(ChatError::Cancelled));
    }
}
