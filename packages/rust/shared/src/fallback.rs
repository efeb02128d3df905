//! Generic first-success fallback chain.
//!
//! Both retry disciplines in the pipeline — extraction backends and rewrite
//! models — are ordered lists of capability-equivalent strategies tried in
//! sequence until one succeeds. This module is the single combinator both
//! chains consume: no retries of the same strategy, no merging of outputs.

use std::future::Future;

/// One failed attempt in a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// Strategy name (backend or model identifier).
    pub strategy: String,
    /// Position in the chain, zero-based.
    pub ordinal: usize,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Outcome of a chain that found a winner.
#[derive(Debug)]
pub struct ChainWin<T> {
    /// The first successful value.
    pub value: T,
    /// Name of the strategy that produced it.
    pub strategy: String,
    /// Records of every attempt that failed before the winner.
    pub failures: Vec<AttemptRecord>,
}

/// Try each strategy in order; return the first success together with the
/// failures that preceded it, or all failure records if the chain is
/// exhausted. Strategies after the first success are never invoked.
pub async fn first_success<S, T, F, Fut>(
    strategies: &[S],
    name: impl Fn(&S) -> String,
    mut attempt: F,
) -> std::result::Result<ChainWin<T>, Vec<AttemptRecord>>
where
    F: FnMut(&S) -> Fut,
    Fut: Future<Output = std::result::Result<T, String>>,
{
    let mut failures = Vec::new();

    for (ordinal, strategy) in strategies.iter().enumerate() {
        let label = name(strategy);
        match attempt(strategy).await {
            Ok(value) => {
                return Ok(ChainWin {
                    value,
                    strategy: label,
                    failures,
                });
            }
            Err(reason) => {
                tracing::debug!(strategy = %label, %reason, "fallback attempt failed");
                failures.push(AttemptRecord {
                    strategy: label,
                    ordinal,
                    reason,
                });
            }
        }
    }

    Err(failures)
}

/// Render a chain's failure records as a single summary line.
pub fn exhausted_summary(failures: &[AttemptRecord]) -> String {
    if failures.is_empty() {
        return "no strategies configured".into();
    }
    failures
        .iter()
        .map(|f| format!("{}: {}", f.strategy, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn first_success_wins_and_records_failures() {
        let strategies = vec!["a", "b", "c"];
        let result = first_success(&strategies, |s| s.to_string(), |s| {
            let outcome = match *s {
                "a" => Err("boom".to_string()),
                "b" => Ok(42),
                _ => panic!("must not be invoked after first success"),
            };
            std::future::ready(outcome)
        })
        .await
        .expect("chain succeeds");

        assert_eq!(result.value, 42);
        assert_eq!(result.strategy, "b");
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].strategy, "a");
        assert_eq!(result.failures[0].ordinal, 0);
    }

    #[tokio::test]
    async fn later_strategies_never_invoked_after_success() {
        let strategies = vec!["first", "second", "third"];
        let calls = AtomicUsize::new(0);

        let result = first_success(&strategies, |s| s.to_string(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok::<_, String>("text"))
        })
        .await
        .expect("chain succeeds");

        assert_eq!(result.strategy, "first");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_chain_returns_all_records() {
        let strategies = vec!["x", "y"];
        let err = first_success(&strategies, |s| s.to_string(), |s| {
            std::future::ready(Err::<(), _>(format!("{s} failed")))
        })
        .await
        .expect_err("chain exhausts");

        assert_eq!(err.len(), 2);
        assert_eq!(err[1].ordinal, 1);
        let summary = exhausted_summary(&err);
        assert!(summary.contains("x: x failed"));
        assert!(summary.contains("y: y failed"));
    }

    #[tokio::test]
    async fn empty_chain_exhausts_immediately() {
        let strategies: Vec<&str> = vec![];
        let err = first_success(&strategies, |s| s.to_string(), |_| {
            std::future::ready(Ok::<i32, String>(1))
        })
        .await
        .expect_err("empty chain cannot succeed");

        assert!(err.is_empty());
        assert_eq!(exhausted_summary(&err), "no strategies configured");
    }
}
