use async_trait::async_trait;
use gloo::timers::future::TimeoutFuture;
use std::fmt::Display;
use std::future::Future;

/// Attempt budget and fixed pause between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 5000,
        }
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay_ms: u32) -> Self {
        Self {
            max_attempts,
            delay_ms,
        }
    }

    /// Budget used for every call to the budgeting service
    pub const fn network() -> Self {
        Self::new(5, 10_000)
    }

    /// Run `operation` until it succeeds or the budget is spent.
    ///
    /// The delay is constant between attempts and never applied after the
    /// last one. On exhaustion the last error is returned unchanged.
    pub async fn execute<S, T, E, F, Fut>(&self, sleeper: &S, operation: F) -> Result<T, E>
    where
        S: Sleeper + ?Sized,
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        execute_with_retry(sleeper, operation, self.max_attempts, self.delay_ms).await
    }
}

/// Suspends the current task between attempts
#[async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, ms: u32);
}

/// Browser timer backed sleeper
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimerSleeper;

#[async_trait(?Send)]
impl Sleeper for TimerSleeper {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

/// A budget of zero attempts still runs the operation once.
pub async fn execute_with_retry<S, T, E, F, Fut>(
    sleeper: &S,
    mut operation: F,
    max_attempts: u32,
    delay_ms: u32,
) -> Result<T, E>
where
    S: Sleeper + ?Sized,
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                log::warn!(
                    target: "retry",
                    "Giving up after {} attempt(s): {}",
                    attempt, e
                );
                return Err(e);
            }
            Err(e) => {
                log::debug!(
                    target: "retry",
                    "Attempt {}/{} failed: {}; retrying in {}ms",
                    attempt, max_attempts, e, delay_ms
                );
                sleeper.sleep(delay_ms).await;
                attempt += 1;
            }
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_timer_sleeper_retries_in_browser() {
        let calls = Cell::new(0);

        let result: Result<u32, String> = RetryPolicy::new(2, 10)
            .execute(&TimerSleeper, || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n == 1 {
                        Err("cold start".to_string())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result, Ok(2));
    }
}
