use std::{cell::RefCell, future::Future};

use tokio_util::sync::CancellationToken;

use crate::errors::Aborted;

/// Owns the cancellation token of the current run.
///
/// A token, once cancelled, stays cancelled. [`AbortCoordinator::renew`] only
/// changes which token is handed to the next load; holders of an older token
/// keep observing its cancellation.
#[derive(Debug, Default)]
pub struct AbortCoordinator {
    current: RefCell<CancellationToken>,
}

impl AbortCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals the current token
    pub fn abort(&self) {
        self.current.borrow().cancel();
    }

    /// Replaces the current token by a fresh, unsignalled one
    pub fn renew(&self) {
        *self.current.borrow_mut() = CancellationToken::new();
    }

    /// The token to hand to a load function
    pub fn token(&self) -> CancellationToken {
        self.current.borrow().clone()
    }

    pub fn is_aborted(&self) -> bool {
        self.current.borrow().is_cancelled()
    }
}

/// What a load function receives besides its params.
#[derive(Debug, Clone)]
pub struct LoadContext {
    token: CancellationToken,
}

impl LoadContext {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes when the run is cancelled
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Drives `future` to completion unless the run gets cancelled first.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let load = |params: Option<u64>, ctx: LoadContext| async move {
    ///     let body = ctx.abortable(fetch(params)).await.map_err(log_error_ccstr)?;
    ///     Ok::<_, CCStr>(body)
    /// };
    /// ```
    pub async fn abortable<F: Future>(&self, future: F) -> Result<F::Output, Aborted> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Aborted),
            output = future => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[test]
    fn renew_does_not_resurrect_old_tokens() {
        let coordinator = AbortCoordinator::new();
        let first = coordinator.token();
        assert!(!first.is_cancelled());

        coordinator.abort();
        assert!(first.is_cancelled());
        assert!(coordinator.is_aborted());

        coordinator.renew();
        let second = coordinator.token();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(!coordinator.is_aborted());
    }

    #[test]
    fn token_is_shared_until_renewed() {
        let coordinator = AbortCoordinator::new();
        let a = coordinator.token();
        let b = coordinator.token();
        coordinator.abort();
        assert!(a.is_cancelled() && b.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn abortable_stops_on_cancellation() {
        let coordinator = AbortCoordinator::new();
        let ctx = LoadContext::new(coordinator.token());

        let (result, _) = tokio::join!(
            ctx.abortable(tokio::time::sleep(Duration::from_secs(10))),
            async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                coordinator.abort();
            }
        );
        assert_eq!(result, Err(Aborted));
        assert!(ctx.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn abortable_passes_output_through() {
        let ctx = LoadContext::new(CancellationToken::new());
        let result = ctx
            .abortable(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                7
            })
            .await;
        assert_eq!(result, Ok(7));
    }
}
