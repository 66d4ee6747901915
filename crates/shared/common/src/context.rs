//! Cancellable per-request operation context.
//!
//! The transport creates one context per inbound request and passes it down
//! through the endpoint, service and repository layers. Store calls are raced
//! against the context so a disconnected caller or an expired deadline aborts
//! them with [`AppError::Cancelled`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context without a deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Cancel this context and every clone of it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Guard that cancels the context when dropped.
    ///
    /// Held by the request handler: when the client disconnects, the handler
    /// future is dropped and in-flight store calls are cancelled.
    pub fn drop_guard(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Fail fast if the context already ended.
    pub fn check(&self) -> AppResult<()> {
        if self.token.is_cancelled() {
            return Err(AppError::cancelled("operation cancelled"));
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(AppError::cancelled("deadline exceeded"));
        }
        Ok(())
    }

    /// Run `fut` unless the context is cancelled or its deadline passes first.
    pub async fn run<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.check()?;

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(AppError::cancelled("operation cancelled")),
            _ = expired => Err(AppError::cancelled("deadline exceeded")),
            result = fut => result,
        }
    }
}
