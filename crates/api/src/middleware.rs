// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Logging and metrics around command and query handlers.
//!
//! Handlers are wrapped as `LoggingMiddleware(MetricsMiddleware(handler))`
//! by [`apply_command_middleware`] and [`apply_query_middleware`]. Both
//! layers implement the handler traits themselves, so a wrapped handler is
//! used exactly like a bare one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::commands::{Command, CommandHandler};
use crate::error::ApiError;
use crate::queries::{Query, QueryHandler};

/// Sink for counters.
pub trait MetricsClient: Send + Sync {
    /// Adds `value` to the counter `key`.
    fn inc(&self, key: &str, value: i64);
}

/// Metrics client that drops every counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetricsClient;

impl MetricsClient for NoOpMetricsClient {
    fn inc(&self, _key: &str, _value: i64) {}
}

/// Handler wrapped in both middleware layers.
pub type Decorated<H> = LoggingMiddleware<MetricsMiddleware<H>>;

/// Wraps a command handler in logging and metrics.
#[must_use]
pub fn apply_command_middleware<C, H>(handler: H, metrics: Arc<dyn MetricsClient>) -> Decorated<H>
where
    C: Command,
    H: CommandHandler<C>,
{
    LoggingMiddleware::new(MetricsMiddleware::new(handler, metrics))
}

/// Wraps a query handler in logging and metrics.
#[must_use]
pub fn apply_query_middleware<Q, T, H>(handler: H, metrics: Arc<dyn MetricsClient>) -> Decorated<H>
where
    Q: Query,
    H: QueryHandler<Q, T>,
{
    LoggingMiddleware::new(MetricsMiddleware::new(handler, metrics))
}

fn duration_millis(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}

/// Counts executions, failures and time spent per handler.
///
/// Keys are `commands.<name>.{duration,success,failure}` and
/// `queries.<name>.{duration,success,failure}`; durations are in
/// milliseconds.
pub struct MetricsMiddleware<H> {
    inner: H,
    client: Arc<dyn MetricsClient>,
}

impl<H> MetricsMiddleware<H> {
    #[must_use]
    pub const fn new(inner: H, client: Arc<dyn MetricsClient>) -> Self {
        Self { inner, client }
    }

    fn record<T>(&self, kind: &str, name: &str, started: Instant, result: &Result<T, ApiError>) {
        self.client.inc(
            &format!("{kind}.{name}.duration"),
            duration_millis(started.elapsed()),
        );
        let outcome: &str = if result.is_ok() { "success" } else { "failure" };
        self.client.inc(&format!("{kind}.{name}.{outcome}"), 1);
    }
}

impl<C, H> CommandHandler<C> for MetricsMiddleware<H>
where
    C: Command,
    H: CommandHandler<C>,
{
    fn handle(&self, command: &C) -> Result<(), ApiError> {
        let started: Instant = Instant::now();
        let result = self.inner.handle(command);
        self.record("commands", C::NAME, started, &result);
        result
    }
}

impl<Q, T, H> QueryHandler<Q, T> for MetricsMiddleware<H>
where
    Q: Query,
    H: QueryHandler<Q, T>,
{
    fn handle(&self, query: &Q) -> Result<T, ApiError> {
        let started: Instant = Instant::now();
        let result = self.inner.handle(query);
        self.record("queries", Q::NAME, started, &result);
        result
    }
}

/// Logs every execution with its outcome and duration.
pub struct LoggingMiddleware<H> {
    inner: H,
}

impl<H> LoggingMiddleware<H> {
    #[must_use]
    pub const fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<C, H> CommandHandler<C> for LoggingMiddleware<H>
where
    C: Command,
    H: CommandHandler<C>,
{
    fn handle(&self, command: &C) -> Result<(), ApiError> {
        debug!(command = C::NAME, payload = ?command, "Executing command");
        let started: Instant = Instant::now();

        let result = self.inner.handle(command);
        let duration_ms: i64 = duration_millis(started.elapsed());

        match &result {
            Ok(()) => info!(command = C::NAME, duration_ms, "Command executed"),
            Err(err) => warn!(
                command = C::NAME,
                payload = ?command,
                duration_ms,
                slug = err.slug(),
                error = %err,
                "Command failed"
            ),
        }
        result
    }
}

impl<Q, T, H> QueryHandler<Q, T> for LoggingMiddleware<H>
where
    Q: Query,
    H: QueryHandler<Q, T>,
{
    fn handle(&self, query: &Q) -> Result<T, ApiError> {
        let started: Instant = Instant::now();
        let result = self.inner.handle(query);
        let duration_ms: i64 = duration_millis(started.elapsed());

        match &result {
            Ok(_) => debug!(query = Q::NAME, payload = ?query, duration_ms, "Query executed"),
            Err(err) => warn!(
                query = Q::NAME,
                payload = ?query,
                duration_ms,
                slug = err.slug(),
                error = %err,
                "Query failed"
            ),
        }
        result
    }
}
