//! Scoped connection leases
//!
//! Every store operation borrows one connection through [`lease`]. The lease
//! is labelled with the calling service and the store operation, so wait time,
//! failures and connections held can be read per operation.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge_vec, HistogramVec,
    IntCounterVec, IntGaugeVec,
};
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};
use std::ops::{Deref, DerefMut};
use std::time::Instant;

lazy_static! {
    static ref LEASE_WAIT_SECONDS: HistogramVec = register_histogram_vec!(
        "db_lease_wait_seconds",
        "Time spent waiting for a pooled connection",
        &["service", "operation"],
        vec![0.0005, 0.001, 0.005, 0.025, 0.1, 0.5, 2.0, 10.0]
    )
    .expect("db_lease_wait_seconds registration");

    static ref LEASE_FAILURES: IntCounterVec = register_int_counter_vec!(
        "db_lease_failures_total",
        "Connection leases that could not be granted",
        &["service", "operation", "reason"]
    )
    .expect("db_lease_failures_total registration");

    static ref LEASES_HELD: IntGaugeVec = register_int_gauge_vec!(
        "db_leases_held",
        "Connections currently leased",
        &["service", "operation"]
    )
    .expect("db_leases_held registration");

    static ref POOL_OCCUPANCY: IntGaugeVec = register_int_gauge_vec!(
        "db_pool_occupancy",
        "Open pool connections split into busy and idle",
        &["service", "state"]
    )
    .expect("db_pool_occupancy registration");
}

/// A pooled connection borrowed for one store operation
///
/// Dropping the lease returns the connection to the pool and lowers the
/// `db_leases_held` gauge, so a lease bound to a local is released on every
/// exit path of its caller, `?` early returns included.
pub struct Lease {
    conn: PoolConnection<Postgres>,
    held: prometheus::IntGauge,
}

impl Deref for Lease {
    type Target = PgConnection;

    fn deref(&self) -> &PgConnection {
        &self.conn
    }
}

impl DerefMut for Lease {
    fn deref_mut(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.held.dec();
    }
}

/// Borrow a connection for `operation` on behalf of `service`
///
/// # Example
/// ```no_run
/// # use db_pool::{create_pool, lease, DbConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let pool = create_pool(DbConfig::from_env("twitter-service")?).await?;
/// let mut conn = lease(&pool, "twitter-service", "posts_by_user").await?;
/// sqlx::query("SELECT 1").execute(&mut *conn).await?;
/// # Ok(())
/// # }
/// ```
pub async fn lease(pool: &PgPool, service: &str, operation: &str) -> Result<Lease, sqlx::Error> {
    let started = Instant::now();
    let acquired = pool.acquire().await;
    LEASE_WAIT_SECONDS
        .with_label_values(&[service, operation])
        .observe(started.elapsed().as_secs_f64());

    match acquired {
        Ok(conn) => {
            let held = LEASES_HELD.with_label_values(&[service, operation]);
            held.inc();
            Ok(Lease { conn, held })
        }
        Err(e) => {
            let reason = failure_reason(&e);
            LEASE_FAILURES
                .with_label_values(&[service, operation, reason])
                .inc();
            tracing::warn!(service, operation, reason, error = %e, "connection lease failed");
            Err(e)
        }
    }
}

/// Connections currently leased for `operation`
pub fn leases_held(service: &str, operation: &str) -> i64 {
    LEASES_HELD.with_label_values(&[service, operation]).get()
}

fn failure_reason(error: &sqlx::Error) -> &'static str {
    match error {
        sqlx::Error::PoolTimedOut => "pool_exhausted",
        sqlx::Error::PoolClosed => "pool_closed",
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => "connect",
        _ => "other",
    }
}

pub(crate) fn record_pool_occupancy(pool: &PgPool, service: &str) {
    let open = i64::from(pool.size());
    let idle = pool.num_idle() as i64;
    POOL_OCCUPANCY
        .with_label_values(&[service, "idle"])
        .set(idle);
    POOL_OCCUPANCY
        .with_label_values(&[service, "busy"])
        .set((open - idle).max(0));
}
