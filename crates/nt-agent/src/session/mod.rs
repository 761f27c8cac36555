//! Coordinator session management
//!
//! A session is one connected period: connect, then receive, dispatch,
//! execute and reply strictly in turn until the connection ends. The
//! supervisor wraps sessions in a reconnect loop with a backoff policy.

mod connector;
mod dispatcher;
mod reconnect;
mod supervisor;
mod worker;

pub use connector::{ActiveConnection, ConnectionEvent, Connector};
pub use dispatcher::Dispatcher;
pub use reconnect::ExponentialBackoff;
pub use supervisor::Supervisor;
pub use worker::{Session, SessionEnd, SessionSummary};
