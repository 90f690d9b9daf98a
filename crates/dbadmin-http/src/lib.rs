//! Request-side plumbing for dbadmin controllers
//!
//! - [`ResponseRenderer`]: collects the status flag, JSON members and HTML
//!   fragments a controller answers with
//! - [`Session`] and [`SessionCache`]: the per-user session map and the
//!   per-server cache stored inside it

pub mod response;
pub mod session;

pub use response::{ResponseError, ResponseRenderer};
pub use session::{Session, SessionCache};
