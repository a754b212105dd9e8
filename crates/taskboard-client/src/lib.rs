//! Taskboard client library.
//!
//! Keeps an in-memory, paginated, filtered view of server-held tasks
//! consistent with user mutations, route-driven filter changes, and
//! out-of-order network responses. The view layer talks to
//! [`store::TaskStore`]; the server is reached only through the
//! [`api::TaskApi`] seam, implemented over HTTP by [`http::HttpTaskApi`].

pub mod api;
pub mod error;
pub mod http;
pub mod session;
pub mod store;

pub use api::TaskApi;
pub use error::{ApiError, StoreError};
pub use http::HttpTaskApi;
pub use session::Session;
pub use store::{Action, FetchOutcome, StoreState, TaskStore};
