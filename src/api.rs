//! HTTP API server for the medassist chat service.
//!
//! Serves the embedded chat widget assets and exposes the JSON endpoint the
//! widget talks to.

mod assistant;
mod server;
mod state;

pub use server::start_http_server;
pub use state::ApiState;
