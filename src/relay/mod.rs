//! HTTP relay server

mod error;
mod handler;
pub mod server;

pub use error::RelayError;
pub use handler::ChatHandler;
pub use server::{app, run_server, RelayState};
