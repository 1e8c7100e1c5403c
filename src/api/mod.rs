//! Wire types for the client-facing and upstream APIs

mod client;
mod openai;

pub use client::*;
pub use openai::*;
