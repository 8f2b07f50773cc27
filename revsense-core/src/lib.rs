//! Core library for revsense: the review-analysis model, the analysis
//! service client, the session state and the in-memory ticket registry.
//!
//! Nothing in this crate touches the terminal. The `revsense` binary owns a
//! single [`session::Session`] and a single [`tickets::TicketRegistry`] and
//! mutates them only from its event loop.

pub mod client;
pub mod config;
pub mod error;
pub mod latch;
pub mod pipeline;
pub mod session;
pub mod tickets;
pub mod types;
