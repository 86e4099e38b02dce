//! Application core: request sessions, watchlist, and the event controller.

pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod session;
pub mod watchlist;
