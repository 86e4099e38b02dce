//! OMDb catalog client.

mod client;
mod types;

pub use client::OmdbClient;
