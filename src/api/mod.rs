// HTTP client for the remote match service.

pub mod client;

pub use client::{ApiError, MatchApiClient, DEFAULT_BASE_URL};
