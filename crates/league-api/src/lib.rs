//! HTTP client for the fantasy stock league API.

mod client;
mod response;

pub use client::{ApiConfig, HttpApi};
