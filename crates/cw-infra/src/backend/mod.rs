//! HTTP adapter for the metering backend.

mod client;
mod dto;

pub use client::HttpBackendClient;
