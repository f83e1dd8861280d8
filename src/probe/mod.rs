//! Probe layer for answering "can we reach the backend right now".
//!
//! This module provides types and traits for:
//! - The reachability capability consumed by the monitor ([`ReachabilityProbe`])
//! - An HTTP-based default probe ([`HttpProbe`])
//! - Building HTTP requests and reading responses ([`HttpRequest`], [`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])

mod client;
mod error;
mod http;
mod reachability;

#[cfg(test)]
mod reachability_tests;

pub use client::ReqwestClient;
pub use error::{HttpError, ProbeError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use reachability::{HttpProbe, ReachabilityProbe};
