//! netpulse: connectivity monitor
//!
//! A library for tracking whether a backend is reachable and notifying
//! subscribers every time the online/offline state flips.

pub mod config;
pub mod monitor;
pub mod probe;
pub mod time;
