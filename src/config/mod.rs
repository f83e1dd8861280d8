//! Configuration layer for netpulse.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The probe `url` has no default and must come from the CLI or the file.
//!
//! Headers are merged: TOML headers are applied first, CLI headers with the
//! same name replace them. A bearer token (CLI, then TOML) always sets
//! `Authorization` last.
//!
//! # CLI-Only Options
//!
//! `--once` and `--json` select the output mode of a single invocation and
//! have no TOML counterpart.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
