//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all shopfront components:
//! - `client` - Authenticated fetch wrapper and checkout client
//! - `cli` - Headless command-line driver
//!
//! # Architecture
//!
//! The core crate contains only types and constants - no I/O, no HTTP clients,
//! no browser state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Page locations, return paths and checkout wire types
//! - [`keys`] - Well-known storage keys, paths and user-facing messages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod keys;
pub mod types;

pub use types::*;
