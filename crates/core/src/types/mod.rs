//! Core types for shopfront.
//!
//! This module provides type-safe wrappers for the values that cross the
//! browser and network boundaries.

pub mod checkout;
pub mod location;

pub use checkout::{CheckoutErrorBody, CheckoutRequest, CheckoutResponse};
pub use location::{LocationError, PageLocation, ReturnPath, ReturnPathError};
