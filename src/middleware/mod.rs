//! Middleware module
//!
//! This module contains filters applied to inbound messages before dispatch

pub mod auth;

pub use auth::OwnerFilter;
