//! Common library for the TaskDesk application
//!
//! This crate provides shared functionality used by the domain core and the
//! web service, including the in-memory cache backing user sessions and the
//! error type reported by in-memory stores.

pub mod cache;
pub mod error;
