//! fal-studio library crate.
//!
//! Turns user-facing generation options into fal.ai model calls and serves
//! them over a small JSON API. Modules are public for integration testing.

pub mod cli;
pub mod config;
pub mod fal;
pub mod generation;
pub mod server;
