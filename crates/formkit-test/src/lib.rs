//! # formkit-test
//!
//! Testing utilities for formkit. Provides an in-process HTTP client that
//! drives an axum router without binding a socket, and ready-made records
//! for the built-in onboarding schema.

pub mod client;
pub mod fixtures;

pub use client::{TestClient, TestResponse};
