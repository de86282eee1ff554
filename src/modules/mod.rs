//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the generative model client, the imaging adapters built on it,
//! and local asset storage.

pub mod gemini;
pub mod imaging;
pub mod storage;
