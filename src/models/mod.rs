//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{FingerprintRequest, PutRequest, SearchQuery};
pub use responses::{
    FingerprintResponse, GetResponse, HealthResponse, InvalidateResponse, PutResponse,
};
