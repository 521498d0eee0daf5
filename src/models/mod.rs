//! Request and Response models for the settings API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ValueRequest;
pub use responses::{
    AddResponse, AllResponse, DeleteResponse, GetResponse, HealthResponse, InvalidateResponse,
    OptionsResponse, SetResponse, StatsResponse, TempResponse,
};
