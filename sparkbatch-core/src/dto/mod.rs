//! Request payloads for the batches API
//!
//! DTOs in this module describe what the client sends; responses are parsed
//! into the domain types instead.

pub mod batch;
