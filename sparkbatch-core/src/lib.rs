//! Sparkbatch Core
//!
//! Core types for the sparkbatch toolkit.
//!
//! This crate contains:
//! - Domain types: server-owned batch records and their lifecycle states
//! - DTOs: request payloads sent to the batches API

pub mod domain;
pub mod dto;
