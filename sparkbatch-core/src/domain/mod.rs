//! Core domain types
//!
//! This module contains the records the Livy server owns and the client only
//! ever re-reads. The server is the single source of truth for all of them;
//! nothing here is mutated locally.

pub mod batch;
