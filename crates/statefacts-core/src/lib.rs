//! Core types and trait definitions for the statefacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the bundled reference dataset of US states, the fun-fact document model and
//! the [`store::FunFactStore`] abstraction that storage backends implement.

pub mod dataset;
pub mod error;
pub mod funfact;
pub mod state;
pub mod store;

pub use error::{Error, Result};
