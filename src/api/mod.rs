//! API clients for external services
//!
//! - Gazes: anime title lookup and episode video references

pub mod gazes;

pub use gazes::{CatalogError, GazesClient};
