//! SolarDirect Core - Shared domain types.
//!
//! This crate provides the types used by the storefront:
//! - Catalog products and their categories
//! - The session cart and its entries
//! - Advisor queries and results exchanged with the model service
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP
//! clients, no sessions. This keeps cart and advisor rules testable without
//! a web server.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, cart, and advisor types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
