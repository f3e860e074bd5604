//! Core types for SolarDirect.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod advisor;
pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use advisor::{AdvisorQuery, AdvisorQueryError, AdvisorResult, AdvisorResultError};
pub use cart::{Cart, CartEntry};
pub use id::ProductId;
pub use price::{CurrencyCode, Price};
pub use product::{Category, Product, UnknownCategory};
