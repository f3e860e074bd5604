//! SolarDirect storefront library.
//!
//! This crate provides the storefront as a library so the binary, the
//! route tests and the end-to-end tests all build the same router via
//! [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod gallery;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod share;
pub mod state;
