//! GoMarketplace Core - Cart domain types.
//!
//! This crate provides the types shared by every GoMarketplace component:
//! - `cart` - The persistent cart store and its provider scope
//! - `cli` - Command-line tools for inspecting and editing a stored cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure cart rules - no I/O, no
//! storage access, no async runtime. This keeps it lightweight and allows
//! the mutation rules to be tested in isolation.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, line items, and the [`Cart`] aggregate

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
