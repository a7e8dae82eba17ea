//! Livestock Market Core - shared types and view-state logic.
//!
//! This crate is used by:
//! - `storefront` - the public catalog and marketing site
//! - `cli` - migrations and account management
//!
//! # Architecture
//!
//! Like the rest of the core crate, everything here is pure: no I/O, no
//! database access, no HTTP clients. Request handlers load a store, call one
//! of its mutators, and persist the result wherever the web layer keeps it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails and prices
//! - [`stores`] - The four view-state containers (filters, modal, chat, UI)
//! - [`catalog`] - Catalog query string handling and the floating filter bar

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod stores;
pub mod types;

pub use types::*;
