//! BikesDeal Core - Shared domain library.
//!
//! This crate provides the types and pure logic used across all BikesDeal
//! components:
//! - `site` - Public marketing site API and admin console API
//! - `cli` - Command-line tools for migrations, seeding and data portability
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. Stores in the `site` crate load a collection,
//! hand it to the functions here, and write the result back.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, emails, and statuses
//! - [`content`] - Content sections, per-kind fields, defaults and resolution
//! - [`lead`] - Bike lead submissions
//! - [`contact`] - Contact-form submissions
//! - [`settings`] - Site-wide settings and background video
//! - [`export`] - Versioned export/import bundles
//! - [`media`] - Upload validation and naming rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod contact;
pub mod content;
pub mod export;
pub mod lead;
pub mod media;
pub mod settings;
pub mod types;

pub use types::*;
