//! Seko Core - Domain types and logic for the Seko storefront.
//!
//! This crate holds everything the storefront knows about products, carts and
//! contact messages, independent of HTTP:
//! - `storefront` - JSON API server built on top of these types
//! - `integration-tests` - Black-box tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no sessions. Every operation completes synchronously.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and emails
//! - [`product`] - Product records and their validation
//! - [`catalog`] - Read-only product catalog
//! - [`cart`] - Shopping cart container
//! - [`shipping`] - Shipping cost policy
//! - [`contact`] - Contact form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod product;
pub mod shipping;
pub mod types;

pub use cart::{Cart, CartItem, CartLine, CartSummary};
pub use catalog::{Catalog, CatalogError};
pub use contact::{ContactForm, ContactMessage, FieldError, ValidationErrors};
pub use product::{Product, ProductError};
pub use types::*;
