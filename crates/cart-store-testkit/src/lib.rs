//! # Cart Store Testkit
//!
//! Testing utilities for the cart store.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Backends**: [`FlakyBackend`], a memory backend whose calls can be made
//!   to fail on demand, and which counts what it was asked to do
//! - **Generators**: Proptest strategies for raw items and operation sequences
//! - **Fixtures**: Helper structs for setting up carts over a shared backend
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use cart_store_testkit::generators::{op_sequence, apply};
//!
//! proptest! {
//!     #[test]
//!     fn totals_stay_consistent(ops in op_sequence(50)) {
//!         let fixture = cart_store_testkit::TestFixture::new();
//!         let mut cart = fixture.cart();
//!         for op in &ops {
//!             apply(&mut cart, op);
//!         }
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use cart_store_testkit::fixtures::{raw_item, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let mut cart = fixture.cart();
//! cart.add_item(&raw_item("a", 5.0, 2)).unwrap();
//!
//! // A second cart over the same backend sees the saved state
//! assert_eq!(fixture.cart().len(), 1);
//! ```

pub mod backends;
pub mod fixtures;
pub mod generators;

pub use backends::{CallCounts, FlakyBackend};
pub use fixtures::{raw_item, ChangeRecorder, TestFixture};
pub use generators::{apply, op_sequence, raw_item_value, CartOp};
