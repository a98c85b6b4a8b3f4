//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database. Use them for
//! unit tests and as inputs to code that converts entity models.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let row = fixture::subscription::entity();
//! let with_role = fixture::subscription::entity_builder().role_id(Some(5)).build();
//! ```

pub mod subscription;

pub use subscription::{
    entity as subscription_entity, entity_builder as subscription_entity_builder,
};
