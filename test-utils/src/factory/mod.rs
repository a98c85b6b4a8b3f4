//! Factory methods for creating test data.
//!
//! This module provides factory methods for inserting test rows with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let row = factory::create_subscription(&db).await?;
//!
//!     // Customize
//!     let row = factory::subscription::SubscriptionFactory::new(&db)
//!         .channel_id(42)
//!         .community_name("clc")
//!         .role_id(Some(7))
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod helpers;
pub mod subscription;

pub use subscription::{create_subscription, create_subscription_for};
