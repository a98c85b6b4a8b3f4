//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot (command handlers, dispatcher task) and the data
//! layer. They own the in-memory subscription cache, pair it with repository writes
//! and drive delivery of notifications to Discord.

pub mod media;
pub mod notification;
pub mod subscription;
pub mod translation;
