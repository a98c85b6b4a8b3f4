//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and
//! from upstream platform objects at the platform boundary. They carry no database
//! or Discord types.

pub mod platform;
pub mod subscription;
