//! SeaORM entities for the relay's relational store.

pub mod prelude;

pub mod subscription;
