//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models to keep
//! the data layer separate from business logic. All database queries, inserts,
//! updates, and deletes are performed through these repositories.

pub mod subscription;

#[cfg(test)]
mod test;
