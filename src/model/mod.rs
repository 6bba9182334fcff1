//! Persistence for learned value tables.

mod store;

pub use store::ModelStore;
