/// Persistence entities shared across layers.
pub mod models;
/// Users and schedules persistence backends.
pub mod roster_store;
/// Storage abstraction layer for database operations.
pub mod storage;
