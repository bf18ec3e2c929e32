//! Repository implementations for database access.

mod receivable;

pub use receivable::ReceivableRepository;
