//! Receivables and the persistence seam.
//!
//! The engine never talks to a database directly. Every read and write goes
//! through [`ReceivableStore`], implemented by the Postgres repository in the db
//! crate and by [`InMemoryReceivableStore`] for tests and local development.

mod memory;
mod store;
mod types;

pub use memory::InMemoryReceivableStore;
pub use store::{ReceivableStore, StoreError};
pub use types::{NewReceivable, Receivable, ReceivableStatus};
