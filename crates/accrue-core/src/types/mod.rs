//! Domain types.

mod date;
mod index;

pub use date::Date;
pub use index::IndexId;
