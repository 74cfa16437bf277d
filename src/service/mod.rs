//! Record Service Module
//!
//! Cache-aside coordination between the durable [`crate::store::RecordStore`]
//! and the [`crate::cache::CacheBackend`].

mod records;
mod validation;

#[cfg(test)]
mod fakes;

pub use records::{RecordService, Timeouts};
pub use validation::{validate_name, MAX_NAME_LENGTH};
