//! Service layer module.
//!
//! Contains the key generation core and the service wrapper used by the API.

pub mod digits;
pub mod generator;
pub mod keys;

pub use generator::{KeyChain, KeyGenerator};
pub use keys::{KeyBatch, KeyService};
