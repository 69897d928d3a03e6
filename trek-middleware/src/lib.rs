#![doc = include_str!("../README.md")]
//! trek-middleware
//!
//! Re-exports for provider wrappers and result caches.

mod cache;
mod resilient;

pub use crate::cache::{ClockedResultCache, MokaResultCache, ResultCache};
pub use crate::resilient::{ResilientProvider, isolate};
