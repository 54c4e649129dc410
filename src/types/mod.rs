//! Closed sets of fixed AWS domain values.
//!
//! Values that the SDKs model as open constant classes are plain enums here;
//! the sets are fixed by the service APIs.

mod common;

pub use common::*;
