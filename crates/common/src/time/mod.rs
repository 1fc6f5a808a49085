//! Wall-clock abstraction
//!
//! Session expiry is computed in epoch milliseconds, so everything that needs
//! "now" takes a [`Clock`] instead of calling `SystemTime::now()` directly.
//! Tests swap in `testing::MockClock`.

pub mod clock;

pub use clock::{Clock, SystemClock};
