//! Testing utilities shared by the workspace
//!
//! - **[`time`]**: [`MockClock`], a controllable wall clock
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//!
//! use oidc_session_common::testing::MockClock;
//! use oidc_session_common::time::Clock;
//!
//! let clock = MockClock::at_millis(0);
//! clock.advance(Duration::from_millis(3_600_001));
//! assert_eq!(clock.millis_since_epoch(), 3_600_001);
//! ```

pub mod time;

pub use time::MockClock;
