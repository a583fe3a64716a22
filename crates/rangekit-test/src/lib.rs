//! Testing utilities for rangekit widgets.
//!
//! - [`Harness`] drives a widget with simulated focus, key, mouse and
//!   pointer input and collects the messages it returns
//! - [`MockFn`] records callback invocations, including their global order
//!
//! ```
//! use rangekit_test::MockFn;
//!
//! let on_change = MockFn::<(f64, usize)>::new();
//! let mut callback = on_change.recorder();
//! callback(&2.0, 0);
//! assert_eq!(on_change.calls(), vec![(2.0, 0)]);
//! ```

mod harness;
mod mock;

pub use harness::Harness;
pub use mock::MockFn;
