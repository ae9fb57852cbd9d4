//! Small cross-cutting helpers shared by the Dataworker crates.

pub mod ordering;
pub mod timer;

pub use ordering::strict_compare;
pub use timer::async_time_fn;
