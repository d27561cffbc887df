//! Turn execution for the Parley dialog engine.
//!
//! [`Lifecycle`] owns an ordered list of lifecycle tasks and runs them once
//! per turn against a conversation's memory. [`logging::init_logging`]
//! installs the tracing subscriber configured by `LoggingConfig`.

pub mod lifecycle;
pub mod logging;

pub use lifecycle::Lifecycle;
pub use logging::init_logging;
