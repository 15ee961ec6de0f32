//! Global log stream instance.
//!
//! The control loop is the only regular producer; the drain runs between
//! iterations (hardware) or at the end of a simulation (host).

use crate::logging::LogStream;

/// Process log ring.
pub static LOG_STREAM: LogStream = LogStream::new();
