//! Log output.
//!
//! Drains a [`LogStream`] into any `core::fmt::Write` sink: the UART on
//! hardware, stdout on the host simulation.
//!
//! Format: `[timestamp] LEVEL: message`

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Write one formatted entry, newline-terminated.
pub fn write_entry<W: Write>(out: &mut W, entry: &LogEntry) -> core::fmt::Result {
    writeln!(
        out,
        "[{:>12}] {}: {}",
        entry.timestamp,
        entry.level.as_str(),
        entry.message()
    )
}

/// Drain every complete entry into `out`.
///
/// Reports and resets the dropped counter after the entries. Returns the
/// number of entries written; stops at the first sink error.
pub fn drain_into<W: Write, const N: usize>(stream: &LogStream<N>, out: &mut W) -> usize {
    let mut written = 0;
    while let Some(entry) = stream.drain() {
        if write_entry(out, &entry).is_err() {
            return written;
        }
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 && writeln!(out, "[WARN] Dropped: {}", dropped).is_ok() {
        stream.reset_dropped();
    }

    written
}
