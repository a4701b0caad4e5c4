use core::alloc::Layout;
use core::fmt;

/// Errors reported by table operations.
///
/// A missing key is never an error: lookups return `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The operation is not provided by this table.
    ///
    /// Robin-Hood tables without tombstones need backward-shift deletion to
    /// remove entries, which this table does not implement, so `remove`
    /// always reports this.
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// The requested slot count or its byte size does not fit in `usize`.
    CapacityOverflow,
    /// The allocator could not satisfy a request for the given layout.
    AllocFailed {
        /// The layout that was requested.
        layout: Layout,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unsupported { operation } => {
                write!(f, "operation `{operation}` is not supported by this table")
            }
            Error::CapacityOverflow => f.write_str("capacity overflow"),
            Error::AllocFailed { layout } => write!(
                f,
                "memory allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align()
            ),
        }
    }
}

impl core::error::Error for Error {}
