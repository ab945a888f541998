use thiserror::Error;

use crate::types::SlotKind;

/// Errors surfaced by the tree and its façades.
///
/// Lookups that simply miss return [`Cursor::End`](crate::Cursor::End) or
/// `None`; only the `at` accessors turn a miss into [`Error::OutOfRange`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The allocation strategy (or the system allocator) refused a slot.
    /// The container is left exactly as it was before the call.
    #[error("allocation of a {0} slot failed")]
    Alloc(SlotKind),
    #[error("key not found")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, Error>;
