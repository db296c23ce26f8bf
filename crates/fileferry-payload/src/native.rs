//! Native storage item list entries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of entries the native item list format reliably
/// carries. Longer selections are silently truncated by the format, which
/// is why the legacy drop list is consulted as well.
pub const NATIVE_LIST_LIMIT: usize = 16;

/// Why one entry of the native item list could not be materialized.
///
/// These are per-item conditions; decoding falls through to the remaining
/// formats instead of aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum NativeItemError {
    /// Access to the underlying item was denied.
    #[error("access denied")]
    AccessDenied,

    /// The entry is virtual and has no materializable handle.
    #[error("virtual item cannot be materialized")]
    VirtualItem,
}
