//! Facade crate for the fileferry workspace.
//!
//! Re-exports the three member crates under stable module names so a
//! frontend only needs one dependency:
//!
//! - [`model`]: data model, naming policy, filesystem capability trait
//! - [`payload`]: drag/clipboard payload decoding
//! - [`ops`]: collision resolution, operation execution, recycle bin,
//!   status and history integration

pub use fileferry_core as model;
pub use fileferry_ops as ops;
pub use fileferry_payload as payload;
