//! Checkpoint persistence for trained individuals and whole populations.
//!
//! Records are stored as pretty-printed JSON envelopes:
//!
//! ```json
//! {
//!   "kind": "individual",
//!   "checksum": "c0ffee...",
//!   "payload": { ... }
//! }
//! ```
//!
//! The checksum is an FNV-1a 64 hash of the canonical payload JSON, so a
//! truncated or hand-edited file is reported as [`LoadError::Corrupt`]
//! rather than silently deserialized. Loading distinguishes a missing file,
//! a corrupt one, and a checkpoint of the wrong kind as separate
//! [`LoadError`] variants so callers never have to match on message text.

pub use self::{envelope::*, record::*};

mod envelope;
mod record;
