//! Ordered collection reconciliation for Vitrine.
//!
//! A [`Reconciler`] holds one site's items in display order. Reordering is
//! optimistic: the new order is visible immediately and the changed positions
//! are written to the store in the background. Writes for one site go through
//! a single queue, so a later reorder is never overtaken by an earlier one.
//!
//! Each entry carries a [`SyncState`]. Failed writes are never rolled back;
//! they mark the collection stale until [`Reconciler::reload`].
//!
//! Remote calls run under a [`RemotePolicy`]: a per-attempt timeout, plus
//! retry with exponential backoff for idempotent calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod collection;
mod config;
mod outcome;
mod queue;
mod reconciler;
mod remote;
mod sync;

pub use clock::CreationClock;
pub use collection::{Collection, PositionWrite};
pub use config::ReconcilerConfig;
pub use outcome::{PendingReorder, ReorderOutcome, WriteFailure};
pub use reconciler::Reconciler;
pub use remote::RemotePolicy;
pub use sync::{Entry, SyncState};
