//! Reservation engine — availability, booking, lifecycle
//!
//! This module handles:
//! - Advisory availability queries (unlocked snapshot reads)
//! - The atomic booking transaction (locked conflict re-check + insert)
//! - Reservation lifecycle (update, cancel) with table-status reconciliation
//!
//! # Booking Flow
//!
//! ```text
//! find_available(date, time, party)      -- advisory, may be stale
//!     └─ client picks a table
//! book(user, table, date, time, party)
//!     ├─ 1. Eager validation (no locks held)
//!     ├─ 2. Begin transaction
//!     ├─ 3. First write on the table row takes the writer lock
//!     ├─ 4. Re-check conflict window under the lock (authoritative)
//!     ├─ 5. Conflict -> rollback, BookingOutcome::Rejected (not an error)
//!     ├─ 6. Insert reservation, set table status 'reserved'
//!     └─ 7. Commit
//! ```
//!
//! The check-then-act race between the advisory read and the commit is closed
//! by re-validating inside the same critical section that performs the insert.

mod manager;

pub use manager::{
    BookingOutcome, CONFLICT_WINDOW_SECS, ConflictRejection, ReservationManager, ReservationPatch,
};

#[cfg(test)]
mod tests;
