//! Booking ledger: commit, cancellation, listings and post-commit hooks

pub mod committer;
pub mod ports;
pub mod post_commit;
pub mod service;

pub use committer::BookingCommitter;
pub use post_commit::PostCommitDispatcher;
pub use service::BookingService;
