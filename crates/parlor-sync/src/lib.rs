//! Parlor synchronization layer.
//!
//! Sits between the pure rule engine in `parlor-core` and the UI: an
//! in-memory stand-in for the managed document backend (versioned,
//! last-write-wins, subscriber fan-out), the bootstrap that creates new
//! game documents, an explicit registry for realtime listeners, and the
//! [`MoveCoordinator`] through which every move proposal flows.
//!
//! Kernels are pure and single-threaded; all concurrency lives here. Two
//! players racing on the same game are serialized by the store's per-entry
//! lock, so validation always runs against the latest persisted state and
//! the losing racer gets a typed rejection instead of a lost update.

pub mod bootstrap;
pub mod coordinator;
pub mod registry;
pub mod store;

pub use bootstrap::{new_game, new_game_with_rng};
pub use coordinator::MoveCoordinator;
pub use registry::{Subscription, SubscriptionRegistry};
pub use store::{GameUpdate, MemoryStore, StoreError};
