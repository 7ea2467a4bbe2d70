//! synckit: thread-safe container primitives.
//!
//! Two building blocks for concurrent systems: a blocking priority queue
//! ([`queue::BlockingPriorityQueue`]) with cancellable consumers, and a
//! capacity-bounded cache ([`cache::BoundedFifoCache`]) that evicts in
//! insertion order. Both guard their state with one coarse lock per
//! instance; the queue's condition-variable wait is the only suspension
//! point in the crate.

pub mod cache;
pub mod ds;
pub mod error;
pub mod prelude;
pub mod queue;
pub mod traits;
