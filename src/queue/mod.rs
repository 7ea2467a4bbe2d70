pub mod blocking;
pub mod cancel;

pub use blocking::BlockingPriorityQueue;
pub use cancel::{CancellationSource, CancellationToken, Registration};
