pub use crate::cache::BoundedFifoCache;
pub use crate::ds::{Comparison, RecordArena, RecordId, RecordList, SortedBag};
pub use crate::error::{Cancelled, ConfigError, DuplicateKeyError};
pub use crate::queue::{BlockingPriorityQueue, CancellationSource, CancellationToken, Registration};
pub use crate::traits::{BlockingQueue, Queue};
