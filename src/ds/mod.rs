pub mod record_arena;
pub mod record_list;
pub mod sorted_bag;

pub use record_arena::{RecordArena, RecordId};
pub use record_list::RecordList;
pub use sorted_bag::{Comparison, SortedBag};
