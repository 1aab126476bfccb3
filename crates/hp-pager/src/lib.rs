//! Huffpage lazy paginator: decode only the chunks a page touches, memoize
//! them, and navigate page by page.

pub mod cache;
pub mod cursor;
pub mod handle;

pub use cache::{CacheStats, ChunkCache, DecodedChunk};
pub use cursor::PageCursor;
pub use handle::{open_for_paging, open_for_paging_with, Page, PageHandle};
