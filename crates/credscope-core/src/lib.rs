//! Transport-agnostic dashboard logic for credscope.
//!
//! Everything here is driven by the UI crate and talks to the backend
//! only through the [`RecordsApi`] trait, which keeps the session and
//! the row/paging engines testable against in-memory fakes.

pub mod api;
pub mod capabilities;
pub mod pager;
pub mod rows;
pub mod search;
pub mod session;
pub mod store;

pub use api::{ApiError, ApiResult, RecordsApi};
pub use capabilities::{Clipboard, MemoryClipboard, Notice, NoticeBuffer, NoticeLevel, Notifier};
pub use pager::{Pager, DEFAULT_PAGE_SIZE, PAGE_SIZES};
pub use rows::{abbreviate, extract_domain, is_truncated, SortDirection, SortKey};
pub use search::SearchDebounce;
pub use session::{CopyField, Session, SessionEvent};
pub use store::RecordStore;
