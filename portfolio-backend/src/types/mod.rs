pub mod query;
pub mod response;

pub use query::{ListQuery, SearchQuery, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use response::{ApiResponse, PaginationMeta};
