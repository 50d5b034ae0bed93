pub mod page;
pub mod row;

pub use page::{PageResult, PageSnapshot};
pub use row::{dedup_key, dedup_rows, number_rows, NumberedRow, QuestionRow, EXPORT_HEADERS};
