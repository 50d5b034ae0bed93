pub mod page_ctx;
pub mod page_flow;

pub use page_ctx::{build_page_url, PageCtx};
pub use page_flow::{PageFlow, PageOutcome};
