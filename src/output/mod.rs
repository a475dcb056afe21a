pub mod markdown;
pub mod writer;

pub use markdown::{MARKDOWN_FILENAME, MARKDOWN_MIME, render_markdown};
pub use writer::{OutputResult, WriteOptions, write_document};
