pub mod browser;
pub mod downloader;
pub mod export_writer;
pub mod field_extractor;
pub mod news_session;

#[cfg(test)]
pub mod fake_browser;

pub use browser::*;
pub use downloader::*;
pub use export_writer::*;
pub use field_extractor::*;
pub use news_session::*;
