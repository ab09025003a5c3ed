/// Filesystem adapters for attachment files and the source cache
mod file_reader;
mod file_writer;
mod source_cache;

pub use file_reader::AttachmentFileReader;
pub use file_writer::AttachmentFileWriter;
pub use source_cache::{CacheCleanupReport, SourceCache};
