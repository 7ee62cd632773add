mod extractor;

pub use extractor::{ExtractedPage, PageExtractor};
