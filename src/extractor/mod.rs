pub mod username_extractor;

pub use username_extractor::{
    extract_usernames, parse_usernames, ExportShape, Extraction, ExtractionStats,
    UsernameExtractor, UsernameSet,
};
