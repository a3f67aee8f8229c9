/// Archive adapters
mod cab_extractor;

pub use cab_extractor::{extraction_unavailable, CabExtractor, ExtractTool, CAB_SIGNATURE};
