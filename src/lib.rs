pub mod annotator;
pub mod batch;
pub mod render;

// Re-export main types for convenient access
pub use annotator::{
    annotate, annotate_optional, builtin_dictionary, concat_text,
    AnnotatorConfig, DictionaryError, KeywordAnnotator, KeywordDictionary, KeywordEntry,
    KeywordMatch, OwnedSegment, Segment, NO_EFFECT_PLACEHOLDER,
};

// Re-export presentation helpers
pub use render::{Anchor, HoverAdapter, HoverHandler, RenderFormat};

// Re-export batch processing types for the CLI and benchmarking
pub use batch::{annotate_files, BatchConfig, FileAnnotation, FileStats, RunStats};
