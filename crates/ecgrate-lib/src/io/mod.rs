pub mod annotations;

pub use annotations::{
    parse_annotations, parse_annotations_str, read_annotations, ParsedAnnotations, SkipReason,
    SkippedLine,
};
