//! Field extraction: pattern rules, positional resolution, assembly.

mod assembler;
pub mod positional;
pub mod rules;

pub use assembler::{DocumentExtraction, RecordAssembler};
pub use positional::{resolve_label_value, LabelRule, ROW_TOLERANCE};
