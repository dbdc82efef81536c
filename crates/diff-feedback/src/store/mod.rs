//! Annotation store: comment operations and line position lookup.

mod annotations;
mod line_index;

pub use annotations::{
    comments, get_comment, remove_comment, upsert_comment, AnnotationError, Upserted,
};
pub use line_index::LineIndex;
