//! Removal of a property from a target document.
//!
//! The path is resolved in the target itself, not through the canonical
//! document, since sibling order may differ. The removed span takes one
//! separator with it:
//!
//! - with a previous sibling: from the end of that sibling to the end of the
//!   property (drops the leading comma)
//! - with only a next sibling: from the start of the property to the start
//!   of the next one (drops the trailing comma)
//! - otherwise the whole interior of the parent, which is left as `{}`

use crate::core::{
    document::{Document, ParseError},
    path::{PropertyPath, resolve},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

pub fn delete_from(target: &mut Document, path: &PropertyPath) -> Result<DeleteOutcome, ParseError> {
    let Some(property) = resolve(target, path).found() else {
        return Ok(DeleteOutcome::NotFound);
    };

    let span = target.span(property);
    let range = match (target.prev_sibling(property), target.next_sibling(property)) {
        (Some(prev), _) => target.span(prev).end..span.end,
        (None, Some(next)) => span.start..target.span(next).start,
        (None, None) => match target.parent(property) {
            Some(object) => {
                let object_span = target.span(object);
                object_span.start + 1..object_span.end - 1
            }
            None => span.start..span.end,
        },
    };

    target.splice(range, "")?;
    Ok(DeleteOutcome::Deleted)
}
