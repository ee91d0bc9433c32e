//! Cursor-aware completion.
//!
//! - `scope`      : Tables (and aliases) visible from the cursor's query level.
//! - `context`    : Which clause the cursor sits in and what has been typed.
//! - `suggestion` : Candidates for a context, drawn from a schema snapshot.
//! - `edit`       : Turning a picked candidate into a buffer edit.

crate::reexport!(scope);
crate::reexport!(context);
crate::reexport!(suggestion);
crate::reexport!(edit);
