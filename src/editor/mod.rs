//! Editor commands built on the statement layer: running statements and
//! toggling line comments.

crate::reexport!(execution);
crate::reexport!(comment);
