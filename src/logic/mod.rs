crate::reexport!(cursor);
