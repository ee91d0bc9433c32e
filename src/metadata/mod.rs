crate::reexport!(table);
crate::reexport!(schema);
