crate::reexport!(span);
crate::reexport!(splitter);
crate::reexport!(resolver);
crate::reexport!(lines);
crate::reexport!(cache);
