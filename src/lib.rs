//! Text-analysis engine behind an interactive SQL editor.
//!
//! Splits a buffer into executable statements, maps a cursor to the statement
//! it belongs to, classifies the clause the user is typing in and produces
//! completion candidates from a schema snapshot handed in by the host.
//!
//! All offsets are UTF-8 byte offsets into the buffer shown in the editor.
//!
//! ```rust
//! use qedit::{SchemaSnapshot, split, suggest};
//!
//! let sql = "SELECT 1; SELECT * FROM orders o WHERE o.";
//! let spans = split(sql);
//! assert_eq!(spans.len(), 2);
//! assert_eq!(spans[0].text(sql), "SELECT 1");
//!
//! let schema = SchemaSnapshot::new().with_table("orders", ["id", "total"]);
//! let labels: Vec<String> = suggest(sql, sql.len(), &schema)
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(labels, ["id", "total"]);
//! ```

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

reexport!(testing, test);
reexport!(config);
reexport!(error);
reexport!(logic);
reexport!(metadata);
reexport!(sql);
reexport!(statement);
reexport!(autocomplete);
reexport!(editor);
reexport!(engine);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};
