//! Text renderings of analysis results
//!
//!     Plain-text views for the CLI and for snapshot tests. JSON output does not live here:
//!     every result type is `Serialize` and the processor hands it to serde_json directly.

pub mod table;
pub mod treeviz;

pub use table::{derivation_to_lines, lexemes_to_lines, relations_to_lines, table_to_grid};
pub use treeviz::to_treeviz_str;
