//! Integration with the `catt` command-line utility.
//!
//! catt speaks the actual cast protocol; this module only runs it and makes
//! sense of its free-text output. There is no machine-readable contract —
//! all parsing here is best-effort heuristics over loosely structured text.

pub mod client;
pub mod runner;
pub mod scanner;
pub mod status;
