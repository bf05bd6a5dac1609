//! Library side of the `relief-import` command: logging setup and the import
//! pipeline, shared by the binary and its integration tests.

pub mod logging;
pub mod pipeline;
pub mod types;
