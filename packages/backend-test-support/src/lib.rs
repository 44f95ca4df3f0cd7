//! Shared test support for the okey workspace.
//!
//! Holds the logging bootstrap used by unit tests (through `ctor`) and by the
//! integration test binaries.

pub mod logging;
