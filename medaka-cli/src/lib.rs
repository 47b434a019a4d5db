//! Library surface of the medaka CLI, exposed for integration testing.

pub mod cli;
pub mod logging;
