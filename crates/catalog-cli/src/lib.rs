//! Library side of the `catalog-migrate` binary.
//!
//! - [`logging`]: subscriber setup and row-value redaction
//! - [`pipeline`]: the staged migration driver

pub mod logging;
pub mod pipeline;
