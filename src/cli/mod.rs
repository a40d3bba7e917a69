//! CLI command implementations

mod out;

pub use out::run_out;
