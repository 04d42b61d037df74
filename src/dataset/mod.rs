//! Batch processing: match specifications in, one CSV table out.
//!
//! The batch is all-or-nothing. A malformed specification, an unreadable
//! image or an incomplete row stops the run and no table is written.

pub mod builder;
pub mod csv_writer;
pub mod spec;

pub use builder::build_dataset;
