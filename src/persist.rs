//! Persistence of the model parameters.
//!
//! A model is stored as a *bundle*:
//! a header (format tag, format version, model kind)
//! followed by an ordered list of named tables.
//! Each table is encoded independently with `bincode`
//! and stored as a length-prefixed byte payload,
//! so that a reader can check the table count and names
//! before decoding anything.

/// Defines the on-disk structs.
mod bundle;

/// Writes a bundle.
mod writer;

/// Reads and validates a bundle.
mod reader;

pub use bundle::{FORMAT_TAG, FORMAT_VERSION};

pub(crate) use writer::BundleWriter;
pub(crate) use reader::BundleReader;
