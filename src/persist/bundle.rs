use bincode::Options;
use serde::{
    Serialize,
    Deserialize,
};


/// The tag written at the beginning of every bundle.
pub const FORMAT_TAG: &str = "minibayes";

/// The version of the bundle layout.
/// Restoring a bundle of another version fails.
pub const FORMAT_VERSION: u32 = 1;


/// A persisted model.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Bundle {
    pub(crate) format: String,
    pub(crate) version: u32,
    pub(crate) model: String,
    pub(crate) tables: Vec<Table>,
}


/// A named, independently encoded parameter table.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Table {
    pub(crate) name: String,
    pub(crate) payload: Vec<u8>,
}


/// The `bincode` configuration used for the bundle and every table.
/// Trailing bytes are rejected so that a table decodes only
/// into the type it was encoded from.
#[inline(always)]
pub(crate) fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}
