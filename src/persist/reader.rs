use bincode::Options;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{NaiveBayesError, Result};

use super::bundle::{
    self,
    Bundle,
    Table,
    FORMAT_TAG,
    FORMAT_VERSION,
};

use std::fs;
use std::path::{Path, PathBuf};
use std::vec;


/// Reads a bundle whose header and table names are already validated.
/// The tables are handed out in the order of the schema.
pub(crate) struct BundleReader {
    path: PathBuf,
    tables: vec::IntoIter<Table>,
}


impl BundleReader {
    /// Reads `path` and checks that it holds a bundle of `model`
    /// whose tables are exactly `schema`, in order.
    pub(crate) fn open(path: &Path, model: &str, schema: &[&str])
        -> Result<Self>
    {
        let bytes = fs::read(path)
            .map_err(|source| NaiveBayesError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let bundle: Bundle = bundle::options()
            .deserialize(&bytes)
            .map_err(|e| corrupt(path, format!("undecodable bundle ({e})")))?;


        if bundle.format != FORMAT_TAG {
            let reason = format!("unknown format tag {:?}", bundle.format);
            return Err(corrupt(path, reason));
        }
        if bundle.version != FORMAT_VERSION {
            let reason = format!(
                "format version {} is not supported (expected {FORMAT_VERSION})",
                bundle.version,
            );
            return Err(corrupt(path, reason));
        }
        if bundle.model != model {
            let reason = format!(
                "the file holds a {:?} model, not a {model:?} model",
                bundle.model,
            );
            return Err(corrupt(path, reason));
        }


        let names = bundle.tables.iter()
            .map(|table| table.name.as_str())
            .collect::<Vec<_>>();
        if names != schema {
            let reason = format!("expected tables {schema:?}, found {names:?}");
            return Err(corrupt(path, reason));
        }

        info!(
            model,
            path = %path.display(),
            tables = schema.len(),
            "read parameter bundle"
        );

        Ok(Self {
            path: path.to_path_buf(),
            tables: bundle.tables.into_iter(),
        })
    }


    /// Decodes the next table.
    pub(crate) fn table<T: DeserializeOwned>(&mut self) -> Result<T> {
        let table = self.tables.next()
            .ok_or_else(|| self.corrupt("missing table"))?;

        bundle::options()
            .deserialize(&table.payload)
            .map_err(|e| {
                self.corrupt(format!("undecodable table {:?} ({e})", table.name))
            })
    }


    /// Builds the error for a bundle that is well-formed
    /// but inconsistent.
    pub(crate) fn corrupt<S: Into<String>>(&self, reason: S) -> NaiveBayesError {
        corrupt(&self.path, reason.into())
    }
}


fn corrupt(path: &Path, reason: String) -> NaiveBayesError {
    warn!(path = %path.display(), %reason, "rejected parameter file");
    NaiveBayesError::Corrupt { path: path.to_path_buf(), reason }
}
