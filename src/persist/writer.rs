use bincode::Options;
use serde::Serialize;
use tracing::info;

use crate::{NaiveBayesError, Result};

use super::bundle::{
    self,
    Bundle,
    Table,
    FORMAT_TAG,
    FORMAT_VERSION,
};

use std::fs;
use std::path::Path;


/// Collects the tables of a model, then writes them at once.
pub(crate) struct BundleWriter {
    model: &'static str,
    tables: Vec<Table>,
}


impl BundleWriter {
    pub(crate) fn new(model: &'static str) -> Self {
        Self { model, tables: Vec::new() }
    }


    /// Encodes `value` and appends it as the table `name`.
    pub(crate) fn table<T>(mut self, name: &str, value: &T) -> Result<Self>
        where T: Serialize + ?Sized
    {
        let payload = bundle::options().serialize(value)?;
        self.tables.push(Table { name: name.to_string(), payload });
        Ok(self)
    }


    /// Encodes the whole bundle into a buffer and writes it to `path`.
    pub(crate) fn write(self, path: &Path) -> Result<()> {
        let n_tables = self.tables.len();
        let bundle = Bundle {
            format: FORMAT_TAG.to_string(),
            version: FORMAT_VERSION,
            model: self.model.to_string(),
            tables: self.tables,
        };
        let bytes = bundle::options().serialize(&bundle)?;

        fs::write(path, &bytes)
            .map_err(|source| NaiveBayesError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            model = self.model,
            path = %path.display(),
            tables = n_tables,
            bytes = bytes.len(),
            "saved parameters"
        );
        Ok(())
    }
}
