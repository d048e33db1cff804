//! Provides the `NaiveBayes` trait.
//!
//! Every model in this crate follows the same lifecycle:
//!
//! 1. construct it (`init`, `with_instances`, or `from_file`),
//! 2. ingest labeled instances (`add_instance` / `add_instances`),
//! 3. call [`NaiveBayes::fit`],
//! 4. call [`NaiveBayes::predict`] as often as you like,
//!    and [`NaiveBayes::save`] / [`NaiveBayes::restore`] at any point.
//!
//! Ingestion is not part of the trait
//! since its signature differs among the models.
use crate::{Result, best_label};

use std::collections::BTreeMap;
use std::path::Path;


/// Logarithmic scores (`ln P(label) + ln P(instance | label)`)
/// keyed by label. The scores are not normalized.
pub type Scores = BTreeMap<String, f64>;


/// The trait [`NaiveBayes`] defines the common interface
/// of the Naive Bayes classifiers.
///
/// # Required Methods
/// - [`NaiveBayes::name`]
/// - [`NaiveBayes::labels`]
/// - [`NaiveBayes::fit`]
/// - [`NaiveBayes::predict`]
/// - [`NaiveBayes::save`]
/// - [`NaiveBayes::restore`]
/// - [`NaiveBayes::info`] ... optional.
///
/// # Provided Methods
/// - [`NaiveBayes::predict_label`]
pub trait NaiveBayes {
    /// The instance type accepted by [`NaiveBayes::predict`].
    type Instance: ?Sized;

    /// Returns the name of the model.
    fn name(&self) -> &str;

    /// Returns the information of the model as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }

    /// Returns the labels seen during training.
    fn labels(&self) -> Vec<&str>;

    /// Computes the parameters from all the instances ingested so far.
    /// Instances added after this call are not reflected in
    /// [`NaiveBayes::predict`] until `fit` is called again.
    fn fit(&mut self);

    /// Computes the logarithmic score of each label for `instance`.
    /// The label with the largest score is the prediction.
    fn predict(&self, instance: &Self::Instance) -> Scores;

    /// Returns the label with the largest score.
    /// The first label with the maximal score wins;
    /// there is no guaranteed tie-break order.
    fn predict_label(&self, instance: &Self::Instance) -> Option<String> {
        let scores = self.predict(instance);
        best_label(&scores).map(str::to_string)
    }

    /// Writes the parameters to `path`.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Replaces the state of `self` by the parameters stored in `path`.
    /// On failure `self` is left untouched.
    fn restore<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;
}
