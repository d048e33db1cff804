use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{NaiveBayes, NaiveBayesError, Scores, Result};
use crate::common::checker::check_binary;
use crate::common::utils::uniform_log_prior;
use crate::common::probability::{Probability, Bernoulli};
use crate::persist::{BundleReader, BundleWriter};

use std::collections::BTreeMap;
use std::path::Path;


const MODEL: &str = "bernoulli";
const SCHEMA: [&str; 2] = ["observations", "probabilities"];


/// The 0/1 observations of a label and the mass function fitted to them.
#[derive(Debug, Clone, Default, PartialEq)]
struct Observations {
    values: Vec<u8>,
    fitted: Option<Bernoulli>,
}


impl Observations {
    /// `#ones / #values`, or `None` without observations.
    fn fit(&mut self) {
        let n_ones = self.values.iter()
            .filter(|&&v| v == 1)
            .count();
        let n_values = self.values.len();

        self.fitted = (n_values > 0).then(|| {
            Bernoulli::new(n_ones as f64 / n_values as f64)
        });
    }
}


/// Bernoulli Naive Bayes over binary instances.
/// The struct name comes from scikit-learn.
///
/// Each label is modeled by a single probability `p` of observing `1`,
/// shared by every position of an instance.
/// `predict` returns
/// `ln(1 / #labels) + Σ_v ln([v = 1] * p + [v = 0] * (1 - p))`.
///
/// Training instances must consist of `0` and `1` only.
/// Query values are not validated;
/// any other value has probability zero and drives the score to `-inf`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BernoulliNB {
    labels: BTreeMap<String, Observations>,
}


impl BernoulliNB {
    /// Initializes an empty model.
    pub fn init() -> Self {
        Self::default()
    }


    /// Ingests `dataset` and returns `self`.
    /// See [`BernoulliNB::add_instances`].
    pub fn with_instances<D, L, V>(mut self, dataset: D) -> Result<Self>
        where D: IntoIterator<Item = (L, V)>,
              L: AsRef<str>,
              V: AsRef<[i64]>,
    {
        self.add_instances(dataset)?;
        Ok(self)
    }


    /// Builds a model from the parameters stored in `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut nb = Self::init();
        nb.restore(path)?;
        Ok(nb)
    }


    /// Appends `values` to the observations of `label`.
    ///
    /// # Errors
    /// Returns [`NaiveBayesError::InvalidFeatureValue`]
    /// if a value is neither `0` nor `1`.
    /// In that case nothing is appended and
    /// the label is not registered.
    pub fn add_instance(&mut self, values: &[i64], label: &str)
        -> Result<()>
    {
        validate(values, label)?;
        self.push(values, label);
        Ok(())
    }


    /// Adds each `(label, values)` pair of `dataset`.
    ///
    /// # Errors
    /// The whole batch is validated first.
    /// If any instance holds a value other than `0` or `1`,
    /// [`NaiveBayesError::InvalidFeatureValue`] is returned
    /// and none of the instances is ingested.
    pub fn add_instances<D, L, V>(&mut self, dataset: D) -> Result<()>
        where D: IntoIterator<Item = (L, V)>,
              L: AsRef<str>,
              V: AsRef<[i64]>,
    {
        let dataset = dataset.into_iter().collect::<Vec<_>>();

        dataset.iter()
            .try_for_each(|(label, values)| {
                validate(values.as_ref(), label.as_ref())
            })?;

        for (label, values) in &dataset {
            self.push(values.as_ref(), label.as_ref());
        }
        debug!(model = MODEL, instances = dataset.len(), "ingested batch");
        Ok(())
    }


    /// Ingests `dataset`, then fits the model.
    pub fn fit_with<D, L, V>(&mut self, dataset: D) -> Result<()>
        where D: IntoIterator<Item = (L, V)>,
              L: AsRef<str>,
              V: AsRef<[i64]>,
    {
        self.add_instances(dataset)?;
        self.fit();
        Ok(())
    }


    /// Returns the observations retained for `label`.
    pub fn observations(&self, label: &str) -> Option<&[u8]> {
        self.labels.get(label)
            .map(|obs| &obs.values[..])
    }


    /// Returns the fitted probability of `1` for `label`.
    pub fn probability(&self, label: &str) -> Option<f64> {
        self.labels.get(label)?
            .fitted
            .map(|b| b.p())
    }


    /// Appends already validated values.
    fn push(&mut self, values: &[i64], label: &str) {
        self.labels.entry(label.to_string())
            .or_default()
            .values
            .extend(values.iter().map(|&v| v as u8));
    }
}


fn validate(values: &[i64], label: &str) -> Result<()> {
    check_binary(values)
        .map_err(|(position, value)| {
            NaiveBayesError::InvalidFeatureValue {
                label: label.to_string(),
                position,
                value,
            }
        })
}


impl NaiveBayes for BernoulliNB {
    type Instance = [i64];

    fn name(&self) -> &str {
        "Bernoulli Naive Bayes"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let n_obs = self.labels.values()
            .map(|obs| obs.values.len())
            .sum::<usize>();
        let info = Vec::from([
            ("# of labels", self.labels.len().to_string()),
            ("# of observations", n_obs.to_string()),
        ]);
        Some(info)
    }


    fn labels(&self) -> Vec<&str> {
        self.labels.keys()
            .map(String::as_str)
            .collect()
    }


    fn fit(&mut self) {
        self.labels.par_iter_mut()
            .for_each(|(_, obs)| obs.fit());

        self.labels.iter()
            .filter(|(_, obs)| obs.fitted.is_none())
            .for_each(|(label, _)| {
                warn!(
                    model = MODEL,
                    label = label.as_str(),
                    "no observations, the label is left unfitted"
                );
            });

        debug!(model = MODEL, labels = self.labels.len(), "fitted");
    }


    fn predict(&self, values: &[i64]) -> Scores {
        let prior = uniform_log_prior(self.labels.len());

        self.labels.par_iter()
            .map(|(label, obs)| {
                let score = match &obs.fitted {
                    Some(mass) => {
                        values.iter()
                            .fold(prior, |score, &v| {
                                score + mass.log_probability(v)
                            })
                    },
                    None => f64::NEG_INFINITY,
                };
                (label.clone(), score)
            })
            .collect()
    }


    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let observations = self.labels.iter()
            .map(|(label, obs)| (label.as_str(), &obs.values))
            .collect::<BTreeMap<_, _>>();
        let probabilities = self.labels.iter()
            .filter_map(|(label, obs)| {
                obs.fitted.map(|b| (label.as_str(), b.p()))
            })
            .collect::<BTreeMap<_, _>>();

        BundleWriter::new(MODEL)
            .table(SCHEMA[0], &observations)?
            .table(SCHEMA[1], &probabilities)?
            .write(path.as_ref())
    }


    fn restore<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut reader = BundleReader::open(path.as_ref(), MODEL, &SCHEMA)?;

        let observations: BTreeMap<String, Vec<u8>> = reader.table()?;
        let mut probabilities: BTreeMap<String, f64> = reader.table()?;


        let invalid = observations.iter()
            .find(|(_, values)| values.iter().any(|&v| v > 1));
        if let Some((label, _)) = invalid {
            let reason = format!("label {label:?} has a non-binary observation");
            return Err(reader.corrupt(reason));
        }
        let invalid = probabilities.iter()
            .find(|(label, p)| {
                !observations.contains_key(*label)
                    || !(0.0..=1.0).contains(*p)
            });
        if let Some((label, p)) = invalid {
            let reason = format!("invalid probability {p} for label {label:?}");
            return Err(reader.corrupt(reason));
        }


        let labels = observations.into_iter()
            .map(|(label, values)| {
                let fitted = probabilities.remove(&label)
                    .map(Bernoulli::new);
                (label, Observations { values, fitted })
            })
            .collect();

        self.labels = labels;
        Ok(())
    }
}
