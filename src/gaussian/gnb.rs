use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{NaiveBayes, Scores, Result};
use crate::common::utils::{uniform_log_prior, mean_and_variance};
use crate::common::probability::{Probability, Gaussian};
use crate::persist::{BundleReader, BundleWriter};

use std::collections::BTreeMap;
use std::path::Path;


const MODEL: &str = "gaussian";
const SCHEMA: [&str; 3] = ["observations", "means", "variances"];


/// The observations of a label and the density fitted to them.
#[derive(Debug, Clone, Default, PartialEq)]
struct Observations {
    values: Vec<f64>,
    fitted: Option<Gaussian>,
}


/// Gaussian Naive Bayes over real-valued instances.
/// The struct name comes from scikit-learn.
///
/// Each label is modeled by a single scalar normal distribution
/// fitted to all of its observations,
/// and every dimension of a query is scored against that same
/// distribution:
/// `ln(1 / #labels) + Σ_x ln N(x | mean, variance)`.
///
/// A label without fitted parameters scores `-inf`,
/// and so does a label with a zero variance for a non-empty query.
///
/// The raw observations are retained,
/// so re-fitting after more instances recomputes
/// the mean and variance from the full sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaussianNB {
    labels: BTreeMap<String, Observations>,
}


impl GaussianNB {
    /// Initializes an empty model.
    pub fn init() -> Self {
        Self::default()
    }


    /// Ingests `dataset` and returns `self`.
    pub fn with_instances<D, L, V>(mut self, dataset: D) -> Self
        where D: IntoIterator<Item = (L, V)>,
              L: AsRef<str>,
              V: AsRef<[f64]>,
    {
        self.add_instances(dataset);
        self
    }


    /// Builds a model from the parameters stored in `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut nb = Self::init();
        nb.restore(path)?;
        Ok(nb)
    }


    /// Appends `values` to the observations of `label`.
    pub fn add_instance(&mut self, values: &[f64], label: &str) {
        self.labels.entry(label.to_string())
            .or_default()
            .values
            .extend_from_slice(values);
    }


    /// Adds each `(label, values)` pair of `dataset`.
    pub fn add_instances<D, L, V>(&mut self, dataset: D)
        where D: IntoIterator<Item = (L, V)>,
              L: AsRef<str>,
              V: AsRef<[f64]>,
    {
        let mut n_instances = 0_usize;
        for (label, values) in dataset {
            self.add_instance(values.as_ref(), label.as_ref());
            n_instances += 1;
        }
        debug!(model = MODEL, instances = n_instances, "ingested batch");
    }


    /// Ingests `dataset`, then fits the model.
    pub fn fit_with<D, L, V>(&mut self, dataset: D)
        where D: IntoIterator<Item = (L, V)>,
              L: AsRef<str>,
              V: AsRef<[f64]>,
    {
        self.add_instances(dataset);
        self.fit();
    }


    /// Returns the observations retained for `label`.
    pub fn observations(&self, label: &str) -> Option<&[f64]> {
        self.labels.get(label)
            .map(|obs| &obs.values[..])
    }


    /// Returns the density fitted to `label`.
    pub fn parameters(&self, label: &str) -> Option<&Gaussian> {
        self.labels.get(label)?
            .fitted
            .as_ref()
    }
}


impl NaiveBayes for GaussianNB {
    type Instance = [f64];

    fn name(&self) -> &str {
        "Gaussian Naive Bayes"
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
            .for_each(|(_, obs)| {
                let (mean, variance) = mean_and_variance(&obs.values);
                obs.fitted = Some(Gaussian::new(mean, variance));
            });

        self.labels.iter()
            .filter(|(_, obs)| obs.fitted.is_some_and(|g| g.variance == 0.0))
            .for_each(|(label, obs)| {
                warn!(
                    model = MODEL,
                    label = label.as_str(),
                    observations = obs.values.len(),
                    "zero variance, the label is degenerate"
                );
            });

        debug!(model = MODEL, labels = self.labels.len(), "fitted");
    }


    fn predict(&self, values: &[f64]) -> Scores {
        let prior = uniform_log_prior(self.labels.len());

        self.labels.par_iter()
            .map(|(label, obs)| {
                let score = match &obs.fitted {
                    Some(density) => {
                        values.iter()
                            .fold(prior, |score, &x| {
                                score + density.log_probability(x)
                            })
                    },
                    None => f64::NEG_INFINITY,
                };
                // A zero variance yields `NaN`.
                let score = if score.is_nan() { f64::NEG_INFINITY } else { score };
                (label.clone(), score)
            })
            .collect()
    }


    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let observations = self.labels.iter()
            .map(|(label, obs)| (label.as_str(), &obs.values))
            .collect::<BTreeMap<_, _>>();

        let fitted = self.labels.iter()
            .filter_map(|(label, obs)| obs.fitted.map(|g| (label.as_str(), g)))
            .collect::<Vec<_>>();
        let means = fitted.iter()
            .map(|&(label, g)| (label, g.mean))
            .collect::<BTreeMap<_, _>>();
        let variances = fitted.iter()
            .map(|&(label, g)| (label, g.variance))
            .collect::<BTreeMap<_, _>>();

        BundleWriter::new(MODEL)
            .table(SCHEMA[0], &observations)?
            .table(SCHEMA[1], &means)?
            .table(SCHEMA[2], &variances)?
            .write(path.as_ref())
    }


    fn restore<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut reader = BundleReader::open(path.as_ref(), MODEL, &SCHEMA)?;

        let observations: BTreeMap<String, Vec<f64>> = reader.table()?;
        let mut means: BTreeMap<String, f64> = reader.table()?;
        let mut variances: BTreeMap<String, f64> = reader.table()?;


        if !means.keys().eq(variances.keys()) {
            let reason = "means and variances are given for different labels";
            return Err(reader.corrupt(reason));
        }
        if let Some(label) = means.keys()
            .find(|label| !observations.contains_key(*label))
        {
            let reason = format!("fitted label {label:?} has no observations");
            return Err(reader.corrupt(reason));
        }


        let labels = observations.into_iter()
            .map(|(label, values)| {
                let fitted = means.remove(&label)
                    .zip(variances.remove(&label))
                    .map(|(mean, variance)| Gaussian::new(mean, variance));
                (label, Observations { values, fitted })
            })
            .collect();

        self.labels = labels;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaiveBayesError;

    type Table<V> = BTreeMap<String, V>;


    fn write_bundle(
        path: &Path,
        observations: &Table<Vec<f64>>,
        means: &Table<f64>,
        variances: &Table<f64>,
    )
    {
        BundleWriter::new(MODEL)
            .table(SCHEMA[0], observations).unwrap()
            .table(SCHEMA[1], means).unwrap()
            .table(SCHEMA[2], variances).unwrap()
            .write(path)
            .unwrap();
    }


    fn assert_rejected(path: &Path, needle: &str) {
        let mut nb = GaussianNB::init()
            .with_instances([("kept", [1.0, 2.0])]);
        nb.fit();
        let before = nb.clone();

        match nb.restore(path) {
            Err(NaiveBayesError::Corrupt { reason, .. }) => {
                assert!(reason.contains(needle), "{reason}");
            },
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(nb, before);
    }


    #[test]
    fn fitted_label_without_observations_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gnb.bin");

        write_bundle(
            &path,
            &Table::from([("x".to_string(), vec![1.0, 3.0])]),
            &Table::from([("y".to_string(), 2.0)]),
            &Table::from([("y".to_string(), 1.0)]),
        );
        assert_rejected(&path, "has no observations");
    }


    #[test]
    fn means_must_match_variances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gnb.bin");

        write_bundle(
            &path,
            &Table::from([("x".to_string(), vec![1.0, 3.0])]),
            &Table::from([("x".to_string(), 2.0)]),
            &Table::new(),
        );
        assert_rejected(&path, "different labels");
    }
}
