use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{NaiveBayes, Scores, Result};
use crate::common::utils::uniform_log_prior;
use crate::persist::{BundleReader, BundleWriter};

use super::record::{LabelCounts, LogProbabilities};

use std::collections::BTreeMap;
use std::path::Path;


/// A bag of counts, feature → count.
pub type Counts = BTreeMap<String, u64>;


const MODEL: &str = "multinomial";
const SCHEMA: [&str; 4] = [
    "vocabulary",
    "label_counts",
    "log_probabilities",
    "smoothers",
];


/// Multinomial Naive Bayes over bags of counts,
/// e.g., word counts of a document.
/// The struct name comes from scikit-learn.
///
/// `fit` computes, for each label,
/// `ln P(f | label) = ln(count(f, label) + 1) - ln(denom(label))`
/// where `denom(label)` is the sum of the label's counts
/// plus the size of the global vocabulary (Laplace smoothing).
/// A feature never seen under a label gets `-ln(denom(label))`.
///
/// `predict` returns
/// `ln(1 / #labels) + Σ_f ln P(f | label) * count(f)`
/// over the features `f` of the query.
///
/// # Example
/// ```
/// use minibayes::prelude::*;
///
/// let mut nb = MultinomialNB::init();
/// nb.add_instance([("computer", 3), ("python", 1)], "positive");
/// nb.add_instance([("game", 2), ("video", 1)], "negative");
/// nb.fit();
///
/// let query = Counts::from([("python".to_string(), 2)]);
/// assert_eq!(nb.predict_label(&query).as_deref(), Some("positive"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultinomialNB {
    /// Cumulative count of each feature over all the labels.
    vocabulary: Counts,
    labels: BTreeMap<String, LabelCounts>,
}


impl MultinomialNB {
    /// Initializes an empty model.
    pub fn init() -> Self {
        Self::default()
    }


    /// Ingests `dataset` and returns `self`.
    /// See [`MultinomialNB::add_instances`].
    pub fn with_instances<D, L, I, K>(mut self, dataset: D) -> Self
        where D: IntoIterator<Item = (L, I)>,
              L: AsRef<str>,
              I: IntoIterator<Item = (K, u64)>,
              K: AsRef<str>,
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


    /// Adds the counts of `features` to `label`
    /// and to the global vocabulary.
    /// Duplicated features are summed.
    /// Cumulative counts saturate at `u64::MAX`.
    pub fn add_instance<I, K>(&mut self, features: I, label: &str)
        where I: IntoIterator<Item = (K, u64)>,
              K: AsRef<str>,
    {
        let record = self.labels.entry(label.to_string())
            .or_default();

        for (feature, count) in features {
            let feature = feature.as_ref();
            let total = self.vocabulary.entry(feature.to_string())
                .or_insert(0);
            *total = total.saturating_add(count);

            let total = record.counts.entry(feature.to_string())
                .or_insert(0);
            *total = total.saturating_add(count);
        }
    }


    /// Adds each `(label, features)` pair of `dataset`.
    pub fn add_instances<D, L, I, K>(&mut self, dataset: D)
        where D: IntoIterator<Item = (L, I)>,
              L: AsRef<str>,
              I: IntoIterator<Item = (K, u64)>,
              K: AsRef<str>,
    {
        let mut n_instances = 0_usize;
        for (label, features) in dataset {
            self.add_instance(features, label.as_ref());
            n_instances += 1;
        }
        debug!(model = MODEL, instances = n_instances, "ingested batch");
    }


    /// Ingests `dataset`, then fits the model.
    pub fn fit_with<D, L, I, K>(&mut self, dataset: D)
        where D: IntoIterator<Item = (L, I)>,
              L: AsRef<str>,
              I: IntoIterator<Item = (K, u64)>,
              K: AsRef<str>,
    {
        self.add_instances(dataset);
        self.fit();
    }


    /// Returns the number of distinct features over all the labels.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }


    /// Returns the cumulative counts of `label`.
    pub fn counts(&self, label: &str) -> Option<&Counts> {
        self.labels.get(label)
            .map(|record| &record.counts)
    }


    /// Returns the fitted `ln P(feature | label)`.
    /// An unseen feature gets the smoother of `label`.
    /// Returns `None` if `label` is not fitted.
    pub fn log_probability(&self, label: &str, feature: &str) -> Option<f64> {
        self.fitted(label)
            .map(|lp| lp.get(feature))
    }


    /// Returns the log-probability used for a feature
    /// never seen under `label`.
    /// Returns `None` if `label` is not fitted.
    pub fn smoother(&self, label: &str) -> Option<f64> {
        self.fitted(label)
            .map(|lp| lp.smoother)
    }


    fn fitted(&self, label: &str) -> Option<&LogProbabilities> {
        self.labels.get(label)?
            .fitted
            .as_ref()
    }
}


impl NaiveBayes for MultinomialNB {
    type Instance = Counts;

    fn name(&self) -> &str {
        "Multinomial Naive Bayes"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let n_fitted = self.labels.values()
            .filter(|record| record.fitted.is_some())
            .count();
        let info = Vec::from([
            ("# of labels", self.labels.len().to_string()),
            ("# of fitted labels", n_fitted.to_string()),
            ("Vocabulary size", self.vocabulary.len().to_string()),
        ]);
        Some(info)
    }


    fn labels(&self) -> Vec<&str> {
        self.labels.keys()
            .map(String::as_str)
            .collect()
    }


    fn fit(&mut self) {
        let vocabulary_size = self.vocabulary.len();

        self.labels.par_iter_mut()
            .for_each(|(_, record)| record.fit(vocabulary_size));

        self.labels.iter()
            .filter(|(_, record)| record.denominator(vocabulary_size) == 0.0)
            .for_each(|(label, _)| {
                warn!(
                    model = MODEL,
                    label = label.as_str(),
                    "no counts and an empty vocabulary, smoother is infinite"
                );
            });

        debug!(
            model = MODEL,
            labels = self.labels.len(),
            vocabulary = vocabulary_size,
            "fitted"
        );
    }


    fn predict(&self, features: &Counts) -> Scores {
        let prior = uniform_log_prior(self.labels.len());

        self.labels.par_iter()
            .map(|(label, record)| {
                let score = match &record.fitted {
                    Some(lp) => {
                        features.iter()
                            .fold(prior, |score, (feature, &count)| {
                                score + lp.get(feature) * count as f64
                            })
                    },
                    None => f64::NEG_INFINITY,
                };
                (label.clone(), score)
            })
            .collect()
    }


    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let label_counts = self.labels.iter()
            .map(|(label, record)| (label.as_str(), &record.counts))
            .collect::<BTreeMap<_, _>>();

        let fitted = self.labels.iter()
            .filter_map(|(label, record)| {
                record.fitted.as_ref().map(|lp| (label.as_str(), lp))
            })
            .collect::<Vec<_>>();
        let log_probs = fitted.iter()
            .map(|&(label, lp)| (label, &lp.log_probs))
            .collect::<BTreeMap<_, _>>();
        let smoothers = fitted.iter()
            .map(|&(label, lp)| (label, lp.smoother))
            .collect::<BTreeMap<_, _>>();

        BundleWriter::new(MODEL)
            .table(SCHEMA[0], &self.vocabulary)?
            .table(SCHEMA[1], &label_counts)?
            .table(SCHEMA[2], &log_probs)?
            .table(SCHEMA[3], &smoothers)?
            .write(path.as_ref())
    }


    fn restore<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut reader = BundleReader::open(path.as_ref(), MODEL, &SCHEMA)?;

        let vocabulary: Counts = reader.table()?;
        let label_counts: BTreeMap<String, Counts> = reader.table()?;
        let mut log_probs: BTreeMap<String, BTreeMap<String, f64>>
            = reader.table()?;
        let mut smoothers: BTreeMap<String, f64> = reader.table()?;


        if !log_probs.keys().eq(smoothers.keys()) {
            let reason = "log-probabilities and smoothers \
                          are given for different labels";
            return Err(reader.corrupt(reason));
        }
        if let Some(label) = smoothers.keys()
            .find(|label| !label_counts.contains_key(*label))
        {
            let reason = format!("fitted label {label:?} has no counts");
            return Err(reader.corrupt(reason));
        }
        let unknown = label_counts.iter()
            .flat_map(|(label, counts)| counts.keys().map(move |f| (label, f)))
            .find(|(_, feature)| !vocabulary.contains_key(*feature));
        if let Some((label, feature)) = unknown {
            let reason = format!(
                "feature {feature:?} of label {label:?} \
                is not in the vocabulary"
            );
            return Err(reader.corrupt(reason));
        }


        let labels = label_counts.into_iter()
            .map(|(label, counts)| {
                let fitted = log_probs.remove(&label)
                    .zip(smoothers.remove(&label))
                    .map(|(log_probs, smoother)| {
                        LogProbabilities { log_probs, smoother }
                    });
                (label, LabelCounts { counts, fitted })
            })
            .collect();

        *self = Self { vocabulary, labels };
        Ok(())
    }
}
