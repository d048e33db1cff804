use serde::{
    Serialize,
    Deserialize,
};

use std::collections::BTreeMap;


/// The state of `MultinomialNB` for a single label.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct LabelCounts {
    /// Cumulative count of each feature seen under this label.
    pub(super) counts: BTreeMap<String, u64>,
    /// `None` until `fit` is called after the label appeared.
    pub(super) fitted: Option<LogProbabilities>,
}


/// Laplace-smoothed log-probabilities of a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct LogProbabilities {
    pub(super) log_probs: BTreeMap<String, f64>,
    /// Log-probability of a feature unseen under the label.
    pub(super) smoother: f64,
}


impl LabelCounts {
    /// `Σ counts + vocabulary_size`.
    /// The additive term is the size of the *global* vocabulary,
    /// not the number of distinct features of this label.
    #[inline(always)]
    pub(super) fn denominator(&self, vocabulary_size: usize) -> f64 {
        let total = self.counts.values()
            .map(|&count| count as f64)
            .sum::<f64>();
        total + vocabulary_size as f64
    }


    /// Recomputes the log-probabilities from the current counts.
    pub(super) fn fit(&mut self, vocabulary_size: usize) {
        let ln_denom = self.denominator(vocabulary_size).ln();

        let log_probs = self.counts.iter()
            .map(|(feature, &count)| {
                let lp = (count as f64 + 1.0).ln() - ln_denom;
                (feature.clone(), lp)
            })
            .collect();

        self.fitted = Some(LogProbabilities {
            log_probs,
            smoother: -ln_denom,
        });
    }
}


impl LogProbabilities {
    /// Log-probability of `feature`,
    /// falling back to the smoother for an unseen one.
    #[inline(always)]
    pub(super) fn get(&self, feature: &str) -> f64 {
        self.log_probs.get(feature)
            .copied()
            .unwrap_or(self.smoother)
    }
}
