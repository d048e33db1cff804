//! This file provides some common functions
//! such as the uniform prior and the arg-max over scores.
use crate::Scores;


/// Returns `ln(1 / n_labels)`, the logarithm of the uniform prior.
/// `n_labels` must be positive; otherwise the result is `+inf`.
#[inline(always)]
pub(crate) fn uniform_log_prior(n_labels: usize) -> f64 {
    (1.0 / n_labels as f64).ln()
}


/// Returns the label with the maximal score.
/// The first label found with the maximal value wins,
/// so there is no guaranteed tie-break order.
/// A `NaN` score is ranked as `-inf`.
/// Returns `None` if `scores` is empty.
pub fn best_label(scores: &Scores) -> Option<&str> {
    let mut iter = scores.iter()
        .map(|(label, &score)| {
            let score = if score.is_nan() { f64::NEG_INFINITY } else { score };
            (label, score)
        });
    let (mut best, mut best_score) = iter.next()?;

    for (label, score) in iter {
        if score > best_score {
            best = label;
            best_score = score;
        }
    }
    Some(best.as_str())
}


/// Computes the population mean and variance (denominator `n`)
/// of `values`. Returns `(0.0, 0.0)` for an empty slice.
///
/// The values are shifted by the first observation before summation,
/// so a constant sequence yields its value as the mean
/// and exactly `0.0` as the variance.
pub(crate) fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    let Some(&shift) = values.first() else {
        return (0.0, 0.0);
    };
    let n = values.len() as f64;

    let offset = values.iter()
        .map(|x| x - shift)
        .sum::<f64>()
        / n;

    let variance = values.iter()
        .map(|x| (x - shift - offset).powi(2))
        .sum::<f64>()
        / n;

    (shift + offset, variance)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_label_keeps_first_maximum() {
        let scores = Scores::from([
            ("a".to_string(), -3.0),
            ("b".to_string(), -1.0),
            ("c".to_string(), -1.0),
        ]);
        assert_eq!(best_label(&scores), Some("b"));
        assert_eq!(best_label(&Scores::new()), None);
    }


    #[test]
    fn best_label_skips_negative_infinity() {
        let scores = Scores::from([
            ("a".to_string(), f64::NEG_INFINITY),
            ("b".to_string(), -100.0),
        ]);
        assert_eq!(best_label(&scores), Some("b"));
    }


    #[test]
    fn best_label_ranks_nan_last() {
        let scores = Scores::from([
            ("a".to_string(), f64::NAN),
            ("b".to_string(), -50.0),
            ("c".to_string(), f64::NAN),
        ]);
        assert_eq!(best_label(&scores), Some("b"));

        let scores = Scores::from([
            ("a".to_string(), f64::NEG_INFINITY),
            ("b".to_string(), f64::NAN),
        ]);
        assert_eq!(best_label(&scores), Some("a"));
    }


    #[test]
    fn population_statistics() {
        let (mean, var) = mean_and_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((var - 4.0).abs() < 1e-12);

        assert_eq!(mean_and_variance(&[0.1, 0.1, 0.1]), (0.1, 0.0));
        assert_eq!(mean_and_variance(&[]), (0.0, 0.0));
    }


    #[test]
    fn uniform_prior() {
        assert_eq!(uniform_log_prior(1), 0.0);
        assert!((uniform_log_prior(4) - 0.25_f64.ln()).abs() < 1e-15);
    }
}
