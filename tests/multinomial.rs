use minibayes::prelude::*;

use approx::assert_relative_eq;


fn counts(pairs: &[(&str, u64)]) -> Counts {
    pairs.iter()
        .map(|&(feature, count)| (feature.to_string(), count))
        .collect()
}


fn positive() -> Vec<(&'static str, u64)> {
    vec![("computer", 3), ("programming", 2), ("python", 1), ("swift", 2)]
}


fn negative() -> Vec<(&'static str, u64)> {
    vec![("game", 2), ("computer", 2), ("video", 1), ("programming", 1)]
}


fn trained() -> MultinomialNB {
    let mut nb = MultinomialNB::init()
        .with_instances([("positive", positive()), ("negative", negative())]);
    nb.fit();
    nb
}


#[test]
fn programming_query_is_positive() {
    let nb = trained();
    let query = counts(&[
        ("computer", 2), ("ruby", 1), ("swift", 1), ("programming", 1)
    ]);
    let scores = nb.predict(&query);

    assert_eq!(scores.len(), 2);
    assert!(scores["positive"] > scores["negative"]);
    assert_eq!(nb.predict_label(&query).as_deref(), Some("positive"));


    // Vocabulary size is 6, so the denominators are 8 + 6 and 6 + 6.
    let ln = f64::ln;
    let pos = ln(0.5) + 2.0 * ln(4.0) + 2.0 * ln(3.0) - 5.0 * ln(14.0);
    let neg = ln(0.5) + 2.0 * ln(3.0) + ln(2.0) - 5.0 * ln(12.0);
    assert_relative_eq!(scores["positive"], pos, max_relative = 1e-12);
    assert_relative_eq!(scores["negative"], neg, max_relative = 1e-12);
}


#[test]
fn denominator_uses_global_vocabulary() {
    let nb = trained();
    assert_eq!(nb.vocabulary_size(), 6);

    let lp = nb.log_probability("positive", "computer").unwrap();
    assert_relative_eq!(lp, 4_f64.ln() - 14_f64.ln(), max_relative = 1e-12);

    let smoother = nb.smoother("negative").unwrap();
    assert_relative_eq!(smoother, -(12_f64.ln()), max_relative = 1e-12);

    // An unseen feature falls back to the smoother.
    assert_eq!(nb.log_probability("negative", "swift"), Some(smoother));
    assert_eq!(nb.log_probability("unknown", "swift"), None);
}


#[test]
fn smoother_is_below_every_seen_feature() {
    let nb = trained();
    for (label, features) in [("positive", positive()), ("negative", negative())] {
        let smoother = nb.smoother(label).unwrap();
        for (feature, _) in features {
            let lp = nb.log_probability(label, feature).unwrap();
            assert!(smoother < lp, "{label}/{feature}: {smoother} >= {lp}");
        }
    }
}


#[test]
fn query_count_multiplies_log_probability() {
    let nb = trained();
    let once = nb.predict(&counts(&[("python", 1)]));
    let thrice = nb.predict(&counts(&[("python", 3)]));

    for label in nb.labels() {
        let lp = nb.log_probability(label, "python").unwrap();
        assert_relative_eq!(
            thrice[label] - once[label], 2.0 * lp, max_relative = 1e-12
        );
    }

    // A zero count contributes nothing.
    let zero = nb.predict(&counts(&[("python", 0)]));
    for label in nb.labels() {
        assert_eq!(zero[label], 0.5_f64.ln());
    }
}


#[test]
fn duplicated_features_are_summed() {
    let mut nb = MultinomialNB::init();
    nb.add_instance([("a", 1), ("a", 2)], "x");
    nb.add_instances([("x", vec![("a", 4)]), ("y", vec![("a", 1), ("b", 5)])]);

    assert_eq!(nb.counts("x"), Some(&counts(&[("a", 7)])));
    assert_eq!(nb.counts("y"), Some(&counts(&[("a", 1), ("b", 5)])));
    assert_eq!(nb.vocabulary_size(), 2);
}


#[test]
fn fit_is_idempotent_and_deterministic() {
    let mut nb = trained();
    let query = counts(&[("computer", 1), ("game", 4), ("rust", 2)]);
    let before = nb.predict(&query);

    nb.fit();
    nb.fit();
    assert_eq!(nb.predict(&query), before);

    let other = trained();
    assert_eq!(other.predict(&query), before);
    assert_eq!(other, nb);
}


#[test]
fn predictions_are_stale_until_refit() {
    let mut incremental = trained();
    let query = counts(&[("game", 3), ("video", 2)]);
    let before = incremental.predict(&query);

    incremental.add_instance([("game", 10), ("video", 10)], "positive");
    assert_eq!(incremental.predict(&query), before);

    incremental.fit();
    let after = incremental.predict(&query);
    assert!(after["positive"] > before["positive"]);


    // Re-fitting equals fitting everything at once.
    let mut batch = MultinomialNB::init();
    batch.add_instance(positive(), "positive");
    batch.add_instance([("game", 10), ("video", 10)], "positive");
    batch.add_instance(negative(), "negative");
    batch.fit();
    assert_eq!(batch.predict(&query), after);
}


#[test]
fn label_added_after_fit_is_excluded() {
    let mut nb = trained();
    nb.add_instance([("tennis", 2)], "sports");

    let scores = nb.predict(&counts(&[("tennis", 2)]));
    assert_eq!(scores.len(), 3);
    assert_eq!(scores["sports"], f64::NEG_INFINITY);
    // The prior is taken over all the known labels.
    assert!(scores["positive"] < (1.0_f64 / 3.0).ln());

    nb.fit();
    let label = nb.predict_label(&counts(&[("tennis", 2)]));
    assert_eq!(label.as_deref(), Some("sports"));
}


#[test]
fn mirrored_training_swaps_the_winner() {
    let mut nb = MultinomialNB::init();
    nb.fit_with([
        ("left", vec![("a", 5), ("b", 1)]),
        ("right", vec![("a", 1), ("b", 5)]),
    ]);

    let lhs = nb.predict(&counts(&[("a", 3), ("b", 1)]));
    let rhs = nb.predict(&counts(&[("a", 1), ("b", 3)]));

    assert!(lhs["left"] > lhs["right"]);
    assert!(rhs["right"] > rhs["left"]);
    assert_relative_eq!(lhs["left"], rhs["right"], max_relative = 1e-12);
    assert_relative_eq!(lhs["right"], rhs["left"], max_relative = 1e-12);
}


#[test]
fn empty_model_predicts_nothing() {
    let mut nb = MultinomialNB::init();
    nb.fit();
    assert!(nb.predict(&counts(&[("a", 1)])).is_empty());
    assert_eq!(nb.predict_label(&counts(&[("a", 1)])), None);
}


#[test]
fn info_reports_the_model() {
    let nb = trained();
    assert_eq!(nb.name(), "Multinomial Naive Bayes");

    let info = nb.info().unwrap();
    assert!(info.contains(&("# of labels", "2".to_string())));
    assert!(info.contains(&("Vocabulary size", "6".to_string())));
}


#[test]
fn huge_counts_saturate_instead_of_overflowing() {
    let mut nb = MultinomialNB::init();
    nb.add_instance([("a", u64::MAX)], "x");
    nb.add_instance([("a", 1)], "y");
    nb.add_instance([("a", 7), ("b", u64::MAX)], "x");

    assert_eq!(nb.counts("x"), Some(&counts(&[("a", u64::MAX), ("b", u64::MAX)])));
    assert_eq!(nb.counts("y"), Some(&counts(&[("a", 1)])));

    nb.fit();
    let smoother = nb.smoother("x").unwrap();
    assert!(smoother.is_finite());
    assert!(smoother < nb.smoother("y").unwrap());
    assert_eq!(
        nb.predict_label(&counts(&[("a", 1)])).as_deref(),
        Some("y")
    );
}
