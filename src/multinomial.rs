//! Multinomial Naive Bayes over bags of counts.

/// Defines Multinomial Naive Bayes.
mod mnb;

/// Defines the per-label records of `MultinomialNB`.
mod record;

pub use mnb::{MultinomialNB, Counts};
