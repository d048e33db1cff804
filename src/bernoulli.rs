//! Bernoulli Naive Bayes over binary instances.

/// Defines Bernoulli Naive Bayes.
mod bnb;

pub use bnb::BernoulliNB;
