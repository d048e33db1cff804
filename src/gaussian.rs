//! Gaussian Naive Bayes over real-valued instances.

/// Defines Gaussian Naive Bayes.
mod gnb;

pub use gnb::GaussianNB;
