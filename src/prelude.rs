//! Exports the Naive Bayes models and traits.
//! 
pub use crate::classifier::{
    // NaiveBayes trait
    NaiveBayes,
    Scores,
};


pub use crate::multinomial::{
    MultinomialNB,
    Counts,
};

pub use crate::gaussian::GaussianNB;

pub use crate::bernoulli::BernoulliNB;


pub use crate::common::{
    best_label,
    Gaussian,
    Bernoulli,
    Probability,
};


pub use crate::error::{
    NaiveBayesError,
    Result,
};
