//! Defines some common functions used in this library.

/// Defines some useful functions such as the arg-max over scores.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;

/// Defines the probability distributions shared by the models.
pub mod probability;

pub use utils::best_label;
pub use probability::{
    Probability,
    Gaussian,
    Bernoulli,
};
