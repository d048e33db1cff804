#![warn(missing_docs)]

//!
//! A crate that provides Naive Bayes classifiers.
//!
//! This crate includes three models.
//!
//! - [`MultinomialNB`]
//!     Bag-of-counts classifier (e.g., word counts of documents)
//!     with Laplace smoothing over the global vocabulary.
//!
//! - [`GaussianNB`]
//!     Real-valued classifier that models each label
//!     by a normal distribution.
//!
//! - [`BernoulliNB`]
//!     Binary classifier that models each label
//!     by the probability of observing `1`.
//!
//! All the models share the same lifecycle,
//! described by the [`NaiveBayes`] trait:
//! construct, ingest labeled instances, [`NaiveBayes::fit`],
//! then [`NaiveBayes::predict`] repeatedly.
//! The fitted parameters can be written with [`NaiveBayes::save`]
//! and read back with [`NaiveBayes::restore`].
//!
//! Scores are logarithmic and not normalized;
//! the label with the largest score is the prediction.
//!
//! # Concurrency
//! Every operation is a blocking, in-process computation.
//! Ingestion, `fit`, and `restore` take `&mut self`,
//! so sharing a model among threads that mutate it
//! requires external synchronization, e.g., a `Mutex`.
//!
//! # Example
//! ```no_run
//! use minibayes::prelude::*;
//!
//! let mut nb = GaussianNB::init();
//! nb.add_instance(&[9.5, 10.2, 10.4], "positive");
//! nb.add_instance(&[-0.3, 0.1, 0.4], "negative");
//! nb.fit();
//!
//! let label = nb.predict_label(&[9.8, 10.1]);
//! assert_eq!(label.as_deref(), Some("positive"));
//!
//! nb.save("/path/to/gaussian.bin").unwrap();
//! let restored = GaussianNB::from_file("/path/to/gaussian.bin").unwrap();
//! assert_eq!(restored.predict(&[9.8]), nb.predict(&[9.8]));
//! ```

pub mod error;
pub mod classifier;
pub mod common;
pub mod persist;

pub mod multinomial;
pub mod gaussian;
pub mod bernoulli;

pub mod prelude;


pub use error::{NaiveBayesError, Result};
pub use classifier::{NaiveBayes, Scores};
pub use common::best_label;

pub use multinomial::{MultinomialNB, Counts};
pub use gaussian::GaussianNB;
pub use bernoulli::BernoulliNB;
