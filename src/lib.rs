//! Job-shop scheduling as a time-indexed binary constraint model.
//!
//! Translates a job-shop description into binary decision variables
//! `x[job, operation, time]` and three constraint families, ready for a
//! constraint-satisfaction engine or a quadratic penalty (QUBO) builder.
//! Solving the model is out of scope.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `JobShop`, `Job`, `Operation`, `TimeWindow`,
//!   `VarKey`, `ExclusionPair`, `StartOnceGroup`, `Assignment`
//! - **`encoding`**: Windows, variable space, and the start-once,
//!   machine-capacity, and precedence passes
//! - **`emit`**: `ModelEmitter` and the table / penalty renderers
//! - **`validation`**: Input integrity checks (duplicate IDs, empty jobs, durations)
//! - **`instances`**: Random benchmark instances
//!
//! # Example
//! ```
//! use u_jsp_csp::{EncoderConfig, Encoding};
//! use u_jsp_csp::models::JobShop;
//!
//! let shop = JobShop::from_pairs([
//!     ("j1", vec![("m1", 2), ("m2", 1), ("m3", 1)]),
//!     ("j2", vec![("m3", 2), ("m1", 1), ("m2", 2)]),
//!     ("j3", vec![("m2", 1), ("m1", 1), ("m3", 2)]),
//! ]);
//! let encoding = Encoding::new(&shop, EncoderConfig::default().with_horizon(7)).unwrap();
//! assert_eq!(encoding.variables().len(), 33);
//! ```
//!
//! # References
//!
//! - Venturelli et al. (2015), "Quantum Annealing Implementation of Job-Shop
//!   Scheduling", arXiv:1506.08479
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod emit;
pub mod encoding;
pub mod error;
pub mod instances;
pub mod models;
pub mod validation;

pub use config::EncoderConfig;
pub use encoding::{Encoding, JspEncoder};
pub use error::{EncodingError, Result};
