//! npyfixtures - NumPy `.npy` test fixture generation
//!
//! Writes one `.npy` file per (element type, shape) pair, filled with random
//! values that still carry a structure a parser test can check:
//!
//! - **Floating point**: standard-normal draws rescaled to unit L2 norm
//! - **Unsigned integers**: a random composition of 42, so elements sum to 42
//! - **Signed integers**: the same composition negated, summing to -42
//!
//! Files are named `<type>-<shape>.npy`, e.g. `uint8-(4,).npy` or
//! `float32-(4, 4).npy`.
//!
//! # Example
//!
//! ```no_run
//! use npyfixtures::{FixtureConfig, FixtureGenerator};
//!
//! let generator = FixtureGenerator::new(FixtureConfig::default());
//! let result = generator.generate("./test/data")?;
//! assert_eq!(result.num_fixtures(), 40);
//! # Ok::<(), npyfixtures::FixtureError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod npy;
pub mod sample;

pub use config::{
    ElementKind, ElementType, FixtureConfig, FixtureSpec, Shape, DEFAULT_OUTPUT_DIR,
    ELEMENT_TYPES, SHAPES, TARGET_SUM,
};
pub use error::{FixtureError, Result};
pub use generator::{FixtureGenerator, GenerationResult};
pub use sample::{RandomSampleGenerator, SampleArray, SampleGenerator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ElementType, FixtureConfig, Shape};
    pub use crate::error::Result;
    pub use crate::generator::FixtureGenerator;
}
