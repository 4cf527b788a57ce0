//! Implementadores de steps por categoría.

pub mod checks;
pub mod evaluation;
pub mod exploration;
pub mod processing;
mod stats;
pub mod training;

pub use checks::NameValidator;
pub use evaluation::ModelEvaluator;
pub use exploration::{MetadataExplorer, SkewKurtosis};
pub use processing::{DistributionTransformer, FeatureBuilder, Preprocessor};
pub use training::{DatasetSplitter, LinearModel, ModelTrainer};
