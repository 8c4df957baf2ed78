pub mod dataset;

pub use dataset::class_mapper::ClassMapper;
pub use dataset::config::{DatasetConfig, SourceMode};
pub use dataset::dataset::Dataset;
pub use dataset::error::DatasetError;
pub use dataset::iter::SampleIter;
pub use dataset::metadata::MetadataRow;
pub use dataset::progress::{LogProgress, NoProgress, Progress};
pub use dataset::sample::Sample;
