use super::class_mapper::ClassMapper;
use super::error::DatasetError;
use super::progress::Progress;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceMode {
    /// Directory tree: one subdirectory per class, files are samples.
    Local,
    /// `;`-delimited manifest file with a header row.
    Csv,
}

pub struct DatasetConfig {
    pub mode: SourceMode,
    pub shuffle: bool,
    pub shuffle_seed: Option<u64>,
    pub preload: bool,
    /// Manifest mode only: keep rows of this partition, drop the rest.
    pub partition: Option<String>,
    /// Externally supplied mapper; derived from the discovered classes when None.
    pub class_mapper: Option<ClassMapper>,
    /// Preload progress sink; logs via tracing when None.
    pub progress: Option<Box<dyn Progress>>,
}

impl DatasetConfig {
    pub fn build(self) -> Result<Self, DatasetError> {
        if self.partition.is_some() && self.mode != SourceMode::Csv {
            return Err(DatasetError::PartitionWithoutManifest);
        }
        Ok(self)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            mode: SourceMode::Local,
            shuffle: true,
            shuffle_seed: None,
            preload: false,
            partition: None,
            class_mapper: None,
            progress: None,
        }
    }
}
