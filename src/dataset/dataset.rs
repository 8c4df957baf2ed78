use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::class_mapper::ClassMapper;
use super::config::{DatasetConfig, SourceMode};
use super::error::DatasetError;
use super::iter::SampleIter;
use super::metadata::{self, MetadataRow};
use super::progress::{LogProgress, Progress};
use super::sample::{decode_image, Sample};

/// A labeled image collection: one metadata row per sample, a class mapper
/// assigning each class a dense integer label, and an optional in-memory
/// cache of every decoded sample.
///
/// Construction runs the full pipeline synchronously: ingest the source,
/// discover classes, encode labels, shuffle, preload. Afterwards the
/// dataset is served through [`Dataset::iter`] or [`Dataset::get`].
#[derive(Debug)]
pub struct Dataset {
    source_path: PathBuf,
    mode: SourceMode,
    metadata: Vec<MetadataRow>,
    classes: Vec<String>,
    class_mapper: ClassMapper,
    preload: bool,
    cache: Vec<Sample>,
    rng: Option<StdRng>,
}

impl Dataset {
    pub fn new<P: AsRef<Path>>(path: P, config: DatasetConfig) -> Result<Self, DatasetError> {
        let config = config.build()?;
        let path = path.as_ref();
        info!(path = %path.display(), mode = ?config.mode, "importing dataset");

        let metadata = match config.mode {
            SourceMode::Local => metadata::scan_directory(path)?,
            SourceMode::Csv => metadata::read_manifest(path, config.partition.as_deref())?,
        };
        if metadata.is_empty() {
            return Err(DatasetError::EmptyDataset);
        }

        let mut classes: Vec<String> = metadata
            .iter()
            .map(|row| row.class_name.clone())
            .collect();
        classes.sort_unstable();
        classes.dedup();

        // An externally supplied mapper is authoritative over the discovered
        // classes; a class it does not know fails label encoding below.
        let class_mapper = config
            .class_mapper
            .unwrap_or_else(|| ClassMapper::new(classes.iter().cloned()));

        let mut dataset = Dataset {
            source_path: path.to_path_buf(),
            mode: config.mode,
            metadata,
            classes,
            class_mapper,
            preload: false,
            cache: Vec::new(),
            rng: None,
        };

        dataset.encode_labels()?;

        if config.shuffle {
            let seed = config
                .shuffle_seed
                .unwrap_or_else(|| rand::thread_rng().gen());
            dataset.rng = Some(StdRng::seed_from_u64(seed));
            dataset.reshuffle()?;
        }

        if config.preload {
            let mut progress = config
                .progress
                .unwrap_or_else(|| Box::new(LogProgress::new()));
            dataset.preload_all(progress.as_mut())?;
        }

        Ok(dataset)
    }

    /// Derive the label column from class names. Skipped when every row
    /// already carries a label (a manifest may precompute the column).
    /// All-or-nothing: labels are computed for every row before any row
    /// is written, so a failure leaves no partial assignment behind.
    fn encode_labels(&mut self) -> Result<(), DatasetError> {
        if self.metadata.iter().all(|row| row.label.is_some()) {
            return Ok(());
        }
        let labels = self
            .metadata
            .iter()
            .map(|row| self.class_mapper.encode(&row.class_name))
            .collect::<Result<Vec<_>, _>>()?;
        for (row, label) in self.metadata.iter_mut().zip(labels) {
            row.label = Some(label);
        }
        Ok(())
    }

    /// Uniformly permute the row order. When a preload cache is live the
    /// same permutation is applied to it, keeping `cache[i]` paired with
    /// row `i`. Fails when the dataset was built with `shuffle` disabled.
    pub fn reshuffle(&mut self) -> Result<(), DatasetError> {
        let rng = self.rng.as_mut().ok_or(DatasetError::RngNotSet)?;
        let mut order: Vec<usize> = (0..self.metadata.len()).collect();
        order.shuffle(rng);
        apply_order(&mut self.metadata, &order);
        if self.preload {
            apply_order(&mut self.cache, &order);
        }
        Ok(())
    }

    fn preload_all(&mut self, progress: &mut dyn Progress) -> Result<(), DatasetError> {
        let total = self.metadata.len();
        progress.begin(total);
        let mut cache = Vec::with_capacity(total);
        for (done, row) in self.metadata.iter().enumerate() {
            cache.push(self.load_row(row)?);
            progress.advance(done + 1);
        }
        progress.finish();
        self.cache = cache;
        self.preload = true;
        Ok(())
    }

    /// Decode one row into a sample. Pure in the row content: no cache
    /// involvement, so cached and lazily decoded samples are identical.
    fn load_row(&self, row: &MetadataRow) -> Result<Sample, DatasetError> {
        let label = match row.label {
            Some(label) => label,
            None => self.class_mapper.encode(&row.class_name)?,
        };
        let image = decode_image(&row.image_path)?;
        Ok(Sample {
            image,
            label,
            name: row.image_name.clone(),
        })
    }

    /// The sample at row `index` under the current row order: the cached
    /// copy when preload is live, a fresh decode otherwise. An index past
    /// the end is a caller error, distinct from normal iterator exhaustion.
    pub fn get(&self, index: usize) -> Result<Sample, DatasetError> {
        if index >= self.metadata.len() {
            return Err(DatasetError::IndexOutOfRange {
                index,
                len: self.metadata.len(),
            });
        }
        if self.preload {
            Ok(self.cache[index].clone())
        } else {
            self.load_row(&self.metadata[index])
        }
    }

    /// Drop the cache and turn preload off. Metadata and encoding stay
    /// intact; iteration falls back to on-demand decoding.
    pub fn free(&mut self) {
        info!("releasing sample cache, preload off");
        self.cache = Vec::new();
        self.preload = false;
    }

    /// Iterate the samples in current row order. Each call starts a fresh
    /// pass at row 0; independent iterators do not interfere.
    pub fn iter(&self) -> SampleIter<'_> {
        SampleIter::new(self)
    }

    pub fn encode_label(&self, class_name: &str) -> Result<usize, DatasetError> {
        self.class_mapper.encode(class_name)
    }

    pub fn decode_label(&self, index: usize) -> Result<&str, DatasetError> {
        self.class_mapper.decode(index)
    }

    /// Distinct class names present in the (possibly partition-filtered)
    /// source, sorted ascending.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn class_mapper(&self) -> &ClassMapper {
        &self.class_mapper
    }

    /// Metadata rows in current (post-shuffle) order.
    pub fn rows(&self) -> &[MetadataRow] {
        &self.metadata
    }

    pub fn is_preloaded(&self) -> bool {
        self.preload
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = Result<Sample, DatasetError>;
    type IntoIter = SampleIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn apply_order<T>(items: &mut Vec<T>, order: &[usize]) {
    debug_assert_eq!(items.len(), order.len());
    let mut moved: Vec<Option<T>> = items.drain(..).map(Some).collect();
    items.extend(order.iter().map(|&index| moved[index].take().unwrap()));
}
