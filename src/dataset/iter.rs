use super::dataset::Dataset;
use super::error::DatasetError;
use super::sample::Sample;

/// Borrowing iterator over a dataset's samples in current row order.
///
/// The cursor lives here, not in the dataset, so any number of passes can
/// run independently and every pass starts at row 0. Exhaustion is the
/// normal `None`; a failed lazy decode surfaces as an `Err` item.
pub struct SampleIter<'a> {
    dataset: &'a Dataset,
    cursor: usize,
}

impl<'a> SampleIter<'a> {
    pub(crate) fn new(dataset: &'a Dataset) -> Self {
        SampleIter { dataset, cursor: 0 }
    }
}

impl Iterator for SampleIter<'_> {
    type Item = Result<Sample, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.dataset.len() {
            return None;
        }
        let item = self.dataset.get(self.cursor);
        self.cursor += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.len() - self.cursor.min(self.dataset.len());
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleIter<'_> {}
