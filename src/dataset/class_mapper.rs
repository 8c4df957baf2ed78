use std::collections::HashMap;

use super::error::DatasetError;

/// Bijection between class names and dense integer labels.
///
/// Classes are sorted lexicographically at construction, so the same class
/// set always produces the same mapping regardless of input order. This is
/// what keeps labels comparable across independently constructed datasets
/// (train vs. test) sharing one mapper or one class set.
#[derive(Debug, Clone)]
pub struct ClassMapper {
    classes: Vec<String>,
    forward: HashMap<String, usize>,
}

impl ClassMapper {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        classes.sort_unstable();
        classes.dedup();

        let forward = classes
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();

        ClassMapper { classes, forward }
    }

    pub fn encode(&self, class_name: &str) -> Result<usize, DatasetError> {
        self.forward
            .get(class_name)
            .copied()
            .ok_or_else(|| DatasetError::UnknownClass(class_name.to_string()))
    }

    pub fn decode(&self, index: usize) -> Result<&str, DatasetError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(DatasetError::ClassIndexOutOfRange {
                index,
                len: self.classes.len(),
            })
    }

    /// Class names in label order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let mapper = ClassMapper::new(["dog", "cat", "bird"]);
        for class in mapper.classes().to_vec() {
            let index = mapper.encode(&class).unwrap();
            assert_eq!(mapper.decode(index).unwrap(), class);
        }
    }

    #[test]
    fn indices_are_dense_and_lexicographic() {
        let mapper = ClassMapper::new(["zebra", "ant", "mole"]);
        assert_eq!(mapper.classes(), ["ant", "mole", "zebra"]);
        assert_eq!(mapper.encode("ant").unwrap(), 0);
        assert_eq!(mapper.encode("mole").unwrap(), 1);
        assert_eq!(mapper.encode("zebra").unwrap(), 2);
    }

    #[test]
    fn input_order_does_not_change_mapping() {
        let a = ClassMapper::new(["cat", "dog"]);
        let b = ClassMapper::new(["dog", "cat"]);
        assert_eq!(a.encode("cat").unwrap(), b.encode("cat").unwrap());
        assert_eq!(a.encode("dog").unwrap(), b.encode("dog").unwrap());
    }

    #[test]
    fn duplicates_collapse() {
        let mapper = ClassMapper::new(["cat", "cat", "dog"]);
        assert_eq!(mapper.len(), 2);
    }

    #[test]
    fn unknown_class_fails_lookup() {
        let mapper = ClassMapper::new(["cat", "dog"]);
        assert!(matches!(
            mapper.encode("unknown_class"),
            Err(DatasetError::UnknownClass(_))
        ));
    }

    #[test]
    fn out_of_range_decode_fails() {
        let mapper = ClassMapper::new(["cat", "dog"]);
        assert!(matches!(
            mapper.decode(2),
            Err(DatasetError::ClassIndexOutOfRange { index: 2, len: 2 })
        ));
    }
}
