use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::error::DatasetError;

/// One sample's worth of metadata. The dataset owns a `Vec` of these;
/// shuffling reorders the vector, nothing ever mutates a row in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub image_name: String,
    pub class_name: String,
    pub image_path: PathBuf,
    pub partition_name: Option<String>,
    pub label: Option<usize>,
}

const MANIFEST_SEPARATOR: char = ';';
const REQUIRED_COLUMNS: [&str; 4] = ["image_name", "class_name", "image_path", "partition_name"];

/// Read a `;`-separated manifest with a header row.
///
/// The four required columns must all be present in the header; additional
/// columns are permitted. A `label` column, when present, is parsed as the
/// precomputed integer label and suppresses later label derivation. If
/// `partition` is given, only rows of that partition are kept.
pub fn read_manifest(
    path: &Path,
    partition: Option<&str>,
) -> Result<Vec<MetadataRow>, DatasetError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header = lines.next().ok_or(DatasetError::EmptyDataset)?;
    let columns: Vec<&str> = header
        .split(MANIFEST_SEPARATOR)
        .map(str::trim)
        .collect();

    let mut required = [0usize; 4];
    for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = columns
            .iter()
            .position(|&c| c == name)
            .ok_or(DatasetError::MissingColumn(name))?;
    }
    let [name_col, class_col, path_col, partition_col] = required;
    let label_col = columns.iter().position(|&c| c == "label");

    let mut rows = Vec::new();
    for (line_number, line) in lines.enumerate() {
        let fields: Vec<&str> = line.split(MANIFEST_SEPARATOR).collect();
        if fields.len() < columns.len() {
            return Err(DatasetError::MalformedRow { row: line_number });
        }

        let partition_name = fields[partition_col].trim();
        if let Some(wanted) = partition {
            if partition_name != wanted {
                continue;
            }
        }

        let label = match label_col {
            Some(col) => {
                let value = fields[col].trim();
                Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| DatasetError::InvalidLabel {
                            row: line_number,
                            value: value.to_string(),
                        })?,
                )
            }
            None => None,
        };

        rows.push(MetadataRow {
            image_name: fields[name_col].trim().to_string(),
            class_name: fields[class_col].trim().to_string(),
            image_path: PathBuf::from(fields[path_col].trim()),
            partition_name: Some(partition_name.to_string()),
            label,
        });
    }

    if let Some(wanted) = partition {
        info!(partition = wanted, rows = rows.len(), "filtered manifest by partition");
    }

    Ok(rows)
}

/// Scan a directory tree where each immediate subdirectory is a class and
/// every file inside one is a sample. Listings are sorted so the
/// pre-shuffle row order does not depend on the filesystem.
pub fn scan_directory(root: &Path) -> Result<Vec<MetadataRow>, DatasetError> {
    if !root.is_dir() {
        return Err(DatasetError::DirectoryNotFound(
            root.display().to_string(),
        ));
    }

    let mut class_dirs: Vec<(String, PathBuf)> = fs::read_dir(root)?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| (name.to_string(), entry.path()))
        })
        .collect();
    class_dirs.sort_unstable();

    let mut rows = Vec::new();
    for (class_name, class_path) in class_dirs {
        let mut files: Vec<String> = fs::read_dir(&class_path)?
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        files.sort_unstable();

        for image_name in files {
            let image_path = class_path.join(&image_name);
            rows.push(MetadataRow {
                image_name,
                class_name: class_name.clone(),
                image_path,
                partition_name: None,
                label: None,
            });
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const MANIFEST: &str = "\
image_name;class_name;image_path;partition_name
a.png;cat;/data/a.png;train
b.png;dog;/data/b.png;train
c.png;cat;/data/c.png;test
";

    #[test]
    fn reads_all_rows_without_filter() {
        let file = write_manifest(MANIFEST);
        let rows = read_manifest(file.path(), None).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].image_name, "a.png");
        assert_eq!(rows[0].class_name, "cat");
        assert_eq!(rows[0].image_path, PathBuf::from("/data/a.png"));
        assert_eq!(rows[0].partition_name.as_deref(), Some("train"));
        assert!(rows[0].label.is_none());
    }

    #[test]
    fn partition_filter_drops_other_partitions() {
        let file = write_manifest(MANIFEST);
        let rows = read_manifest(file.path(), Some("train")).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows
            .iter()
            .all(|row| row.partition_name.as_deref() == Some("train")));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let file = write_manifest("image_name;class_name;partition_name\na;cat;train\n");
        assert!(matches!(
            read_manifest(file.path(), None),
            Err(DatasetError::MissingColumn("image_path"))
        ));
    }

    #[test]
    fn label_column_is_parsed_when_present() {
        let file = write_manifest(
            "image_name;class_name;image_path;partition_name;label\na;cat;/a;train;7\n",
        );
        let rows = read_manifest(file.path(), None).unwrap();
        assert_eq!(rows[0].label, Some(7));
    }

    #[test]
    fn non_integer_label_is_fatal() {
        let file = write_manifest(
            "image_name;class_name;image_path;partition_name;label\na;cat;/a;train;x\n",
        );
        assert!(matches!(
            read_manifest(file.path(), None),
            Err(DatasetError::InvalidLabel { row: 0, .. })
        ));
    }

    #[test]
    fn extra_columns_are_permitted() {
        let file = write_manifest(
            "image_name;class_name;image_path;partition_name;notes\na;cat;/a;train;whatever\n",
        );
        let rows = read_manifest(file.path(), None).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn short_row_is_fatal() {
        let file = write_manifest("image_name;class_name;image_path;partition_name\na;cat\n");
        assert!(matches!(
            read_manifest(file.path(), None),
            Err(DatasetError::MalformedRow { row: 0 })
        ));
    }

    #[test]
    fn missing_directory_is_reported() {
        let err = scan_directory(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, DatasetError::DirectoryNotFound(_)));
    }
}
