use std::path::PathBuf;

/// File extension recognized for dataset and model arguments.
pub const DATA_FILE_EXTENSION: &str = "dat";

/// Pick the positional arguments that look like data files. Resolution is by
/// extension, not position: the first match is the model/training file, the
/// second the test/classification data file. Anything else is ignored with
/// a warning.
pub fn select_data_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut selected = Vec::new();
    for path in paths {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());
        if ext.as_deref() == Some(DATA_FILE_EXTENSION) {
            selected.push(path.clone());
        } else {
            log::warn!(
                "Ignoring argument without a .{} extension: {}",
                DATA_FILE_EXTENSION,
                path.display()
            );
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_dat_files_in_order() {
        let paths = vec![
            PathBuf::from("model.dat"),
            PathBuf::from("notes.txt"),
            PathBuf::from("test.DAT"),
        ];
        let selected = select_data_files(&paths);
        assert_eq!(
            selected,
            vec![PathBuf::from("model.dat"), PathBuf::from("test.DAT")]
        );
    }

    #[test]
    fn empty_when_nothing_matches() {
        let paths = vec![PathBuf::from("a.csv"), PathBuf::from("b")];
        assert!(select_data_files(&paths).is_empty());
    }
}
