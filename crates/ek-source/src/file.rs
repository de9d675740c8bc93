use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use ek_core::traits::LineSource;

/// Local copy of the index.
///
/// # Example
/// ```no_run
/// use ek_core::build_from_source;
/// use ek_source::file::FileSource;
/// let mut source = FileSource::new("data/index-euc-kr.txt");
/// let (tables, _) = build_from_source(&mut source).unwrap();
/// ```
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading `path` when opened.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LineSource for FileSource {
    fn open(&mut self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path).map_err(|e| {
            io::Error::new(e.kind(), format!("{} : {e}", self.path.display()))
        })?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ek_core::TableError;
    use ek_core::builder::build_from_source;

    #[test]
    fn builds_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index-euc-kr.txt");
        std::fs::write(&path, "# index\n0\t0xAC02\n12460\t0x3000\n").unwrap();
        let mut source = FileSource::new(&path);
        let (tables, stats) = build_from_source(&mut source).unwrap();
        assert_eq!(tables.decode().get(12460), Some(0x3000));
        assert_eq!(stats.lines, 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FileSource::new(dir.path().join("absent.txt"));
        let err = build_from_source(&mut source).unwrap_err();
        match err {
            TableError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert!(e.to_string().contains("absent.txt"));
            }
            other => panic!("erreur inattendue : {other:?}"),
        }
    }
}
