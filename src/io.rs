//! Line sources and sinks.
//!
//! A [`LineSource`] produces the lines a collection is loaded from and a
//! [`LineSink`] receives the lines it renders. [`TextFile`] implements both
//! on top of a path; files are opened and closed inside each call, so an
//! error partway through never leaves a handle open.

use crate::error::RecordError;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A line whose bytes are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndecodableLine {
    /// The bytes decoded with U+FFFD replacing invalid sequences.
    pub lossy: String,
    /// Byte offset of the first invalid sequence.
    pub valid_up_to: usize,
}

/// One line from a source. Decoding failures are per line, not per source.
pub type SourceLine = Result<String, UndecodableLine>;

fn decode_line(bytes: Vec<u8>) -> SourceLine {
    String::from_utf8(bytes).map_err(|e| UndecodableLine {
        lossy: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Something that yields an ordered sequence of text lines.
///
/// The outer error aborts the read. A line that cannot be decoded comes back
/// as `Err` in its slot so the rest of the source is still usable.
pub trait LineSource {
    fn read_lines(&self) -> Result<Vec<SourceLine>, RecordError>;
}

/// Something that stores an ordered sequence of text lines.
pub trait LineSink {
    fn write_lines(&self, lines: &[String]) -> Result<(), RecordError>;
}

/// In-memory source, mostly useful for tests.
impl LineSource for [String] {
    fn read_lines(&self) -> Result<Vec<SourceLine>, RecordError> {
        Ok(self.iter().cloned().map(Ok).collect())
    }
}

/// A newline-terminated text file.
#[derive(Debug, Clone)]
pub struct TextFile {
    path: PathBuf,
}

impl TextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> RecordError {
        RecordError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl LineSource for TextFile {
    /// Read every line. `\r\n` endings are accepted. Lines that are not
    /// UTF-8 are returned as [`UndecodableLine`].
    fn read_lines(&self) -> Result<Vec<SourceLine>, RecordError> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let mut lines = Vec::new();
        for raw in BufReader::new(file).split(b'\n') {
            let mut bytes = raw.map_err(|e| self.io_error(e))?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            lines.push(decode_line(bytes));
        }
        tracing::debug!(path = %self.path.display(), lines = lines.len(), "read lines");
        Ok(lines)
    }
}

impl LineSink for TextFile {
    /// Replace the file with `lines`, one per line. Missing parent
    /// directories are created.
    fn write_lines(&self, lines: &[String]) -> Result<(), RecordError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{line}").map_err(|e| self.io_error(e))?;
        }
        writer.flush().map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), lines = lines.len(), "wrote lines");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(lines: &[&str]) -> Vec<SourceLine> {
        lines.iter().map(|l| Ok(l.to_string())).collect()
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = TextFile::new(dir.path().join("out.csv"));
        let lines = vec!["a;b".to_string(), "c;d".to_string()];
        file.write_lines(&lines).unwrap();
        assert_eq!(file.read_lines().unwrap(), decoded(&["a;b", "c;d"]));
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "a;b\nc;d\n");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = TextFile::new(dir.path().join("nested/deeper/out.csv"));
        file.write_lines(&["x".to_string()]).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn test_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = TextFile::new(dir.path().join("out.csv"));
        file.write_lines(&["old".to_string(), "old".to_string()])
            .unwrap();
        file.write_lines(&["new".to_string()]).unwrap();
        assert_eq!(file.read_lines().unwrap(), decoded(&["new"]));
    }

    #[test]
    fn test_read_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.csv");
        fs::write(&path, "h\r\n1234567;A;B;1.0\r\n").unwrap();
        let lines = TextFile::new(&path).read_lines().unwrap();
        assert_eq!(lines, decoded(&["h", "1234567;A;B;1.0"]));
    }

    #[test]
    fn test_read_keeps_lines_around_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        // "Chloé" saved as Latin-1: 0xE9 is not valid UTF-8
        let data: &[u8] = b"h\n\
            1234567;Alice;Dupont;85.0\n\
            2345678;Chlo\xE9;Roy;90.0\n\
            3456789;Bob;Martin;70.0\n";
        fs::write(&path, data).unwrap();
        let lines = TextFile::new(&path).read_lines().unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], Ok("1234567;Alice;Dupont;85.0".to_string()));
        assert_eq!(
            lines[2],
            Err(UndecodableLine {
                lossy: "2345678;Chlo\u{FFFD};Roy;90.0".to_string(),
                valid_up_to: 12,
            })
        );
        assert_eq!(lines[3], Ok("3456789;Bob;Martin;70.0".to_string()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = TextFile::new(dir.path().join("missing.csv"));
        let err = file.read_lines().unwrap_err();
        match err {
            RecordError::Io { path, source } => {
                assert_eq!(path, file.path());
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_slice_source() {
        let lines = vec!["h".to_string(), "row".to_string()];
        assert_eq!(lines.as_slice().read_lines().unwrap(), decoded(&["h", "row"]));
    }
}
