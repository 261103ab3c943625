//! Line-oriented persistence of a batch's outputs.
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Errors that abort writing to a sink.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("Failed to create results file {path}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to flush results")]
    Flush(#[source] io::Error),
}

/// Counts of lines written to a sink.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SinkReport {
    pub written: usize,
    pub failed: usize,
}

/// Writes each output on its own newline-terminated line.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
}

impl LineSink<File> {
    /// Creates (or truncates) the file at `path` and returns a sink that writes to it.
    ///
    /// The file is not buffered, so a line that cannot be written is detected and reported when
    /// that line is written rather than when the sink is flushed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SinkError::Create {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes `lines` in order and flushes the writer.
    ///
    /// A line that fails to write is logged and counted, and does not stop the remaining lines
    /// from being written. Only a failure to flush is returned as an error. With a buffered
    /// writer, write failures surface when the buffer is flushed, so they are reported as a
    /// `SinkError::Flush` rather than per line.
    pub fn write_lines<I, S>(&mut self, lines: I) -> Result<SinkReport, SinkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = SinkReport::default();
        for (index, line) in lines.into_iter().enumerate() {
            match writeln!(self.writer, "{}", line.as_ref()) {
                Ok(()) => report.written += 1,
                Err(error) => {
                    tracing::warn!(line = index + 1, %error, "error writing result");
                    report.failed += 1;
                }
            }
        }
        self.writer.flush().map_err(SinkError::Flush)?;
        Ok(report)
    }

    /// Consumes this sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::{LineSink, SinkError, SinkReport};
    use std::fs;
    use std::io::{self, BufWriter, Write};
    use std::path::PathBuf;

    /// Writer that rejects any write starting with `bad`.
    #[derive(Default)]
    struct PickyWriter {
        inner: Vec<u8>,
    }

    impl Write for PickyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.starts_with(b"bad") {
                Err(io::Error::other("rejected"))
            } else {
                self.inner.write(buf)
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Writer that fails every write, like a full disk.
    struct FullWriter;

    impl Write for FullWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("taskhive-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_write_lines() {
        let mut sink = LineSink::new(Vec::new());
        let report = sink.write_lines(["a", "b", "c"]).unwrap();
        assert_eq!(
            report,
            SinkReport {
                written: 3,
                failed: 0
            }
        );
        assert_eq!(sink.into_inner(), b"a\nb\nc\n");
    }

    #[test]
    fn test_write_nothing() {
        let mut sink = LineSink::new(Vec::new());
        let report = sink.write_lines(Vec::<String>::new()).unwrap();
        assert_eq!(report, SinkReport::default());
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_failed_line_does_not_abort() {
        let mut sink = LineSink::new(PickyWriter::default());
        let report = sink.write_lines(["1", "bad", "3", "bad", "5"]).unwrap();
        assert_eq!(
            report,
            SinkReport {
                written: 3,
                failed: 2
            }
        );
        assert_eq!(sink.into_inner().inner, b"1\n3\n5\n");
    }

    #[test]
    fn test_every_line_fails() {
        let mut sink = LineSink::new(FullWriter);
        let report = sink.write_lines(["a", "b", "c"]).unwrap();
        assert_eq!(
            report,
            SinkReport {
                written: 0,
                failed: 3
            }
        );
    }

    #[test]
    fn test_buffered_failure_surfaces_on_flush() {
        let mut sink = LineSink::new(BufWriter::new(FullWriter));
        let err = sink.write_lines(["a", "b", "c"]).unwrap_err();
        assert!(matches!(err, SinkError::Flush(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_created_file_reports_failed_lines() {
        // every write to /dev/full fails with ENOSPC
        let mut sink = LineSink::create("/dev/full").unwrap();
        let report = sink.write_lines(["a", "b", "c"]).unwrap();
        assert_eq!(
            report,
            SinkReport {
                written: 0,
                failed: 3
            }
        );
    }

    #[test]
    fn test_create_file() {
        let path = temp_path("results.txt");
        let mut sink = LineSink::create(&path).unwrap();
        sink.write_lines(["Processed Task 1", "Processed Task 2"])
            .unwrap();
        drop(sink);
        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert_eq!(contents, "Processed Task 1\nProcessed Task 2\n");
    }

    #[test]
    fn test_create_fails() {
        let path = temp_path("missing-dir").join("results.txt");
        let err = LineSink::create(&path).unwrap_err();
        assert!(matches!(err, SinkError::Create { path: ref p, .. } if *p == path));
    }
}
