use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tracing::Level;

/// Destination for one formatted log record. The terminal host owns the
/// screen, so without a log file records are dropped rather than written to
/// stderr.
pub enum DelegatingWriter<'a> {
    File(MutexGuard<'a, File>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            DelegatingWriter::File(f) => f.write(buf),
            DelegatingWriter::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            DelegatingWriter::File(f) => f.flush(),
            DelegatingWriter::Sink(s) => s.flush(),
        }
    }
}

#[derive(Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Mutex<File>>,
}

impl SubscriberMakeWriter {
    pub fn discard() -> Self {
        Self { file: None }
    }

    /// Append to `path`, creating it when missing.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Mutex::new(file)),
        })
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match &self.file {
            // a panic mid-write leaves the file usable
            Some(file) => DelegatingWriter::File(
                file.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
            ),
            None => DelegatingWriter::Sink(io::sink()),
        }
    }
}

/// Install the global subscriber at `level`, writing to `log_file` when
/// given. Safe to call multiple times; later calls leave the first
/// subscriber in place.
pub fn init(level: Level, log_file: Option<&Path>) -> io::Result<()> {
    let writer = match log_file {
        Some(path) => SubscriberMakeWriter::open(path)?,
        None => SubscriberMakeWriter::discard(),
    };
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_writer(writer)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}
