//! `CsvFrameRecorder<W>`: bridges `PlaybackListener` to a CSV stream.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::Writer;
use cv_playback::{PlaybackListener, PlaybackState, RenderedFrame};
use tracing::{debug, info};

use crate::row::{FrameRow, HEADER};
use crate::{OutputError, OutputResult};

/// A [`PlaybackListener`] that writes one CSV row per rendered step.
///
/// Errors from the writer are stored internally because listener methods
/// have no return value.  Check for them with
/// [`take_error`][Self::take_error] once playback ends.
pub struct CsvFrameRecorder<W: io::Write> {
    writer:     Writer<W>,
    rows:       usize,
    finished:   bool,
    last_error: Option<OutputError>,
}

impl CsvFrameRecorder<File> {
    /// Create (or truncate) the CSV file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::with_writer(Writer::from_path(path)?)
    }
}

impl<W: io::Write> CsvFrameRecorder<W> {
    /// Record into `inner` and write the header row.
    pub fn new(inner: W) -> OutputResult<Self> {
        Self::with_writer(Writer::from_writer(inner))
    }

    fn with_writer(mut writer: Writer<W>) -> OutputResult<Self> {
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0, finished: false, last_error: None })
    }

    /// Rows written so far, excluding the header.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Take the stored write error, if any.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Write one row directly.
    pub fn write_row(&mut self, row: &FrameRow) -> OutputResult<()> {
        self.writer.write_record(row.to_record())?;
        self.rows += 1;
        Ok(())
    }

    /// Flush buffered rows.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        debug!(rows = self.rows, "frame recording flushed");
        Ok(())
    }

    /// Flush and unwrap the underlying writer.
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer.into_inner().map_err(|e| OutputError::Io(e.into_error()))
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: io::Write> PlaybackListener for CsvFrameRecorder<W> {
    fn on_state_change(&mut self, _from: PlaybackState, to: PlaybackState) {
        if to == PlaybackState::Running {
            // a new run keeps appending; rows carry their own step numbers
            self.finished = false;
        } else if to.is_terminal() {
            info!(rows = self.rows, ?to, "playback ended");
            let result = self.finish();
            self.store_err(result);
        }
    }

    fn on_step_rendered(&mut self, frame: &RenderedFrame<'_>) {
        let result = self.write_row(&FrameRow::from(frame));
        self.store_err(result);
    }
}
