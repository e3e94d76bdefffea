// src/output.rs
//! Sample record writers.
//!
//! - `table`: aligned `t vt at` columns for terminals
//! - `csv`: header row plus one row per sample
//! - `json`: one JSON object per line

use std::io::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::Sample;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

pub trait SampleWriter {
    fn write_sample(&mut self, sample: &Sample) -> OutputResult<()>;

    /// Flush buffered output. Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Build the writer for `format` over `sink`.
pub fn writer_for<'a, W: Write + 'a>(
    format: OutputFormat,
    precision: usize,
    sink: W,
) -> Box<dyn SampleWriter + 'a> {
    match format {
        OutputFormat::Table => Box::new(TableWriter::new(sink, precision)),
        OutputFormat::Csv => Box::new(CsvWriter::new(sink)),
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
    }
}

pub struct TableWriter<W: Write> {
    sink: W,
    precision: usize,
    header_written: bool,
}

impl<W: Write> TableWriter<W> {
    pub fn new(sink: W, precision: usize) -> Self {
        Self {
            sink,
            precision,
            header_written: false,
        }
    }

    fn width(&self) -> usize {
        self.precision + 10
    }
}

impl<W: Write> SampleWriter for TableWriter<W> {
    fn write_sample(&mut self, sample: &Sample) -> OutputResult<()> {
        let width = self.width();
        let precision = self.precision;
        if !self.header_written {
            writeln!(self.sink, "{:>width$} {:>width$} {:>width$}", "t", "vt", "at")?;
            self.header_written = true;
        }
        writeln!(
            self.sink,
            "{:>width$.precision$} {:>width$.precision$} {:>width$.precision$}",
            sample.elapsed, sample.velocity, sample.acceleration
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.sink.flush()?;
        Ok(())
    }
}

pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
            header_written: false,
        }
    }
}

impl<W: Write> SampleWriter for CsvWriter<W> {
    fn write_sample(&mut self, sample: &Sample) -> OutputResult<()> {
        if !self.header_written {
            self.writer
                .write_record(["elapsed", "velocity", "acceleration", "phase", "completed"])?;
            self.header_written = true;
        }
        self.writer.write_record(&[
            sample.elapsed.to_string(),
            sample.velocity.to_string(),
            sample.acceleration.to_string(),
            sample.phase.to_string(),
            sample.completed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub struct JsonWriter<W: Write> {
    sink: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }
}

impl<W: Write> SampleWriter for JsonWriter<W> {
    fn write_sample(&mut self, sample: &Sample) -> OutputResult<()> {
        serde_json::to_writer(&mut self.sink, sample)?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.sink.flush()?;
        Ok(())
    }
}
