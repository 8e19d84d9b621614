use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::record::{DELIMITER, FIELD_COUNT, MalformedRecord, decode_record, encode_record};
use crate::domain::Vehicle;

/// The snapshot file could not be opened, written or read.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("cannot write snapshot {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read snapshot {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A snapshot line that was skipped during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number in the snapshot file
    pub line: u64,
    pub error: MalformedRecord,
}

/// Outcome of loading a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// False when the file did not exist and nothing was read
    pub found: bool,
    pub loaded: usize,
    pub errors: Vec<LineError>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.errors.len()
    }
}

/// Write every vehicle, one line each, replacing whatever was at `path`.
/// Returns the number of lines written.
pub fn write_snapshot<'a, I>(path: &Path, vehicles: I) -> Result<usize, SnapshotError>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let write_err = |source: io::Error| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(BufWriter::new(file));

    let mut count = 0;
    for vehicle in vehicles {
        let record = encode_record(vehicle);
        if record.iter().any(|field| field.as_bytes().contains(&DELIMITER)) {
            warn!(
                registration = %vehicle.registration,
                "field contains the delimiter; line will not load back"
            );
        }
        writer
            .write_record(&record)
            .map_err(|e| write_err(csv_to_io(e)))?;
        count += 1;
    }
    writer.flush().map_err(write_err)?;

    info!(path = %path.display(), vehicles = count, "snapshot saved");
    Ok(count)
}

/// Read a snapshot, handing each parsed vehicle to `sink` in file order.
///
/// A missing file is not an error: the report comes back with `found == false`.
/// Malformed lines are logged, recorded in the report and skipped.
pub fn read_snapshot<F>(path: &Path, mut sink: F) -> Result<LoadReport, SnapshotError>
where
    F: FnMut(Vehicle),
{
    let read_err = |source: io::Error| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot, starting with an empty fleet");
            return Ok(LoadReport::default());
        }
        Err(e) => return Err(read_err(e)),
    };

    // flexible: the field count check belongs to decode_record
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(DELIMITER)
        .from_reader(BufReader::new(file));

    let mut report = LoadReport {
        found: true,
        ..LoadReport::default()
    };
    let mut record = csv::StringRecord::with_capacity(128, FIELD_COUNT);

    loop {
        let line = reader.position().line();
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map_or(line, |p| p.line());
                let fields: Vec<&str> = record.iter().collect();
                match decode_record(&fields) {
                    Ok(vehicle) => {
                        sink(vehicle);
                        report.loaded += 1;
                    }
                    Err(error) => skip_line(&mut report, line, error),
                }
            }
            Err(e) => match e.into_kind() {
                csv::ErrorKind::Io(source) => return Err(read_err(source)),
                kind => skip_line(
                    &mut report,
                    line,
                    MalformedRecord::Unreadable(describe_csv_error(kind)),
                ),
            },
        }
    }

    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped(),
        "snapshot loaded"
    );
    Ok(report)
}

fn skip_line(report: &mut LoadReport, line: u64, error: MalformedRecord) {
    warn!(line, %error, "skipping malformed snapshot line");
    report.errors.push(LineError { line, error });
}

fn csv_to_io(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        kind => io::Error::other(describe_csv_error(kind)),
    }
}

fn describe_csv_error(kind: csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Utf8 { err, .. } => format!("not valid UTF-8 ({})", err),
        other => format!("{:?}", other),
    }
}
