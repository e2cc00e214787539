//! Interaction recordings.
//!
//! A recording is a JSONL file. Each time a recorder opens it, a [`Preamble`]
//! line goes first; every later line is an [`Entry`] that stamps one
//! [`LogRecord`] with the milliseconds since that recorder opened. Feeding the
//! records back through a [`Timeline`] in order reproduces the session, which
//! turns a captured bug into a deterministic test.
//!
//! Recordings default to `~/.local/share/segue/interactions.jsonl` and are
//! flushed per line, so `tail -f` follows them live.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use segue_types::{IntervalId, IntervalParams, PointerEvent};

use crate::surface::Surface;
use crate::timeline::Timeline;
use crate::transport::Transport;

/// One replayable input to a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogRecord {
    Pointer { event: PointerEvent },
    Frame,
    Tick { time: f64 },
    Add { params: IntervalParams },
    Remove { id: IntervalId },
}

/// Identifies the process that opened a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preamble {
    pub segue_version: String,
    pub wall_clock_ms: u64,
    pub process_id: u32,
}

impl Preamble {
    fn now() -> Self {
        Self {
            segue_version: env!("CARGO_PKG_VERSION").to_string(),
            wall_clock_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            process_id: std::process::id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub at_ms: u64,
    pub record: LogRecord,
}

/// Shapes a recording line may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum Line {
    Entry(Entry),
    Preamble { recording: Preamble },
}

#[derive(Serialize)]
struct PreambleLine<'a> {
    recording: &'a Preamble,
}

pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("segue")
        .join("interactions.jsonl")
}

/// Line-per-record writer over any byte sink.
pub struct InteractionLog<W: Write = BufWriter<File>> {
    out: W,
    opened: Instant,
    entries: usize,
}

impl InteractionLog {
    /// Append a new session to the recording at `path`, creating parent
    /// directories as needed.
    pub fn create(path: &Path) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        log::debug!(target: "replay", "recording interactions to {}", path.display());
        Self::start(BufWriter::new(file))
    }

    pub fn create_default() -> io::Result<Self> {
        Self::create(&default_log_path())
    }
}

impl<W: Write> InteractionLog<W> {
    /// Write the preamble to `out` and start the session clock.
    pub fn start(mut out: W) -> io::Result<Self> {
        let preamble = Preamble::now();
        serde_json::to_writer(&mut out, &PreambleLine { recording: &preamble })?;
        out.write_all(b"\n")?;
        out.flush()?;
        Ok(Self {
            out,
            opened: Instant::now(),
            entries: 0,
        })
    }

    pub fn record(&mut self, record: &LogRecord) -> io::Result<()> {
        let entry = Entry {
            at_ms: self.opened.elapsed().as_millis() as u64,
            record: record.clone(),
        };
        serde_json::to_writer(&mut self.out, &entry)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.entries += 1;
        Ok(())
    }

    pub fn pointer(&mut self, event: &PointerEvent) -> io::Result<()> {
        self.record(&LogRecord::Pointer {
            event: event.clone(),
        })
    }

    pub fn frame(&mut self) -> io::Result<()> {
        self.record(&LogRecord::Frame)
    }

    pub fn tick(&mut self, time: f64) -> io::Result<()> {
        self.record(&LogRecord::Tick { time })
    }

    /// Entries written by this recorder, not counting the preamble.
    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Debug)]
pub enum ReplayError {
    Open { path: PathBuf, source: io::Error },
    Read { line: usize, source: io::Error },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Open { path, source } => {
                write!(f, "cannot open recording {}: {}", path.display(), source)
            }
            ReplayError::Read { line, source } => {
                write!(f, "recording unreadable at line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Open { source, .. } | ReplayError::Read { source, .. } => Some(source),
        }
    }
}

/// Records in file order. Preambles and blank lines carry no record; lines
/// that parse as neither shape are logged and ignored.
pub fn parse_records(reader: impl BufRead) -> Result<Vec<LogRecord>, ReplayError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.map_err(|source| ReplayError::Read {
            line: number,
            source,
        })?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match serde_json::from_str::<Line>(text) {
            Ok(Line::Entry(entry)) => records.push(entry.record),
            Ok(Line::Preamble { recording }) => log::debug!(
                target: "replay",
                "session from segue {} (pid {})",
                recording.segue_version,
                recording.process_id
            ),
            Err(e) => log::warn!(target: "replay", "line {} ignored: {}", number, e),
        }
    }
    Ok(records)
}

pub fn read_interaction_log(path: &Path) -> Result<Vec<LogRecord>, ReplayError> {
    let file = File::open(path).map_err(|source| ReplayError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(BufReader::new(file))
}

/// Feed one record to `timeline`.
pub fn apply_record<T: Transport, S: Surface>(timeline: &mut Timeline<T, S>, record: &LogRecord) {
    match record {
        LogRecord::Pointer { event } => {
            timeline.handle_pointer(event);
        }
        LogRecord::Frame => {
            timeline.on_frame();
        }
        LogRecord::Tick { time } => timeline.on_time_update(*time),
        LogRecord::Add { params } => {
            if timeline.add(params.clone()).is_none() {
                log::debug!(target: "replay", "add skipped: timeline full");
            }
        }
        LogRecord::Remove { id } => {
            timeline.remove(id);
        }
    }
}

/// Replay the recording at `path` into `timeline`. Returns the number of
/// records applied.
///
/// A recording copied under `segue-core/tests/fixtures/` becomes a
/// regression case:
/// ```bash
/// cp ~/.local/share/segue/interactions.jsonl segue-core/tests/fixtures/overlap_drag.jsonl
/// ```
pub fn replay_interaction_log<T: Transport, S: Surface>(
    path: &Path,
    timeline: &mut Timeline<T, S>,
) -> Result<usize, ReplayError> {
    let records = read_interaction_log(path)?;
    for record in &records {
        apply_record(timeline, record);
    }
    log::debug!(target: "replay", "replayed {} records from {}", records.len(), path.display());
    Ok(records.len())
}
