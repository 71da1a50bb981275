//! Tracing setup with an in-memory buffer of recent log lines

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Entries kept by the global buffer before the oldest are dropped
pub const DEFAULT_LOG_CAPACITY: usize = 1000;

/// Target used for lines that carry no `target:` prefix
const UNTARGETED: &str = "general";

/// One captured log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            target: target.into(),
            message: message.into(),
        }
    }

    /// `12:00:01.042 DEBUG freeze_state: Froze physical column 3`
    pub fn format_for_display(&self) -> String {
        format!(
            "{} {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

struct Ring {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

/// Bounded, shareable store of the most recent log entries
#[derive(Clone)]
pub struct LogRingBuffer {
    ring: Arc<Mutex<Ring>>,
}

impl Default for LogRingBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl LogRingBuffer {
    /// A buffer holding at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ring: Arc::new(Mutex::new(Ring {
                entries: VecDeque::with_capacity(capacity),
                capacity,
            })),
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring().capacity
    }

    pub fn push(&self, entry: LogEntry) {
        let mut ring = self.ring();
        if ring.entries.len() == ring.capacity {
            ring.entries.pop_front();
        }
        ring.entries.push_back(entry);
    }

    /// Up to `count` newest entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<LogEntry> {
        let ring = self.ring();
        let skip = ring.entries.len().saturating_sub(count);
        ring.entries.iter().skip(skip).cloned().collect()
    }

    /// All retained entries logged under `target`, oldest first
    pub fn for_target(&self, target: &str) -> Vec<LogEntry> {
        self.ring()
            .entries
            .iter()
            .filter(|entry| entry.target == target)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.ring().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.ring().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring().entries.is_empty()
    }

    // A panic while holding the lock leaves plain data behind; keep using it
    fn ring(&self) -> MutexGuard<'_, Ring> {
        self.ring
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Turn one compact-format line (`LEVEL target: message`) into an entry
fn parse_compact_line(line: &str) -> LogEntry {
    let leveled = line
        .split_once(' ')
        .and_then(|(level, rest)| level.parse::<Level>().ok().map(|level| (level, rest)));

    let Some((level, rest)) = leveled else {
        return LogEntry::new(Level::INFO, UNTARGETED, line);
    };

    match rest.split_once(':') {
        Some((target, message)) if !target.is_empty() && !target.contains(' ') => {
            LogEntry::new(level, target, message.trim())
        }
        _ => LogEntry::new(level, UNTARGETED, rest.trim()),
    }
}

/// `MakeWriter` that feeds formatted lines into a `LogRingBuffer`
#[derive(Clone)]
pub struct RingBufferWriter {
    buffer: LogRingBuffer,
}

impl RingBufferWriter {
    pub fn new(buffer: LogRingBuffer) -> Self {
        Self { buffer }
    }
}

impl std::io::Write for RingBufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            self.buffer.push(parse_compact_line(line));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RingBufferWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

static LOG_BUFFER: OnceLock<LogRingBuffer> = OnceLock::new();

/// The buffer installed by `init_tracing`, if it has run
pub fn get_log_buffer() -> Option<LogRingBuffer> {
    LOG_BUFFER.get().cloned()
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`) and a
/// compact formatter writing into the shared buffer.
///
/// Safe to call more than once; later calls return the existing buffer.
pub fn init_tracing() -> LogRingBuffer {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    if let Some(buffer) = get_log_buffer() {
        return buffer;
    }

    let buffer = LOG_BUFFER.get_or_init(LogRingBuffer::default).clone();

    let fmt_layer = fmt::layer()
        .with_writer(RingBufferWriter::new(buffer.clone()))
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .compact();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Another subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::info!(target: "system", "Tracing initialized");

    buffer
}
