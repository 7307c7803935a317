#![warn(missing_docs)]
//! Deterministic testing surfaces for furnace simulations.

use anyhow::Result;
use serde::Serialize;
use smeltsim_core::SimTick;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Primary event record captured by headless tests.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Human-readable kind label (e.g. "became_lit").
    pub kind: &'a str,
    /// Free-form payload for smoke tests.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// In-memory transition log for asserting on lit/unlit sequences.
#[derive(Debug, Default)]
pub struct TransitionLog {
    events: Vec<(SimTick, String)>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn record(&mut self, tick: SimTick, kind: impl Into<String>) {
        self.events.push((tick, kind.into()));
    }

    /// All recorded events, in order.
    pub fn events(&self) -> &[(SimTick, String)] {
        &self.events
    }

    /// Number of events of a given kind.
    pub fn count(&self, kind: &str) -> usize {
        self.events.iter().filter(|(_, k)| k == kind).count()
    }

    /// The kinds in order, for compact sequence assertions.
    pub fn kinds(&self) -> Vec<&str> {
        self.events.iter().map(|(_, k)| k.as_str()).collect()
    }
}
