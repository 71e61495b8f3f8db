//! Configuration for memsession
//!
//! Centralized configuration with sensible defaults.

use crate::store::Pragma;

/// Main configuration for a MemoryStorage instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------
    /// Storage name, used only to tag log events
    pub name: String,

    // -------------------------------------------------------------------------
    // Bootstrap
    // -------------------------------------------------------------------------
    /// URL-safe base64 session string to restore on open (padding optional)
    pub session_string: Option<String>,

    // -------------------------------------------------------------------------
    // Store Tuning
    // -------------------------------------------------------------------------
    /// Best-effort performance knobs requested when the store is opened
    pub performance: PerformanceMode,
}

/// Performance knobs requested from the backing store
///
/// Each knob is requested independently; a rejected knob is logged and the
/// store keeps its default for that setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceMode {
    /// Turn off the rollback journal (no durability)
    pub journal_off: bool,

    /// Skip synchronous flushes
    pub synchronous_off: bool,

    /// Keep temporary data in memory
    pub temp_store_memory: bool,
}

impl PerformanceMode {
    /// Request nothing; the store runs with its defaults
    pub const fn disabled() -> Self {
        Self {
            journal_off: false,
            synchronous_off: false,
            temp_store_memory: false,
        }
    }

    /// Enabled knobs, in the order they are requested
    pub fn pragmas(&self) -> Vec<Pragma> {
        let mut pragmas = Vec::with_capacity(3);
        if self.journal_off {
            pragmas.push(Pragma::JournalOff);
        }
        if self.synchronous_off {
            pragmas.push(Pragma::SynchronousOff);
        }
        if self.temp_store_memory {
            pragmas.push(Pragma::TempStoreMemory);
        }
        pragmas
    }
}

impl Default for PerformanceMode {
    fn default() -> Self {
        Self {
            journal_off: true,
            synchronous_off: true,
            temp_store_memory: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "memory".to_string(),
            session_string: None,
            performance: PerformanceMode::default(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the storage name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the session string to restore on open
    pub fn session_string(mut self, session_string: impl Into<String>) -> Self {
        self.config.session_string = Some(session_string.into());
        self
    }

    /// Set the performance knobs requested on open
    pub fn performance(mut self, mode: PerformanceMode) -> Self {
        self.config.performance = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
