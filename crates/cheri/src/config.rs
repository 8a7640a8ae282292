//! Configuration for the capability extension.
//!
//! This module defines the structures that size and initialize the extension:
//! 1. **Defaults:** Baseline memory map constants.
//! 2. **Memory:** The physical range backed by RAM, which also sizes tag memory.
//! 3. **Reset:** Initial program counter and the reset value of DDC.
//! 4. **General:** Trace switches.
//!
//! Configuration is supplied as JSON by the host simulator, or use
//! `CheriConfig::default()`.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Base address of main system RAM (2 GiB).
    pub const RAM_BASE: u64 = 0x8000_0000;

    /// Total size of main system RAM (128 MiB).
    ///
    /// Tag memory holds one bit per 16-byte granule of this range.
    pub const RAM_SIZE: usize = 128 * 1024 * 1024;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvsim_cheri::config::CheriConfig;
///
/// let config = CheriConfig::default();
/// assert_eq!(config.memory.ram_base, 0x8000_0000);
/// assert!(config.reset.ddc_almighty);
/// assert_eq!(config.start_pc(), 0x8000_0000);
/// ```
///
/// Deserializing from JSON; omitted sections and fields take their defaults:
///
/// ```
/// use rvsim_cheri::config::CheriConfig;
///
/// let json = r#"{
///     "memory": { "ram_base": 1073741824, "ram_size": 1048576 },
///     "reset": { "ddc_almighty": false },
///     "general": { "trace_checks": true }
/// }"#;
///
/// let config = CheriConfig::from_json(json).unwrap();
/// assert_eq!(config.memory.ram_size, 1 << 20);
/// assert!(!config.reset.ddc_almighty);
/// assert_eq!(config.start_pc(), 0x4000_0000);
/// assert!(config.general.trace_checks);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheriConfig {
    /// Physical memory backing and tag memory sizing.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Architectural reset state.
    #[serde(default)]
    pub reset: ResetConfig,
    /// Trace switches.
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CheriConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the architectural program counter at reset.
    ///
    /// Defaults to the RAM base when `reset.start_pc` is not set.
    pub fn start_pc(&self) -> u64 {
        self.reset.start_pc.unwrap_or(self.memory.ram_base)
    }
}

/// Physical memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Base physical address of RAM.
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u64,

    /// Size of RAM in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: usize,
}

impl MemoryConfig {
    fn default_ram_base() -> u64 {
        defaults::RAM_BASE
    }

    fn default_ram_size() -> usize {
        defaults::RAM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
        }
    }
}

/// Reset-time architectural state.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetConfig {
    /// Initial PC (defaults to RAM base).
    #[serde(default)]
    pub start_pc: Option<u64>,

    /// Reset DDC to the almighty capability. Pure-capability profiles set this
    /// to false so that every legacy access faults until software installs a DDC.
    #[serde(default = "ResetConfig::default_ddc_almighty")]
    pub ddc_almighty: bool,
}

impl ResetConfig {
    fn default_ddc_almighty() -> bool {
        true
    }
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            start_pc: None,
            ddc_almighty: true,
        }
    }
}

/// Trace switches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace` event for every successful check-engine authorization.
    /// Faults are always logged at `debug`.
    #[serde(default)]
    pub trace_checks: bool,
}
