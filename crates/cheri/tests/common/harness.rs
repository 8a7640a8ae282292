use rvsim_cheri::cap::{Capability, Permissions};
use rvsim_cheri::common::Trap;
use rvsim_cheri::config::CheriConfig;
use rvsim_cheri::core::exec::Flow;
use rvsim_cheri::core::{ExecContext, Hart};
use rvsim_cheri::soc::{FlatMemory, TagMemory};
use tracing_subscriber::EnvFilter;

/// Base of the test RAM.
pub const RAM_BASE: u64 = 0x8000_0000;

/// Size of the test RAM (64 KiB).
pub const RAM_SIZE: usize = 64 * 1024;

pub struct TestContext {
    pub hart: Hart,
    pub tags: TagMemory,
    pub mem: FlatMemory,
    pub config: CheriConfig,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let json =
            format!(r#"{{ "memory": {{ "ram_base": {RAM_BASE}, "ram_size": {RAM_SIZE} }} }}"#);
        let config = CheriConfig::from_json(&json).unwrap();
        Self::with_config(config)
    }

    pub fn with_config(config: CheriConfig) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            hart: Hart::new(&config),
            tags: TagMemory::from_config(&config),
            mem: FlatMemory::from_config(&config),
            config,
        }
    }

    /// Decodes and executes one capability instruction.
    pub fn exec(&mut self, insn: u32) -> Result<Flow, Trap> {
        ExecContext::new(&mut self.hart, &mut self.tags, &mut self.mem).step(insn)
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, reg: usize, val: u64) {
        self.hart.regs.write(reg, val);
    }

    /// Read a general-purpose register value.
    pub fn get_reg(&self, reg: usize) -> u64 {
        self.hart.regs.read(reg)
    }

    /// Set a capability register value.
    pub fn set_cap(&mut self, reg: usize, cap: Capability) {
        self.hart.cregs.write(reg, cap);
    }

    /// Read a capability register value.
    pub fn cap(&self, reg: usize) -> Capability {
        self.hart.cregs.read(reg)
    }

    /// Cause byte of the capability cause register.
    pub fn ccsr_cause(&self) -> u64 {
        (self.hart.ccsr >> 8) & 0xff
    }
}

/// A tagged capability derived from almighty with bounds `[base, base + len)`
/// and the cursor at `base`.
pub fn bounded(base: u64, len: u64) -> Capability {
    let mut cap = Capability::almighty();
    cap.set_cursor(base);
    assert!(cap.set_bounds(base, u128::from(base) + u128::from(len)), "inexact test bounds");
    cap
}

/// `bounded` with only `perms` left.
pub fn bounded_with(base: u64, len: u64, perms: Permissions) -> Capability {
    let mut cap = bounded(base, len);
    cap.perms = perms;
    cap
}

/// A RAM-covering data capability with load/store/capability permissions.
pub fn ram_data_cap() -> Capability {
    bounded_with(
        RAM_BASE,
        RAM_SIZE as u64,
        Permissions::GLOBAL
            | Permissions::LOAD
            | Permissions::STORE
            | Permissions::LOAD_CAP
            | Permissions::STORE_CAP
            | Permissions::STORE_LOCAL_CAP,
    )
}
