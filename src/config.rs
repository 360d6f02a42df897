//! Persisted configuration blocks and the store they live in.

use alloc::vec::Vec;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::command::{AnimationName, ParamsText, bounded};
use crate::error::ShowError;
use crate::layout::LayoutSettings;
use crate::log::show_log;

/// Animation started when nothing valid is stored.
pub const DEFAULT_ANIMATION: &str = "Rainbow";
pub const DEFAULT_BRIGHTNESS: u8 = 128;
pub const DEFAULT_CYCLE_TIME_MS: u64 = 10;

/// Which animation runs and with what parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowConfig {
    pub animation: AnimationName,
    pub params: ParamsText,
}

impl Default for ShowConfig {
    fn default() -> Self {
        let mut animation = AnimationName::new();
        let _ = animation.push_str(DEFAULT_ANIMATION);
        let mut params = ParamsText::new();
        let _ = params.push_str("{}");
        Self { animation, params }
    }
}

impl ShowConfig {
    pub fn new(animation: &str, params: &str) -> Result<Self, ShowError> {
        Ok(Self {
            animation: bounded("animation name", animation)?,
            params: bounded("params", params)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceConfig {
    pub brightness: u8,
    /// Target frame period while animating
    pub cycle_time_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            cycle_time_ms: DEFAULT_CYCLE_TIME_MS,
        }
    }
}

pub type LayoutConfig = LayoutSettings;

/// Persistent home of the configuration blocks.
///
/// Loads return defaults when a block is missing or unreadable. Saves are
/// fire-and-forget; a store that fails to write logs and carries on.
pub trait ConfigStore {
    fn load_show_config(&mut self) -> ShowConfig;
    fn save_show_config(&mut self, config: &ShowConfig);
    fn load_device_config(&mut self) -> DeviceConfig;
    fn save_device_config(&mut self, config: &DeviceConfig);
    fn load_layout_config(&mut self) -> LayoutConfig;
    fn save_layout_config(&mut self, config: &LayoutConfig);
}

impl<C: ConfigStore + ?Sized> ConfigStore for &mut C {
    fn load_show_config(&mut self) -> ShowConfig {
        (**self).load_show_config()
    }

    fn save_show_config(&mut self, config: &ShowConfig) {
        (**self).save_show_config(config);
    }

    fn load_device_config(&mut self) -> DeviceConfig {
        (**self).load_device_config()
    }

    fn save_device_config(&mut self, config: &DeviceConfig) {
        (**self).save_device_config(config);
    }

    fn load_layout_config(&mut self) -> LayoutConfig {
        (**self).load_layout_config()
    }

    fn save_layout_config(&mut self, config: &LayoutConfig) {
        (**self).save_layout_config(config);
    }
}

/// Encode a block as JSON bytes.
pub fn encode_block<T: Serialize>(block: &T) -> Option<Vec<u8>> {
    serde_json::to_vec(block).ok()
}

/// Decode a block, falling back to its defaults when absent or corrupt.
pub fn decode_block<T: DeserializeOwned + Default>(name: &str, bytes: Option<&[u8]>) -> T {
    let Some(bytes) = bytes else {
        return T::default();
    };
    serde_json::from_slice(bytes).unwrap_or_else(|_| {
        show_log!("[config] {} block unreadable, using defaults", name);
        T::default()
    })
}

/// RAM-backed store keeping each block as encoded JSON, the way a flash
/// partition would.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    show: Option<Vec<u8>>,
    device: Option<Vec<u8>>,
    layout: Option<Vec<u8>>,
    writes: usize,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_show(mut self, config: &ShowConfig) -> Self {
        self.show = encode_block(config);
        self
    }

    #[must_use]
    pub fn with_device(mut self, config: &DeviceConfig) -> Self {
        self.device = encode_block(config);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, config: &LayoutConfig) -> Self {
        self.layout = encode_block(config);
        self
    }

    /// Store raw bytes as the show block, bypassing encoding.
    #[must_use]
    pub fn with_raw_show(mut self, bytes: &[u8]) -> Self {
        self.show = Some(bytes.to_vec());
        self
    }

    /// Number of saves performed so far.
    pub const fn writes(&self) -> usize {
        self.writes
    }

    pub fn show(&self) -> Option<ShowConfig> {
        self.show.as_deref().map(|bytes| decode_block("show", Some(bytes)))
    }

    pub fn device(&self) -> Option<DeviceConfig> {
        self.device.as_deref().map(|bytes| decode_block("device", Some(bytes)))
    }

    pub fn layout(&self) -> Option<LayoutConfig> {
        self.layout.as_deref().map(|bytes| decode_block("layout", Some(bytes)))
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_show_config(&mut self) -> ShowConfig {
        decode_block("show", self.show.as_deref())
    }

    fn save_show_config(&mut self, config: &ShowConfig) {
        self.show = encode_block(config);
        self.writes += 1;
    }

    fn load_device_config(&mut self) -> DeviceConfig {
        decode_block("device", self.device.as_deref())
    }

    fn save_device_config(&mut self, config: &DeviceConfig) {
        self.device = encode_block(config);
        self.writes += 1;
    }

    fn load_layout_config(&mut self) -> LayoutConfig {
        decode_block("layout", self.layout.as_deref())
    }

    fn save_layout_config(&mut self, config: &LayoutConfig) {
        self.layout = encode_block(config);
        self.writes += 1;
    }
}
