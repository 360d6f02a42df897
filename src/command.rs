//! Commands crossing from producer contexts into the render context.
//!
//! [`ShowControl`] is the shared half: it can live in a `static` and be read
//! from any task or interrupt. Producers hold a [`ShowSender`]; only the
//! render context drains the queue.

use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicU8, Ordering};

use critical_section::Mutex;
use serde::{Deserialize, Serialize};

use crate::channel::Channel;
use crate::error::ShowError;
use crate::frame_scheduler::ShowStats;
use crate::layout::LayoutSettings;

/// Commands that can be queued before the render context drains them.
pub const COMMAND_QUEUE_SIZE: usize = 5;

/// Longest animation or preset name, in bytes.
pub const NAME_CAPACITY: usize = 32;

/// Longest parameter document, in bytes.
pub const PARAMS_CAPACITY: usize = 256;

pub type AnimationName = heapless::String<NAME_CAPACITY>;
pub type ParamsText = heapless::String<PARAMS_CAPACITY>;
pub type CommandChannel = Channel<ShowCommand, COMMAND_QUEUE_SIZE>;

/// Copy `value` into a bounded string, or report which field overflowed.
pub fn bounded<const N: usize>(
    field: &'static str,
    value: &str,
) -> Result<heapless::String<N>, ShowError> {
    let mut text = heapless::String::new();
    text.push_str(value)
        .map_err(|()| ShowError::TooLong { field, max: N })?;
    Ok(text)
}

/// Animation, parameters and layout applied as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub name: AnimationName,
    pub animation: AnimationName,
    pub params: ParamsText,
    pub layout: LayoutSettings,
}

impl Preset {
    pub fn new(
        name: &str,
        animation: &str,
        params: &str,
        layout: LayoutSettings,
    ) -> Result<Self, ShowError> {
        Ok(Self {
            name: bounded("preset name", name)?,
            animation: bounded("animation name", animation)?,
            params: bounded("params", params)?,
            layout,
        })
    }
}

/// A requested change to the running show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowCommand {
    /// Replace the running animation. `params` is a JSON object.
    SetAnimation {
        name: AnimationName,
        params: ParamsText,
    },
    SetBrightness(u8),
    SetLayout(LayoutSettings),
    LoadPreset(Preset),
}

impl ShowCommand {
    pub fn set_animation(name: &str, params: &str) -> Result<Self, ShowError> {
        Ok(Self::SetAnimation {
            name: bounded("animation name", name)?,
            params: bounded("params", params)?,
        })
    }
}

/// State shared between the render context and everyone else.
pub struct ShowControl {
    commands: CommandChannel,
    brightness: AtomicU8,
    animation: Mutex<RefCell<AnimationName>>,
    last_error: Mutex<RefCell<Option<ShowError>>>,
    stats: Mutex<Cell<ShowStats>>,
}

impl ShowControl {
    pub const fn new() -> Self {
        Self {
            commands: Channel::new(),
            brightness: AtomicU8::new(0),
            animation: Mutex::new(RefCell::new(heapless::String::new())),
            last_error: Mutex::new(RefCell::new(None)),
            stats: Mutex::new(Cell::new(ShowStats::ZERO)),
        }
    }

    /// Get a producer handle.
    pub const fn sender(&self) -> ShowSender<'_> {
        ShowSender { control: self }
    }

    /// Brightness currently applied by the render context.
    pub fn brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    /// Name of the running animation.
    pub fn animation_name(&self) -> AnimationName {
        critical_section::with(|cs| self.animation.borrow(cs).borrow().clone())
    }

    /// Most recent rejected command, if any.
    pub fn last_error(&self) -> Option<ShowError> {
        critical_section::with(|cs| self.last_error.borrow(cs).borrow().clone())
    }

    /// Like [`ShowControl::last_error`] but clears it.
    pub fn take_last_error(&self) -> Option<ShowError> {
        critical_section::with(|cs| self.last_error.borrow(cs).borrow_mut().take())
    }

    /// Latest published frame timing.
    pub fn stats(&self) -> ShowStats {
        critical_section::with(|cs| self.stats.borrow(cs).get())
    }

    /// Commands waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.commands.len()
    }

    pub(crate) fn try_receive(&self) -> Option<ShowCommand> {
        self.commands.try_receive().ok()
    }

    pub(crate) fn store_brightness(&self, brightness: u8) {
        self.brightness.store(brightness, Ordering::Relaxed);
    }

    pub(crate) fn store_animation_name(&self, name: &AnimationName) {
        critical_section::with(|cs| self.animation.borrow(cs).borrow_mut().clone_from(name));
    }

    pub(crate) fn record_error(&self, error: ShowError) {
        critical_section::with(|cs| *self.last_error.borrow(cs).borrow_mut() = Some(error));
    }

    pub(crate) fn publish_stats(&self, stats: ShowStats) {
        critical_section::with(|cs| self.stats.borrow(cs).set(stats));
    }
}

impl Default for ShowControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle for a [`ShowControl`].
///
/// Submission never blocks. A full queue drops the command and reports
/// [`ShowError::ChannelFull`]; retrying is up to the caller.
#[derive(Clone, Copy)]
pub struct ShowSender<'a> {
    control: &'a ShowControl,
}

impl ShowSender<'_> {
    pub fn submit(&self, command: ShowCommand) -> Result<(), ShowError> {
        self.control.commands.try_send(command)?;
        Ok(())
    }

    pub fn set_animation(&self, name: &str, params: &str) -> Result<(), ShowError> {
        self.submit(ShowCommand::set_animation(name, params)?)
    }

    pub fn set_brightness(&self, brightness: u8) -> Result<(), ShowError> {
        self.submit(ShowCommand::SetBrightness(brightness))
    }

    pub fn set_layout(&self, settings: LayoutSettings) -> Result<(), ShowError> {
        self.submit(ShowCommand::SetLayout(settings))
    }

    pub fn load_preset(&self, preset: Preset) -> Result<(), ShowError> {
        self.submit(ShowCommand::LoadPreset(preset))
    }

    pub fn brightness(&self) -> u8 {
        self.control.brightness()
    }

    pub fn animation_name(&self) -> AnimationName {
        self.control.animation_name()
    }

    pub fn last_error(&self) -> Option<ShowError> {
        self.control.last_error()
    }

    pub fn stats(&self) -> ShowStats {
        self.control.stats()
    }
}
