#![no_std]

extern crate alloc;

mod log;

pub mod animation;
pub mod channel;
pub mod color;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod fire;
pub mod frame_scheduler;
pub mod layout;
pub mod math8;
pub mod palette;
pub mod random;
pub mod surface;
pub mod transition;

pub use animation::{Animation, AnimationId, AnimationSlot, Frame};
pub use command::{
    AnimationName, COMMAND_QUEUE_SIZE, ParamsText, Preset, ShowCommand, ShowControl, ShowSender,
};
pub use config::{ConfigStore, DeviceConfig, LayoutConfig, MemoryConfigStore, ShowConfig};
pub use controller::{CommandReport, RenderController};
pub use error::ShowError;
pub use fire::FireField;
pub use frame_scheduler::{
    Clock, FrameResult, FrameScheduler, SchedulerConfig, ShowStats, SystemClock,
};
pub use layout::{Layout, LayoutSettings};
pub use palette::{ColorPoint, Interpolation, Palette};
pub use random::{RandomSource, SeededRandom};
pub use surface::{OutputDriver, PixelSurface, SmartLedsOutput, Strip};
pub use transition::ColorTransition;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};
