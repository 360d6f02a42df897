use embassy_time::Instant;

use crate::animation::{Animation, AnimationId, AnimationSlot, Frame};
use crate::command::{COMMAND_QUEUE_SIZE, Preset, ShowCommand, ShowControl};
use crate::config::{ConfigStore, DeviceConfig, ShowConfig};
use crate::error::ShowError;
use crate::layout::{Layout, LayoutSettings};
use crate::log::show_log;
use crate::random::{DEFAULT_SEED, SeededRandom};
use crate::surface::PixelSurface;

/// Outcome of one [`RenderController::process_commands`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandReport {
    /// Commands that changed the show
    pub applied: usize,
    /// Commands refused, state untouched
    pub rejected: usize,
    /// Problems in the order they happened: rejections as well as
    /// parameter documents that fell back to defaults. A pass takes at most
    /// one problem per command, so nothing is lost
    pub errors: heapless::Vec<ShowError, COMMAND_QUEUE_SIZE>,
}

impl CommandReport {
    fn note(&mut self, error: ShowError) {
        let _ = self.errors.push(error);
    }
}

/// Owner of everything the render context touches.
///
/// Holds the running animation, the layout over the physical surface and the
/// config store. Commands queued on the [`ShowControl`] are applied between
/// frames, never while a frame is being drawn.
pub struct RenderController<'a, S: PixelSurface, C: ConfigStore> {
    control: &'a ShowControl,
    layout: Layout<S>,
    animation: AnimationSlot,
    show: ShowConfig,
    device: DeviceConfig,
    store: C,
    frame_index: u64,
    seeds: SeededRandom,
}

impl<'a, S: PixelSurface, C: ConfigStore> RenderController<'a, S, C> {
    /// Restore the show from `store` onto `surface`.
    pub fn new(control: &'a ShowControl, surface: S, store: C) -> Self {
        Self::with_seed(control, surface, store, DEFAULT_SEED)
    }

    /// Like [`RenderController::new`], seeding the randomized animations from
    /// `seed`.
    pub fn with_seed(control: &'a ShowControl, mut surface: S, mut store: C, seed: u64) -> Self {
        let device = store.load_device_config();
        let layout_settings = store.load_layout_config();
        let mut show = store.load_show_config();
        let mut seeds = SeededRandom::new(seed);

        let animation = match AnimationId::parse(&show.animation) {
            Some(id) => id.create(&show.params, seeds.next_seed()),
            None => {
                show_log!(
                    "[show] stored animation `{}` unknown, starting Rainbow",
                    show.animation.as_str()
                );
                show = ShowConfig::default();
                AnimationId::Rainbow.defaults(seeds.next_seed())
            }
        };

        surface.set_brightness(device.brightness);
        control.store_brightness(device.brightness);
        control.store_animation_name(&show.animation);

        Self {
            control,
            layout: Layout::new(surface, layout_settings),
            animation,
            show,
            device,
            store,
            frame_index: 0,
            seeds,
        }
    }

    pub const fn control(&self) -> &'a ShowControl {
        self.control
    }

    pub const fn layout(&self) -> &Layout<S> {
        &self.layout
    }

    pub const fn animation(&self) -> &AnimationSlot {
        &self.animation
    }

    pub const fn animation_id(&self) -> AnimationId {
        self.animation.id()
    }

    /// Name and parameters of the running animation.
    pub const fn show_config(&self) -> &ShowConfig {
        &self.show
    }

    pub const fn store(&self) -> &C {
        &self.store
    }

    /// Frames executed so far.
    pub const fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Whether the running animation has settled.
    pub fn is_complete(&self) -> bool {
        self.animation.is_complete()
    }

    /// Apply queued commands, oldest first.
    ///
    /// At most [`COMMAND_QUEUE_SIZE`] commands are taken per pass; anything
    /// queued while the pass runs waits for the next frame.
    pub fn process_commands(&mut self) -> CommandReport {
        let mut report = CommandReport::default();
        for _ in 0..COMMAND_QUEUE_SIZE {
            let Some(command) = self.control.try_receive() else {
                break;
            };
            match self.apply(command, &mut report) {
                Ok(()) => report.applied += 1,
                Err(error) => {
                    show_log!("[show] command rejected: {}", error);
                    self.control.record_error(error.clone());
                    report.rejected += 1;
                    report.note(error);
                }
            }
        }
        report
    }

    /// Draw the next frame into the layout without pushing it out.
    pub fn execute(&mut self, now: Instant) {
        let frame = Frame::new(self.frame_index, now);
        self.animation.execute(&mut self.layout, frame);
        self.frame_index = self.frame_index.wrapping_add(1);
    }

    /// Push the current frame to the physical surface.
    pub fn flush(&mut self) {
        self.layout.flush();
    }

    /// Process commands, draw and flush one frame.
    pub fn render_frame(&mut self, now: Instant) -> CommandReport {
        let report = self.process_commands();
        self.execute(now);
        self.flush();
        report
    }

    fn apply(&mut self, command: ShowCommand, report: &mut CommandReport) -> Result<(), ShowError> {
        match command {
            ShowCommand::SetAnimation { name, params } => {
                let id = AnimationId::parse(&name)
                    .ok_or_else(|| ShowError::InvalidAnimationName(name.clone()))?;
                self.animation = self.build(id, &params, report);
                self.show = ShowConfig {
                    animation: name,
                    params,
                };
                self.control.store_animation_name(&self.show.animation);
                self.store.save_show_config(&self.show);
                show_log!("[show] animation -> {}", id.name());
            }
            ShowCommand::SetBrightness(brightness) => {
                self.layout.set_brightness(brightness);
                self.control.store_brightness(brightness);
                self.device.brightness = brightness;
                self.store.save_device_config(&self.device);
            }
            ShowCommand::SetLayout(settings) => {
                self.apply_layout(settings);
                self.restart_animation(report);
            }
            ShowCommand::LoadPreset(preset) => self.load_preset(preset, report)?,
        }
        Ok(())
    }

    /// Validate first, then commit the layout and animation together.
    fn load_preset(&mut self, preset: Preset, report: &mut CommandReport) -> Result<(), ShowError> {
        let id = AnimationId::parse(&preset.animation)
            .ok_or_else(|| ShowError::InvalidAnimationName(preset.animation.clone()))?;
        self.apply_layout(preset.layout);
        self.animation = self.build(id, &preset.params, report);
        self.show = ShowConfig {
            animation: preset.animation,
            params: preset.params,
        };
        self.control.store_animation_name(&self.show.animation);
        self.store.save_show_config(&self.show);
        show_log!("[show] preset `{}` loaded", preset.name.as_str());
        Ok(())
    }

    fn apply_layout(&mut self, settings: LayoutSettings) {
        self.layout.rebuild(settings);
        self.store.save_layout_config(&settings);
    }

    /// Start the current animation over with fresh state.
    fn restart_animation(&mut self, report: &mut CommandReport) {
        let id = AnimationId::parse(&self.show.animation).unwrap_or(AnimationId::Rainbow);
        let params = self.show.params.clone();
        self.animation = self.build(id, &params, report);
    }

    fn build(&mut self, id: AnimationId, params: &str, report: &mut CommandReport) -> AnimationSlot {
        let (animation, warning) = id.create_reporting(params, self.seeds.next_seed());
        if let Some(warning) = warning {
            report.note(warning);
        }
        animation
    }
}
