//! Frame pacing and timing statistics.
//!
//! [`FrameScheduler::tick`] renders one frame and says how long to wait
//! before the next; the caller sleeps however its platform does. With an
//! embassy time driver, [`FrameScheduler::run`] does the waiting itself.

use embassy_time::{Duration, Instant, Timer};

use crate::config::{ConfigStore, DeviceConfig};
use crate::controller::{CommandReport, RenderController};
use crate::log::show_log;
use crate::surface::PixelSurface;

/// Default frame period while animating.
pub const DEFAULT_CYCLE_TIME: Duration = Duration::from_millis(10);

/// Frame period once the animation has settled.
pub const POWER_SAVE_CYCLE_TIME: Duration = Duration::from_millis(250);

/// How often averaged timings are published.
pub const STATS_INTERVAL: Duration = Duration::from_millis(1000);

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

impl<K: Clock + ?Sized> Clock for &K {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// [`Clock`] backed by the embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub cycle_time: Duration,
    pub power_save_cycle_time: Duration,
    pub stats_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cycle_time: DEFAULT_CYCLE_TIME,
            power_save_cycle_time: POWER_SAVE_CYCLE_TIME,
            stats_interval: STATS_INTERVAL,
        }
    }
}

impl From<&DeviceConfig> for SchedulerConfig {
    fn from(device: &DeviceConfig) -> Self {
        Self {
            cycle_time: Duration::from_millis(device.cycle_time_ms),
            ..Self::default()
        }
    }
}

/// Frame timings in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShowStats {
    pub last_execution_ms: f32,
    pub last_flush_ms: f32,
    pub avg_execution_ms: f32,
    pub avg_flush_ms: f32,
    /// Average time between frame starts
    pub avg_cycle_ms: f32,
}

impl ShowStats {
    pub const ZERO: Self = Self {
        last_execution_ms: 0.0,
        last_flush_ms: 0.0,
        avg_execution_ms: 0.0,
        avg_flush_ms: 0.0,
        avg_cycle_ms: 0.0,
    };
}

/// Result of a frame tick operation.
#[derive(Debug, Clone)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (zero if the frame overran).
    pub sleep_duration: Duration,
    /// Whether the slower settled-animation cadence is in effect.
    pub power_save: bool,
    /// Commands applied before this frame.
    pub commands: CommandReport,
}

#[derive(Debug, Clone, Copy)]
struct StatsWindow {
    started: Instant,
    frames: u32,
    cycles: u32,
    execution_us: u64,
    flush_us: u64,
    cycle_us: u64,
}

impl StatsWindow {
    const fn new(started: Instant) -> Self {
        Self {
            started,
            frames: 0,
            cycles: 0,
            execution_us: 0,
            flush_us: 0,
            cycle_us: 0,
        }
    }
}

fn as_ms(duration: Duration) -> f32 {
    duration.as_micros() as f32 / 1000.0
}

fn average_ms(total_us: u64, count: u32) -> f32 {
    if count == 0 {
        return 0.0;
    }
    total_us as f32 / count as f32 / 1000.0
}

/// Drives a [`RenderController`] at a steady frame rate.
///
/// The sleep after each frame is the cycle time minus the time spent drawing
/// and flushing, never negative. While the animation reports it is complete
/// the cycle stretches to the power-save period.
pub struct FrameScheduler<'a, S: PixelSurface, C: ConfigStore, K: Clock> {
    controller: RenderController<'a, S, C>,
    clock: K,
    config: SchedulerConfig,
    power_save: bool,
    last_start: Option<Instant>,
    window: StatsWindow,
}

impl<'a, S: PixelSurface, C: ConfigStore, K: Clock> FrameScheduler<'a, S, C, K> {
    pub fn new(controller: RenderController<'a, S, C>, clock: K) -> Self {
        Self::with_config(controller, clock, SchedulerConfig::default())
    }

    pub fn with_config(controller: RenderController<'a, S, C>, clock: K, config: SchedulerConfig) -> Self {
        let started = clock.now();
        Self {
            controller,
            clock,
            config,
            power_save: false,
            last_start: None,
            window: StatsWindow::new(started),
        }
    }

    pub const fn controller(&self) -> &RenderController<'a, S, C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RenderController<'a, S, C> {
        &mut self.controller
    }

    pub const fn config(&self) -> SchedulerConfig {
        self.config
    }

    pub const fn is_power_save(&self) -> bool {
        self.power_save
    }

    /// Process commands, render and flush one frame.
    pub fn tick(&mut self) -> FrameResult {
        let cycle_start = self.clock.now();
        let commands = self.controller.process_commands();

        let execute_start = self.clock.now();
        self.controller.execute(execute_start);
        let execute_end = self.clock.now();
        self.controller.flush();
        let flush_end = self.clock.now();

        let execution = execute_end.saturating_duration_since(execute_start);
        let flush = flush_end.saturating_duration_since(execute_end);

        self.update_power_save();
        self.record(cycle_start, execution, flush, flush_end);

        let cycle = if self.power_save {
            self.config.power_save_cycle_time
        } else {
            self.config.cycle_time
        };
        let sleep_duration = cycle
            .checked_sub(execution + flush)
            .unwrap_or(Duration::from_ticks(0));

        FrameResult {
            next_deadline: flush_end + sleep_duration,
            sleep_duration,
            power_save: self.power_save,
            commands,
        }
    }

    /// Render forever, sleeping on the embassy timer between frames.
    pub async fn run(&mut self) -> ! {
        loop {
            let result = self.tick();
            Timer::after(result.sleep_duration).await;
        }
    }

    fn update_power_save(&mut self) {
        let complete = self.controller.is_complete();
        if complete == self.power_save {
            return;
        }
        self.power_save = complete;
        if complete {
            show_log!("[show] animation settled, entering power save");
        } else {
            show_log!("[show] leaving power save");
        }
    }

    fn record(&mut self, cycle_start: Instant, execution: Duration, flush: Duration, now: Instant) {
        let window = &mut self.window;
        window.frames += 1;
        window.execution_us += execution.as_micros();
        window.flush_us += flush.as_micros();
        if let Some(previous) = self.last_start.replace(cycle_start) {
            window.cycles += 1;
            window.cycle_us += cycle_start.saturating_duration_since(previous).as_micros();
        }

        if now.saturating_duration_since(window.started) < self.config.stats_interval {
            return;
        }

        let stats = ShowStats {
            last_execution_ms: as_ms(execution),
            last_flush_ms: as_ms(flush),
            avg_execution_ms: average_ms(window.execution_us, window.frames),
            avg_flush_ms: average_ms(window.flush_us, window.frames),
            avg_cycle_ms: average_ms(window.cycle_us, window.cycles),
        };
        self.controller.control().publish_stats(stats);
        self.window = StatsWindow::new(now);
    }
}
