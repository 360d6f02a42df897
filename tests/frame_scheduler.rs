mod support;

mod tests {
    use pixel_show::frame_scheduler::{DEFAULT_CYCLE_TIME, POWER_SAVE_CYCLE_TIME};
    use pixel_show::{
        DeviceConfig, Duration, FrameScheduler, MemoryConfigStore, RenderController,
        SchedulerConfig, ShowConfig, ShowControl, ShowStats,
    };

    use super::support::{MockSurface, SteppingClock, ms};

    fn store_with(animation: &str) -> MemoryConfigStore {
        MemoryConfigStore::new().with_show(&ShowConfig::new(animation, "{}").unwrap())
    }

    #[test]
    fn test_sleep_fills_the_rest_of_the_cycle() {
        let control = ShowControl::new();
        let clock = SteppingClock::new(0, 1);
        let controller = RenderController::new(&control, MockSurface::new(8), store_with("Rainbow"));
        let mut scheduler = FrameScheduler::new(controller, &clock);

        let result = scheduler.tick();

        // one millisecond each for drawing and flushing
        assert_eq!(result.sleep_duration, Duration::from_millis(8));
        assert_eq!(result.next_deadline, ms(12));
        assert!(!result.power_save);
        assert_eq!(scheduler.controller().layout().surface().flushes, 1);
        assert_eq!(scheduler.controller().frame_index(), 1);
    }

    #[test]
    fn test_overrun_frame_does_not_sleep() {
        let control = ShowControl::new();
        let clock = SteppingClock::new(0, 20);
        let controller = RenderController::new(&control, MockSurface::new(8), store_with("Rainbow"));
        let mut scheduler = FrameScheduler::new(controller, &clock);

        let result = scheduler.tick();

        assert_eq!(result.sleep_duration, Duration::from_ticks(0));
        assert_eq!(result.next_deadline, ms(80));
    }

    #[test]
    fn test_settled_animation_enters_power_save() {
        let control = ShowControl::new();
        let clock = SteppingClock::new(0, 1);
        let controller = RenderController::new(&control, MockSurface::new(8), store_with("Solid"));
        let mut scheduler = FrameScheduler::new(controller, &clock);

        assert!(!scheduler.tick().power_save);

        clock.advance(Duration::from_millis(5_000));
        let result = scheduler.tick();
        assert!(result.power_save);
        assert!(scheduler.is_power_save());
        assert_eq!(
            result.sleep_duration,
            POWER_SAVE_CYCLE_TIME - Duration::from_millis(2)
        );

        control.sender().set_animation("Rainbow", "").unwrap();
        let result = scheduler.tick();
        assert_eq!(result.commands.applied, 1);
        assert!(!result.power_save);
        assert_eq!(
            result.sleep_duration,
            DEFAULT_CYCLE_TIME - Duration::from_millis(2)
        );
    }

    #[test]
    fn test_stats_are_published_once_per_interval() {
        let control = ShowControl::new();
        let clock = SteppingClock::new(0, 1);
        let controller = RenderController::new(&control, MockSurface::new(8), store_with("Rainbow"));
        let mut scheduler = FrameScheduler::new(controller, &clock);

        scheduler.tick();
        assert_eq!(control.stats(), ShowStats::ZERO);

        clock.advance(Duration::from_millis(1_000));
        scheduler.tick();

        let stats = control.sender().stats();
        assert!((stats.last_execution_ms - 1.0).abs() < 1e-3);
        assert!((stats.last_flush_ms - 1.0).abs() < 1e-3);
        assert!((stats.avg_execution_ms - 1.0).abs() < 1e-3);
        assert!((stats.avg_flush_ms - 1.0).abs() < 1e-3);
        assert!((stats.avg_cycle_ms - 1_004.0).abs() < 1e-3);
    }

    #[test]
    fn test_config_follows_device_cycle_time() {
        let device = DeviceConfig {
            brightness: 10,
            cycle_time_ms: 20,
        };
        let config = SchedulerConfig::from(&device);
        assert_eq!(config.cycle_time, Duration::from_millis(20));
        assert_eq!(config.power_save_cycle_time, POWER_SAVE_CYCLE_TIME);

        let control = ShowControl::new();
        let clock = SteppingClock::new(0, 0);
        let controller = RenderController::new(&control, MockSurface::new(4), store_with("Rainbow"));
        let mut scheduler = FrameScheduler::with_config(controller, &clock, config);

        assert_eq!(scheduler.config(), config);
        assert_eq!(scheduler.tick().sleep_duration, Duration::from_millis(20));
        scheduler.controller_mut().flush();
        assert_eq!(scheduler.controller().layout().surface().flushes, 2);
    }
}
