mod support;

mod tests {
    use pixel_show::command::COMMAND_QUEUE_SIZE;
    use pixel_show::config::LayoutConfig;
    use pixel_show::{
        AnimationId, AnimationSlot, ConfigStore, DeviceConfig, LayoutSettings,
        MemoryConfigStore, PixelSurface, Preset, RenderController, Rgb, ShowConfig, ShowControl,
        ShowError,
    };

    use super::support::{BLACK, MockSurface, ms};

    /// Store that queues another bad Solid every time the show is saved.
    struct RequeueingStore<'a> {
        inner: MemoryConfigStore,
        control: &'a ShowControl,
    }

    impl ConfigStore for RequeueingStore<'_> {
        fn load_show_config(&mut self) -> ShowConfig {
            self.inner.load_show_config()
        }

        fn save_show_config(&mut self, config: &ShowConfig) {
            self.inner.save_show_config(config);
            let _ = self.control.sender().set_animation("Solid", r#"{"r":300}"#);
        }

        fn load_device_config(&mut self) -> DeviceConfig {
            self.inner.load_device_config()
        }

        fn save_device_config(&mut self, config: &DeviceConfig) {
            self.inner.save_device_config(config);
        }

        fn load_layout_config(&mut self) -> LayoutConfig {
            self.inner.load_layout_config()
        }

        fn save_layout_config(&mut self, config: &LayoutConfig) {
            self.inner.save_layout_config(config);
        }
    }

    const LEDS: usize = 20;

    fn start(
        control: &ShowControl,
        store: MemoryConfigStore,
    ) -> RenderController<'_, MockSurface, MemoryConfigStore> {
        RenderController::with_seed(control, MockSurface::new(LEDS), store, 1)
    }

    #[test]
    fn test_empty_store_starts_rainbow_at_default_brightness() {
        let control = ShowControl::new();
        let controller = start(&control, MemoryConfigStore::new());

        assert_eq!(controller.animation_id(), AnimationId::Rainbow);
        assert_eq!(controller.layout().len(), LEDS);
        assert_eq!(controller.layout().surface().brightness, 128);
        assert_eq!(control.brightness(), 128);
        assert_eq!(control.animation_name().as_str(), "Rainbow");
        assert_eq!(controller.frame_index(), 0);
    }

    #[test]
    fn test_stored_configuration_is_restored() {
        let control = ShowControl::new();
        let store = MemoryConfigStore::new()
            .with_show(&ShowConfig::new("Solid", r#"{"r":0,"g":0,"b":255}"#).unwrap())
            .with_device(&DeviceConfig {
                brightness: 40,
                cycle_time_ms: 10,
            })
            .with_layout(&LayoutSettings::new(false, false, 2));
        let controller = start(&control, store);

        assert_eq!(controller.animation_id(), AnimationId::Solid);
        assert_eq!(controller.layout().len(), LEDS - 2);
        assert_eq!(control.brightness(), 40);
        assert_eq!(control.animation_name().as_str(), "Solid");
        assert_eq!(controller.store().writes(), 0);
    }

    #[test]
    fn test_unknown_or_corrupt_stored_animation_starts_rainbow() {
        let control = ShowControl::new();
        let store =
            MemoryConfigStore::new().with_show(&ShowConfig::new("Disco", "{}").unwrap());
        let controller = start(&control, store);
        assert_eq!(controller.animation_id(), AnimationId::Rainbow);
        assert_eq!(controller.show_config(), &ShowConfig::default());

        let control = ShowControl::new();
        let store = MemoryConfigStore::new().with_raw_show(b"{not json");
        let controller = start(&control, store);
        assert_eq!(controller.animation_id(), AnimationId::Rainbow);
    }

    #[test]
    fn test_set_animation_switches_and_persists() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        control.sender().set_animation("Fire", r#"{"cooling":0.1}"#).unwrap();
        let report = controller.process_commands();

        assert_eq!(report.applied, 1);
        assert_eq!(report.rejected, 0);
        assert!(report.errors.is_empty());
        assert_eq!(controller.animation_id(), AnimationId::Fire);
        assert_eq!(control.animation_name().as_str(), "Fire");
        let saved = controller.store().show().unwrap();
        assert_eq!(saved.animation.as_str(), "Fire");
        assert_eq!(saved.params.as_str(), r#"{"cooling":0.1}"#);
    }

    #[test]
    fn test_unknown_animation_is_rejected() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        control.sender().set_animation("Disco", "{}").unwrap();
        let report = controller.process_commands();

        assert_eq!(report.applied, 0);
        assert_eq!(report.rejected, 1);
        assert!(matches!(
            report.errors.as_slice(),
            [ShowError::InvalidAnimationName(name)] if name.as_str() == "Disco"
        ));
        assert_eq!(controller.animation_id(), AnimationId::Rainbow);
        assert_eq!(control.animation_name().as_str(), "Rainbow");
        assert!(matches!(
            control.take_last_error(),
            Some(ShowError::InvalidAnimationName(_))
        ));
        assert_eq!(control.last_error(), None);
        assert!(controller.store().show().is_none());
    }

    #[test]
    fn test_malformed_params_fall_back_to_defaults() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        control.sender().set_animation("Solid", "{\"r\":").unwrap();
        let report = controller.process_commands();

        assert_eq!(report.applied, 1);
        assert_eq!(report.errors.as_slice(), &[ShowError::ParamParseFailure]);
        assert_eq!(controller.animation_id(), AnimationId::Solid);
    }

    #[test]
    fn test_unusable_keys_keep_the_rest_of_the_document() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        control.sender().set_animation("Solid", r#"{"r":300,"g":10}"#).unwrap();
        let report = controller.process_commands();

        assert_eq!(report.applied, 1);
        assert_eq!(report.rejected, 0);
        assert_eq!(report.errors.as_slice(), &[ShowError::ParamParseFailure]);
        let AnimationSlot::Solid(solid) = controller.animation() else {
            panic!("expected Solid");
        };
        assert_eq!(solid.color(), Rgb::new(255, 10, 255));
        let stored = controller.store().show().unwrap();
        assert_eq!(stored.params.as_str(), r#"{"r":300,"g":10}"#);
    }

    #[test]
    fn test_wrong_typed_key_is_reported() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        control.sender().set_animation("Starlight", r#"{"length":"long"}"#).unwrap();
        let report = controller.render_frame(ms(0));

        assert_eq!(report.applied, 1);
        assert_eq!(report.errors.as_slice(), &[ShowError::ParamParseFailure]);
        assert_eq!(controller.animation_id(), AnimationId::Starlight);
    }

    #[test]
    fn test_extreme_params_render_without_panicking() {
        let documents = [
            ("Fire", r#"{"startOffset":18446744073709551615}"#),
            (
                "Starlight",
                r#"{"probability":1.0,"length":18446744073709551615,"fade":18446744073709551615}"#,
            ),
            (
                "MorseCode",
                r#"{"dotLength":4294967295,"dashLength":4294967295,"symbolSpace":4294967295,"letterSpace":4294967295,"wordSpace":4294967295}"#,
            ),
            ("Mandelbrot", r#"{"maxIterations":4294967295}"#),
        ];
        for (name, params) in documents {
            let control = ShowControl::new();
            let mut controller = start(&control, MemoryConfigStore::new());

            control.sender().set_animation(name, params).unwrap();
            let report = controller.render_frame(ms(0));
            controller.render_frame(ms(10));
            controller.render_frame(ms(1_000_000));

            assert_eq!(report.applied, 1, "{name}");
            assert!(report.errors.is_empty(), "{name}");
            assert_eq!(controller.animation_id().name(), name);
            assert_eq!(controller.frame_index(), 3);
        }
    }

    #[test]
    fn test_commands_queued_while_draining_wait_for_the_next_pass() {
        let control = ShowControl::new();
        let store = RequeueingStore {
            inner: MemoryConfigStore::new(),
            control: &control,
        };
        let mut controller =
            RenderController::with_seed(&control, MockSurface::new(LEDS), store, 1);

        control.sender().set_animation("Solid", r#"{"r":300}"#).unwrap();
        let report = controller.process_commands();

        assert_eq!(report.applied, COMMAND_QUEUE_SIZE);
        assert_eq!(report.errors.len(), COMMAND_QUEUE_SIZE);
        assert_eq!(control.pending(), 1);

        let report = controller.process_commands();
        assert_eq!(report.applied, COMMAND_QUEUE_SIZE);
        assert_eq!(control.pending(), 1);
    }

    #[test]
    fn test_brightness_is_published_after_processing() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());
        let sender = control.sender();

        sender.set_brightness(10).unwrap();
        sender.set_brightness(42).unwrap();
        assert_eq!(sender.brightness(), 128);

        let report = controller.process_commands();
        assert_eq!(report.applied, 2);
        assert_eq!(sender.brightness(), 42);
        assert_eq!(controller.layout().surface().brightness, 42);
        assert_eq!(controller.store().device().unwrap().brightness, 42);
    }

    #[test]
    fn test_full_queue_drops_only_the_overflow() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());
        let sender = control.sender();

        for brightness in 1..=5 {
            sender.set_brightness(brightness).unwrap();
        }
        assert_eq!(sender.set_brightness(99), Err(ShowError::ChannelFull));

        let report = controller.process_commands();
        assert_eq!(report.applied, 5);
        assert_eq!(control.brightness(), 5);
        assert_eq!(control.pending(), 0);
    }

    #[test]
    fn test_set_layout_rebuilds_and_restarts() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());
        controller.render_frame(ms(0));

        control
            .sender()
            .set_layout(LayoutSettings::new(true, true, 0))
            .unwrap();
        let report = controller.process_commands();

        assert_eq!(report.applied, 1);
        assert_eq!(controller.layout().len(), LEDS / 2);
        assert_eq!(controller.layout().surface().count(BLACK), LEDS);
        assert_eq!(controller.animation_id(), AnimationId::Rainbow);
        assert_eq!(
            controller.store().layout(),
            Some(LayoutSettings::new(true, true, 0))
        );
    }

    #[test]
    fn test_preset_applies_layout_and_animation_together() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        let preset = Preset::new("flag", "ColorRanges", "{}", LayoutSettings::new(false, false, 4))
            .unwrap();
        control.sender().load_preset(preset).unwrap();
        let report = controller.process_commands();

        assert_eq!(report.applied, 1);
        assert_eq!(controller.animation_id(), AnimationId::ColorRanges);
        assert_eq!(controller.layout().len(), LEDS - 4);
        assert_eq!(control.animation_name().as_str(), "ColorRanges");
    }

    #[test]
    fn test_invalid_preset_changes_nothing() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        let preset =
            Preset::new("bad", "Disco", "{}", LayoutSettings::new(false, true, 0)).unwrap();
        control.sender().load_preset(preset).unwrap();
        let report = controller.process_commands();

        assert_eq!(report.rejected, 1);
        assert_eq!(controller.layout().len(), LEDS);
        assert_eq!(controller.animation_id(), AnimationId::Rainbow);
        assert_eq!(controller.store().writes(), 0);
    }

    #[test]
    fn test_commands_wait_for_the_next_frame() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        controller.execute(ms(0));
        control.sender().set_animation("Jump", "").unwrap();
        controller.execute(ms(10));
        assert_eq!(controller.animation_id(), AnimationId::Rainbow);

        controller.render_frame(ms(20));
        assert_eq!(controller.animation_id(), AnimationId::Jump);
    }

    #[test]
    fn test_execute_draws_and_flush_pushes() {
        let control = ShowControl::new();
        let mut controller = start(&control, MemoryConfigStore::new());

        controller.execute(ms(0));
        assert_eq!(controller.layout().surface().flushes, 0);
        assert_ne!(controller.layout().surface().count(BLACK), LEDS);
        assert_eq!(controller.frame_index(), 1);

        controller.flush();
        controller.render_frame(ms(10));
        assert_eq!(controller.layout().surface().flushes, 2);
        assert_eq!(controller.frame_index(), 2);
    }

    #[test]
    fn test_same_seed_renders_the_same_show() {
        let frames = || {
            let control = ShowControl::new();
            let store = MemoryConfigStore::new()
                .with_show(&ShowConfig::new("Starlight", r#"{"probability":0.5}"#).unwrap());
            let mut controller = start(&control, store);
            let rendered: Vec<_> = (0..60)
                .map(|index| {
                    controller.render_frame(ms(index * 10));
                    controller.layout().surface().pixels.clone()
                })
                .collect();
            rendered
        };
        assert_eq!(frames(), frames());
    }
}
