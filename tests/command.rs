mod tests {
    use pixel_show::channel::{Channel, TryReceiveError, TrySendError};
    use pixel_show::command::{PARAMS_CAPACITY, bounded};
    use pixel_show::config::{decode_block, encode_block};
    use pixel_show::{
        COMMAND_QUEUE_SIZE, DeviceConfig, LayoutSettings, Preset, ShowCommand, ShowConfig,
        ShowControl, ShowError,
    };

    #[test]
    fn test_channel_is_fifo_and_bounded() {
        let channel: Channel<u8, 3> = Channel::new();
        assert!(channel.is_empty());
        assert_eq!(channel.capacity(), 3);

        for value in 1..=3 {
            assert_eq!(channel.try_send(value), Ok(()));
        }
        assert_eq!(channel.try_send(4), Err(TrySendError(4)));
        assert_eq!(channel.len(), 3);

        assert_eq!(channel.try_receive(), Ok(1));
        assert_eq!(channel.try_receive(), Ok(2));
        channel.clear();
        assert_eq!(channel.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_full_queue_reports_channel_full() {
        let control = ShowControl::new();
        let sender = control.sender();
        for brightness in 0..COMMAND_QUEUE_SIZE {
            assert_eq!(sender.set_brightness(brightness as u8), Ok(()));
        }
        assert_eq!(sender.set_brightness(200), Err(ShowError::ChannelFull));
        assert_eq!(control.pending(), COMMAND_QUEUE_SIZE);
    }

    #[test]
    fn test_oversized_fields_are_refused() {
        let params = "x".repeat(PARAMS_CAPACITY + 1);
        assert_eq!(
            ShowCommand::set_animation("Solid", &params),
            Err(ShowError::TooLong {
                field: "params",
                max: PARAMS_CAPACITY
            })
        );

        let control = ShowControl::new();
        let name = "N".repeat(40);
        assert!(matches!(
            control.sender().set_animation(&name, "{}"),
            Err(ShowError::TooLong { .. })
        ));
        assert_eq!(control.pending(), 0);

        let fits: heapless::String<4> = bounded("short", "abcd").unwrap();
        assert_eq!(fits.as_str(), "abcd");
    }

    #[test]
    fn test_preset_json_uses_camel_case() {
        let preset: Preset = serde_json::from_str(
            r#"{"name":"evening","animation":"Fire","params":"{}","layout":{"mirror":true,"deadPixels":2}}"#,
        )
        .unwrap();
        assert_eq!(
            preset,
            Preset::new("evening", "Fire", "{}", LayoutSettings::new(false, true, 2)).unwrap()
        );
    }

    #[test]
    fn test_control_starts_empty() {
        let control = ShowControl::default();
        assert_eq!(control.brightness(), 0);
        assert!(control.animation_name().is_empty());
        assert_eq!(control.last_error(), None);
        assert_eq!(control.take_last_error(), None);
        assert_eq!(control.stats(), pixel_show::ShowStats::ZERO);
    }

    #[test]
    fn test_config_blocks_round_trip_through_json() {
        let show = ShowConfig::new("Wave", r#"{"wavelength":3}"#).unwrap();
        let bytes = encode_block(&show).unwrap();
        assert_eq!(decode_block::<ShowConfig>("show", Some(&bytes)), show);

        let device = DeviceConfig {
            brightness: 7,
            cycle_time_ms: 16,
        };
        let bytes = encode_block(&device).unwrap();
        assert_eq!(decode_block::<DeviceConfig>("device", Some(&bytes)), device);
    }

    #[test]
    fn test_config_blocks_fall_back_to_defaults() {
        assert_eq!(
            decode_block::<ShowConfig>("show", None),
            ShowConfig::default()
        );
        assert_eq!(
            decode_block::<DeviceConfig>("device", Some(b"\xFF\x00garbage")),
            DeviceConfig::default()
        );
        let partial: DeviceConfig = decode_block("device", Some(br#"{"brightness":9}"#));
        assert_eq!(partial.brightness, 9);
        assert_eq!(partial.cycle_time_ms, 10);
        assert_eq!(ShowConfig::default().animation.as_str(), "Rainbow");
        assert_eq!(DeviceConfig::default().brightness, 128);
    }
}
