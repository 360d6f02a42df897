mod support;

mod tests {
    use pixel_show::{PixelSurface, Rgb, ShowError, SmartLedsOutput, Strip};
    use smart_leds::SmartLedsWrite;

    use super::support::{BLACK, RED, RecordingDriver, WHITE};

    #[derive(Default)]
    struct CollectingWriter {
        written: Vec<Rgb>,
    }

    impl SmartLedsWrite for CollectingWriter {
        type Error = ();
        type Color = Rgb;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            self.written = iterator.into_iter().map(Into::into).collect();
            Ok(())
        }
    }

    fn paint<S: PixelSurface>(mut surface: S, color: Rgb) {
        surface.fill(color);
    }

    #[test]
    fn test_strip_flush_applies_brightness() {
        let mut strip: Strip<RecordingDriver, 4> = Strip::new(RecordingDriver::default());
        assert_eq!(strip.brightness(), 255);

        strip.set_pixel(0, WHITE);
        strip.set_brightness(128);
        strip.flush();

        let frame = &strip.driver().frames[0];
        assert_eq!(frame.len(), 4);
        assert_eq!(frame[0], Rgb::new(128, 128, 128));
        assert_eq!(frame[1], BLACK);
        assert_eq!(strip.pixels()[0], WHITE);
        assert_eq!(strip.pixel(0), WHITE);
    }

    #[test]
    fn test_strip_only_writes_on_flush() {
        let mut strip: Strip<RecordingDriver, 3> = Strip::new(RecordingDriver::default());
        strip.fill(RED);
        assert!(strip.driver().frames.is_empty());

        strip.flush();
        strip.flush();
        assert_eq!(strip.driver().frames.len(), 2);
        assert_eq!(strip.driver().frames[1], vec![RED; 3]);

        strip.driver_mut().frames.clear();
        assert!(strip.driver().frames.is_empty());
    }

    #[test]
    fn test_strip_ignores_out_of_range() {
        let mut strip: Strip<RecordingDriver, 2> = Strip::new(RecordingDriver::default());
        strip.set_pixel(5, RED);
        assert_eq!(strip.pixel(5), BLACK);
        assert_eq!(strip.snapshot(), vec![BLACK, BLACK]);
        assert_eq!(
            strip.try_set_pixel(2, RED),
            Err(ShowError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(!strip.is_empty());
    }

    #[test]
    fn test_surfaces_can_be_borrowed() {
        let mut strip: Strip<RecordingDriver, 2> = Strip::new(RecordingDriver::default());
        paint(&mut strip, RED);
        assert_eq!(strip.pixels(), &[RED, RED]);
    }

    #[test]
    fn test_smart_leds_adapter_forwards_frames() {
        let mut strip: Strip<SmartLedsOutput<CollectingWriter>, 2> =
            Strip::new(SmartLedsOutput(CollectingWriter::default()));
        strip.fill(WHITE);
        strip.set_brightness(0);
        strip.flush();
        assert_eq!(strip.driver().0.written, vec![BLACK, BLACK]);
    }
}
