mod support;

mod tests {
    use pixel_show::{FireField, RandomSource, SeededRandom};

    use super::support::{FixedRandom, SequenceRandom};

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_spread_moves_a_quarter_upward() {
        let mut field = FireField::new(10, 0);
        field.set_temperature(0, 1.0);

        field.spread(&mut FixedRandom(1.0), 1.0, 0.0, 0, 0.0, &[1.0]);

        assert_close(field.temperature(0), 0.75);
        assert_close(field.temperature(1), 0.25);
        assert_close(field.temperature(2), 0.0);
    }

    #[test]
    fn test_spread_never_takes_more_than_available() {
        let mut field = FireField::new(10, 0);
        field.set_temperature(0, 0.1);

        field.spread(&mut FixedRandom(1.0), 1.0, 0.0, 0, 0.0, &[1.0]);

        assert_close(field.temperature(0), 0.0);
        assert_close(field.temperature(1), 0.1);
    }

    #[test]
    fn test_spread_with_multiple_weights_conserves_energy() {
        let mut field = FireField::new(10, 0);
        field.set_temperature(0, 1.0);
        field.set_temperature(1, 1.0);

        field.spread(&mut FixedRandom(1.0), 1.0, 0.0, 0, 0.0, &[2.0, 1.0]);

        assert_close(field.temperature(0), 0.666_666_7);
        assert_close(field.temperature(1), 1.0);
        assert_close(field.temperature(2), 0.083_333_3);
        assert_close(field.temperature(3), 0.25);
        assert_close(field.total_energy(), 2.0);
    }

    #[test]
    fn test_heat_climbs_one_cell_per_step() {
        let mut field = FireField::new(10, 0);
        field.set_temperature(0, 1.0);

        field.spread(&mut FixedRandom(1.0), 1.0, 0.0, 0, 0.0, &[1.0]);
        assert!((2..10).all(|index| field.temperature(index) == 0.0));

        field.spread(&mut FixedRandom(1.0), 1.0, 0.0, 0, 0.0, &[1.0]);
        assert!(field.temperature(2) > 0.0);
        assert!((3..10).all(|index| field.temperature(index) == 0.0));
    }

    #[test]
    fn test_zero_rate_moves_nothing() {
        let mut field = FireField::new(5, 0);
        field.set_temperature(0, 0.8);

        field.spread(&mut FixedRandom(1.0), 0.0, 0.0, 0, 0.0, &[1.0]);

        assert_close(field.temperature(0), 0.8);
        assert_close(field.total_energy(), 0.8);
    }

    #[test]
    fn test_diffusion_conserves_energy_over_many_steps() {
        let mut field = FireField::new(16, 4);
        for index in 0..6 {
            field.set_temperature(index, 0.9);
        }
        let before = field.total_energy();
        let mut rng = SequenceRandom::new(&[0.3, 0.9, 0.1, 0.7, 0.5]);

        for _ in 0..50 {
            field.spread(&mut rng, 0.7, 0.0, 0, 0.0, &[1.0, 0.6, 0.3]);
            for index in 0..field.len() {
                assert!(field.temperature(index) >= 0.0);
            }
        }

        assert!((field.total_energy() - before).abs() < 1e-3);
    }

    #[test]
    fn test_certain_ignition_adds_spark() {
        let mut field = FireField::new(10, 0);

        field.spread(&mut FixedRandom(1.0), 0.0, 1.0, 1, 0.7, &[1.0]);

        assert_close(field.temperature(0), 0.7);
        assert_close(field.total_energy(), 0.7);
    }

    #[test]
    fn test_ignition_heats_cold_bottom_cells() {
        let mut field = FireField::new(10, 0);

        field.spread(&mut FixedRandom(1.0), 1.0, 1.0, 5, 0.5, &[1.0]);

        for index in 0..5 {
            assert_close(field.temperature(index), 0.5);
        }
        assert_close(field.total_energy(), 2.5);
    }

    #[test]
    fn test_spread_adds_at_most_the_injected_sparks() {
        let mut field = FireField::new(12, 2);
        let mut rng = SeededRandom::new(3);
        for _ in 0..100 {
            let before = field.total_energy();
            field.spread(&mut rng, 1.0, 0.5, 3, 0.3, &[1.0, 0.5, 0.25]);
            assert!(field.total_energy() <= before + 3.0 * 0.3 + 1e-4);
            field.cooldown(0.01);
        }
    }

    #[test]
    fn test_zero_ignition_never_sparks() {
        let mut field = FireField::new(10, 0);

        field.spread(&mut FixedRandom(0.0), 1.0, 0.0, 10, 1.0, &[1.0]);

        assert_close(field.total_energy(), 0.0);
    }

    #[test]
    fn test_sparks_stay_inside_spark_range() {
        let mut field = FireField::new(10, 0);

        field.spread(&mut FixedRandom(0.0), 0.0, 0.5, 3, 0.4, &[1.0]);

        for index in 0..3 {
            assert_close(field.temperature(index), 0.4);
        }
        for index in 3..10 {
            assert_close(field.temperature(index), 0.0);
        }
    }

    #[test]
    fn test_cooldown_floors_at_zero() {
        let mut field = FireField::new(4, 0);
        field.set_temperature(0, 1.5);
        field.set_temperature(1, 0.25);

        field.cooldown(1.0);

        assert_close(field.temperature(0), 0.5);
        assert_close(field.temperature(1), 0.0);
        assert_close(field.temperature(2), 0.0);
    }

    #[test]
    fn test_reservoir_is_hidden_from_colors() {
        let mut field = FireField::new(3, 2);
        assert_eq!(field.len(), 5);
        assert_eq!(field.visible_len(), 3);
        assert_eq!(field.start_offset(), 2);

        field.set_temperature(0, 1.0);
        field.set_temperature(2, 1.0);

        assert_eq!(field.color(0), pixel_show::color::black_body(1.0));
        assert_eq!(field.color(1), pixel_show::color::BLACK);
    }

    #[test]
    fn test_out_of_range_cells_read_cold() {
        let mut field = FireField::new(3, 0);
        field.set_temperature(10, 1.0);
        assert_close(field.temperature(10), 0.0);
        assert_close(field.total_energy(), 0.0);
    }

    #[test]
    fn test_seeded_field_evolution_is_reproducible() {
        let run = || {
            let mut rng = SeededRandom::new(42);
            let mut field = FireField::new(12, 3);
            for _ in 0..30 {
                field.spread(&mut rng, 0.8, 0.4, 3, 0.6, &[1.0, 0.5]);
                let cooling = 0.02 * rng.next_f32();
                field.cooldown(cooling);
            }
            (0..field.len())
                .map(|index| field.temperature(index))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(), run());
    }
}
