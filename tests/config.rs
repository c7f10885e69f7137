mod tests {
    use ambient_strip::driver::{BitTiming, TimingError};
    use ambient_strip::config::DEFAULT_SENSOR_PINS;
    use ambient_strip::{AnimationConfig, ConfigError, Duration, LightConfig};

    #[test]
    fn test_defaults() {
        let config = LightConfig::default();
        assert_eq!(config.led_count, 18);
        assert_eq!(config.data_pin, 29);
        assert_eq!(config.sensor_pins.as_slice(), &DEFAULT_SENSOR_PINS);
        assert_eq!(config.settle, Duration::from_millis(10));
        assert_eq!(config.debounce, Duration::from_millis(100));
        assert_eq!(config.animation, AnimationConfig::DEFAULT);
        assert_eq!(config.validate::<18>(), Ok(()));
    }

    #[test]
    fn test_default_animation() {
        let animation = AnimationConfig::default();
        assert_eq!(animation.ramp_steps, 50);
        assert_eq!(animation.step_interval, Duration::from_millis(10));
        assert_eq!(animation.hold_interval, Duration::from_secs(10));
        assert_eq!(animation.peak_percent, 50);
        assert_eq!(animation.settle_percent, 10);
    }

    #[test]
    fn test_led_count_must_match_buffer() {
        let config = LightConfig::default();
        assert_eq!(
            config.validate::<12>(),
            Err(ConfigError::LedCountMismatch {
                configured: 18,
                capacity: 12
            })
        );

        let config = LightConfig {
            led_count: 0,
            ..LightConfig::default()
        };
        assert_eq!(config.validate::<18>(), Err(ConfigError::EmptyStrip));
    }

    #[test]
    fn test_pin_checks() {
        let mut config = LightConfig::default();
        config.sensor_pins.clear();
        assert_eq!(config.validate::<18>(), Err(ConfigError::NoSensors));

        let mut config = LightConfig::default();
        config.data_pin = 30;
        assert_eq!(config.validate::<18>(), Err(ConfigError::InvalidPin(30)));

        let mut config = LightConfig::default();
        config.sensor_pins[1] = 28;
        assert_eq!(config.validate::<18>(), Err(ConfigError::PinConflict(28)));

        let mut config = LightConfig::default();
        config.data_pin = 27;
        assert_eq!(config.validate::<18>(), Err(ConfigError::PinConflict(27)));
    }

    #[test]
    fn test_single_sensor_is_enough() {
        let mut config = LightConfig::default();
        config.sensor_pins.truncate(1);
        assert_eq!(config.validate::<18>(), Ok(()));
    }

    #[test]
    fn test_timing_checks() {
        let mut config = LightConfig::default();
        config.timing = BitTiming {
            t1: 6,
            ..BitTiming::WS2812
        };
        assert_eq!(
            config.validate::<18>(),
            Err(ConfigError::Timing(TimingError::ZeroHighTooLong))
        );

        let mut config = LightConfig::default();
        config.settle = Duration::from_micros(10);
        config.animation.step_interval = Duration::from_millis(1);
        assert_eq!(config.validate::<18>(), Err(ConfigError::SettleTooShort));

        let mut config = LightConfig::default();
        config.animation.step_interval = Duration::from_millis(5);
        assert_eq!(config.validate::<18>(), Err(ConfigError::StepTooShort));

        let mut config = LightConfig::default();
        config.animation.retry_delay = Duration::from_millis(10);
        assert_eq!(config.validate::<18>(), Err(ConfigError::RetryTooLong));

        let mut config = LightConfig::default();
        config.animation.ramp_steps = 0;
        assert_eq!(config.validate::<18>(), Err(ConfigError::ZeroRampSteps));
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let mut config = LightConfig::default();
        config.animation.poll_interval = Duration::from_ticks(0);
        assert_eq!(config.validate::<18>(), Err(ConfigError::ZeroInterval));

        let mut config = LightConfig::default();
        config.animation.hold_interval = Duration::from_ticks(0);
        assert_eq!(config.validate::<18>(), Err(ConfigError::ZeroInterval));
    }
}
