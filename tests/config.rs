mod tests {
    use myrtio_opc_composer::config::{DEFAULT_MAX_PANELS, DEFAULT_OPC_PORT, DEFAULT_SPI_CLOCK_HZ};
    use myrtio_opc_composer::output::DeviceAddress;
    use myrtio_opc_composer::{Config, Pattern, Transport};

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.opc_port, DEFAULT_OPC_PORT);
        assert_eq!(config.max_panels, DEFAULT_MAX_PANELS);
        assert_eq!(config.transport, Transport::Tcp);
        assert_eq!(config.pattern, Pattern::None);
        assert_eq!(config.frame_rate, None);
        assert_eq!(config.devices.len(), 4);
        assert_eq!(config.spi_clock_hz, 500_000);
    }

    #[test]
    fn test_spi_clock() {
        let config: Config = toml::from_str("opc_port = 7890").unwrap();
        assert_eq!(config.spi_clock_hz, DEFAULT_SPI_CLOCK_HZ);

        let config: Config = toml::from_str("spi_clock_hz = 1000000").unwrap();
        assert_eq!(config.spi_clock_hz, 1_000_000);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse() {
        let config: Config = toml::from_str(
            r#"
            opc_port = 7890
            max_panels = 2
            brightness = 0.5
            transport = "udp"
            frame_rate = 60
            pattern = "rainbow_flow"

            [[devices]]
            bus = 0
            device = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.opc_port, 7890);
        assert_eq!(config.max_panels, 2);
        assert_eq!(config.brightness, 0.5);
        assert_eq!(config.transport, Transport::Udp);
        assert_eq!(config.frame_rate, Some(60));
        assert_eq!(config.pattern, Pattern::RainbowFlow);
        assert_eq!(config.devices, vec![DeviceAddress::new(0, 1)]);
        assert_eq!(
            config.devices[0].spidev_path().to_str(),
            Some("/dev/spidev0.1")
        );
    }

    #[test]
    fn test_unknown_transport_is_rejected() {
        assert!(toml::from_str::<Config>(r#"transport = "serial""#).is_err());
    }
}
