mod tests {
    use myrtio_opc_composer::{
        ChannelRouter, ColorTable, Command, Config, Error, Instant, OpcMessage, OutputDriver,
        RenderContext, Rgb, RouteOutcome, RoutingError,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };

    fn set_pixels(channel: u8, colors: &[Rgb]) -> OpcMessage {
        OpcMessage::set_pixel_colors(channel, colors).unwrap()
    }

    fn context() -> RenderContext {
        RenderContext::new(&Config::default(), OutputDriver::new(), Instant::from_ticks(0))
    }

    #[test]
    fn test_route_updates_channel() {
        let router = ChannelRouter::new(4);
        let mut table = ColorTable::new();

        let outcome = router.route(&mut table, &set_pixels(2, &[RED, GREEN])).unwrap();

        assert_eq!(outcome, RouteOutcome::Updated { channel: 2, leds: 2 });
        assert_eq!(table.get(&2), Some(&vec![RED, GREEN]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_route_replaces_whole_sequence() {
        let router = ChannelRouter::new(4);
        let mut table = ColorTable::new();

        router.route(&mut table, &set_pixels(0, &[RED; 10])).unwrap();
        router.route(&mut table, &set_pixels(0, &[GREEN; 3])).unwrap();

        assert_eq!(table[&0], vec![GREEN; 3]);
    }

    #[test]
    fn test_route_rejects_out_of_range_channel() {
        let router = ChannelRouter::new(4);
        let mut table = ColorTable::new();
        router.route(&mut table, &set_pixels(3, &[RED])).unwrap();

        let err = router.route(&mut table, &set_pixels(4, &[GREEN])).unwrap_err();

        assert!(matches!(
            err,
            Error::Routing(RoutingError::ChannelOutOfRange {
                channel: 4,
                max_panels: 4
            })
        ));
        assert_eq!(table.len(), 1);
        assert_eq!(table[&3], vec![RED]);
    }

    #[test]
    fn test_route_malformed_payload_keeps_table() {
        let router = ChannelRouter::new(4);
        let mut table = ColorTable::new();
        router.route(&mut table, &set_pixels(1, &[RED])).unwrap();

        let malformed = OpcMessage::new(1, Command::SetPixelColors, vec![1, 2, 3, 4]).unwrap();
        let err = router.route(&mut table, &malformed).unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(table[&1], vec![RED]);
    }

    #[test]
    fn test_route_ignores_other_commands() {
        let router = ChannelRouter::new(4);
        let mut table = ColorTable::new();

        let sysex = OpcMessage::new(0, Command::SystemExclusive, vec![1, 2]).unwrap();
        let reserved = OpcMessage::new(0, Command::Reserved(9), vec![1, 2, 3]).unwrap();

        assert_eq!(
            router.route(&mut table, &sysex).unwrap(),
            RouteOutcome::Ignored {
                channel: 0,
                command: Command::SystemExclusive
            }
        );
        assert!(matches!(
            router.route(&mut table, &reserved),
            Ok(RouteOutcome::Ignored { .. })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_panels_admit_nothing() {
        let router = ChannelRouter::new(0);
        assert!(!router.admits(0));
    }

    #[test]
    fn test_context_counts_outcomes() {
        let mut ctx = context();

        assert!(ctx.route(&set_pixels(0, &[RED])));
        assert!(!ctx.route(&set_pixels(200, &[RED])));
        assert!(!ctx.route(&OpcMessage::new(0, Command::Reserved(1), vec![]).unwrap()));

        let stats = ctx.message_stats();
        assert_eq!(stats.routed, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.ignored, 1);
        assert_eq!(ctx.channel_colors.len(), 1);
    }
}
