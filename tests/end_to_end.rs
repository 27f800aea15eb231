mod tests {
    use std::sync::{Arc, Mutex};

    use myrtio_opc_composer::stage::{Drive, FanOut, Forward, SingleRainbow};
    use myrtio_opc_composer::{
        Config, DeviceEndpoint, DeviceWriteError, Duration, FrameScheduler, Instant,
        MessageChannel, OpcMessage, OutputDriver, Pipeline, RenderContext, Rgb, StageSlot,
    };

    const TIMEOUT: Duration = Duration::from_secs(5);

    type Log = Arc<Mutex<Vec<Vec<u8>>>>;

    struct Recording(Log);

    impl DeviceEndpoint for Recording {
        fn write(&mut self, frame: &[u8]) -> Result<Option<Vec<u8>>, DeviceWriteError> {
            self.0.lock().unwrap().push(frame.to_vec());
            Ok(None)
        }
    }

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Four channels, each bound to its own recording endpoint.
    fn bound_context() -> (RenderContext, Vec<Log>) {
        let logs: Vec<Log> = (0..4).map(|_| Log::default()).collect();
        let mut output = OutputDriver::new();
        for (channel, log) in (0u8..).zip(&logs) {
            output.bind(channel, Recording(Arc::clone(log))).unwrap();
        }
        let ctx = RenderContext::new(&Config::default(), output, Instant::from_ticks(0));
        (ctx, logs)
    }

    #[test]
    fn test_message_reaches_only_its_channel() {
        let inbox = MessageChannel::<8>::new();
        let (ctx, logs) = bound_context();
        let mut scheduler =
            FrameScheduler::new(Pipeline::compose([Drive]), ctx).with_inbox(inbox.receiver());

        let message = OpcMessage::set_pixel_colors(1, &[Rgb::new(10, 20, 30)]).unwrap();
        inbox.sender().try_send(message).unwrap();
        scheduler.tick(Instant::from_ticks(0));
        assert!(scheduler.context().output.wait_idle(TIMEOUT));

        assert_eq!(
            *logs[1].lock().unwrap(),
            vec![vec![0, 0, 0, 0, 0xFF, 30, 20, 10, 0]]
        );
        for channel in [0, 2, 3] {
            assert!(logs[channel].lock().unwrap().is_empty(), "channel {channel}");
        }
        assert!(inbox.is_empty());
    }

    #[test]
    fn test_rejected_message_writes_nothing() {
        let inbox = MessageChannel::<8>::new();
        let (ctx, logs) = bound_context();
        let mut scheduler =
            FrameScheduler::new(Pipeline::compose([Drive]), ctx).with_inbox(inbox.receiver());

        let message = OpcMessage::set_pixel_colors(7, &[Rgb::new(1, 2, 3)]).unwrap();
        inbox.sender().try_send(message).unwrap();
        scheduler.tick(Instant::from_ticks(0));
        assert!(scheduler.context().output.wait_idle(TIMEOUT));

        assert_eq!(scheduler.context().message_stats().rejected, 1);
        assert!(logs.iter().all(|log| log.lock().unwrap().is_empty()));
    }

    #[test]
    fn test_brightness_reaches_frame() {
        let (mut ctx, logs) = bound_context();
        ctx.brightness = 0.0;
        ctx.channel_colors.insert(0, vec![Rgb::new(1, 2, 3)]);

        let mut pipeline = Pipeline::compose([Drive]);
        pipeline.run(&mut ctx);
        assert!(ctx.output.wait_idle(TIMEOUT));

        assert_eq!(
            *logs[0].lock().unwrap(),
            vec![vec![0, 0, 0, 0, 0xE0, 3, 2, 1, 0]]
        );
    }

    #[test]
    fn test_generated_pattern_on_every_channel() {
        let (ctx, logs) = bound_context();
        let pipeline = Pipeline::compose([
            StageSlot::from(SingleRainbow::new(2)),
            StageSlot::from(FanOut::All),
            StageSlot::from(Drive),
        ]);
        let mut scheduler: FrameScheduler<'_, 1> = FrameScheduler::new(pipeline, ctx);

        scheduler.tick(Instant::from_ticks(0));
        assert!(scheduler.context().output.wait_idle(TIMEOUT));

        for log in &logs {
            let frames = log.lock().unwrap();
            assert_eq!(frames.len(), 1);
            assert_eq!(frames[0].len(), 4 + 2 * 4 + 1);
        }
    }

    #[test]
    fn test_forward_sends_opc() {
        let sink = SharedSink::default();
        let mut ctx = RenderContext::new(&Config::default(), OutputDriver::new(), Instant::from_ticks(0));
        ctx.channel_colors.insert(2, vec![Rgb::new(10, 20, 30)]);

        let mut pipeline = Pipeline::compose([Forward::new(sink.clone())]);
        pipeline.run(&mut ctx);

        assert_eq!(*sink.0.lock().unwrap(), vec![2, 0, 0, 3, 10, 20, 30]);
    }
}
