//! OPC server for SK9822 strips.
//!
//! Listens for Open Pixel Control over TCP or UDP, renders on a dedicated
//! thread and writes every admitted channel to a spidev node. Channels whose
//! node cannot be opened fall back to a loopback endpoint, so the server also
//! runs on machines without SPI.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use myrtio_opc_composer::channel::TrySendError;
use myrtio_opc_composer::opc::decode_prefix;
use myrtio_opc_composer::output::{LoopbackEndpoint, SpidevEndpoint};
use myrtio_opc_composer::stage::{Drive, FanOut, RainbowFlow, SingleRainbow};
use myrtio_opc_composer::{
    Config, FrameScheduler, Instant, MessageChannel, OpcMessage, OutputDriver, Pattern, Pipeline,
    RenderContext, StageSlot, StreamDecoder, Transport,
};
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tracing_subscriber::EnvFilter;

/// Environment variable pointing at the TOML config.
const CONFIG_ENV: &str = "OPC_SERVER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "opc-server.toml";

/// Messages waiting for the next frame.
const INBOX_SIZE: usize = 64;

const READ_BUFFER_SIZE: usize = 4096;

/// Largest UDP payload over IPv4.
const MAX_DATAGRAM_SIZE: usize = 65_507;

/// Hand-over from the transport tasks to the render thread.
static INBOX: MessageChannel<INBOX_SIZE> = MessageChannel::<INBOX_SIZE>::new();

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    tracing::info!(
        port = config.opc_port,
        transport = ?config.transport,
        max_panels = config.max_panels,
        pattern = ?config.pattern,
        "starting OPC server"
    );

    let output = bind_devices(&config)?;
    let context = RenderContext::new(&config, output, Instant::now());
    let mut scheduler =
        FrameScheduler::new(build_pipeline(&config), context).with_inbox(INBOX.receiver());
    if let Some(frame_rate) = config.frame_rate {
        scheduler = scheduler.with_frame_rate(frame_rate);
    }
    std::thread::Builder::new()
        .name("opc-render".into())
        .spawn(move || render(scheduler))
        .context("spawning render thread")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.opc_port));
    match config.transport {
        Transport::Tcp => serve_tcp(addr).await,
        Transport::Udp => serve_udp(addr).await,
    }
}

fn render(mut scheduler: FrameScheduler<'static, INBOX_SIZE>) {
    scheduler.run()
}

/// Read the config named by `OPC_SERVER_CONFIG`.
///
/// A missing default file means defaults; a missing file that was asked for
/// by name is an error.
fn load_config() -> Result<Config> {
    let (path, explicit) = match std::env::var_os(CONFIG_ENV) {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    if !explicit && !path.exists() {
        tracing::info!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Bind channel `i` to the `i`-th configured device.
fn bind_devices(config: &Config) -> Result<OutputDriver> {
    let mut output = OutputDriver::new();
    let admitted = config.devices.iter().take(usize::from(config.max_panels));
    for (channel, &address) in (0u8..).zip(admitted) {
        let path = address.spidev_path();
        match SpidevEndpoint::open(address, config.spi_clock_hz) {
            Ok(endpoint) => {
                output.bind(channel, endpoint)?;
                tracing::info!(channel, path = %path.display(), clock_hz = config.spi_clock_hz, "bound spidev");
            }
            Err(err) => {
                output.bind(channel, LoopbackEndpoint)?;
                tracing::warn!(channel, path = %path.display(), %err, "spidev unavailable, using loopback");
            }
        }
    }
    Ok(output)
}

/// Optional pattern copied to every channel, then the device writes.
fn build_pipeline(config: &Config) -> Pipeline {
    let pattern: Option<StageSlot> = match config.pattern {
        Pattern::None => None,
        Pattern::SingleRainbow => Some(SingleRainbow::new(config.led_count).into()),
        Pattern::RainbowFlow => Some(RainbowFlow::new(config.led_count).into()),
    };
    let fan_out = pattern.is_some().then(|| StageSlot::from(FanOut::All));

    Pipeline::compose(
        pattern
            .into_iter()
            .chain(fan_out)
            .chain([StageSlot::from(Drive)]),
    )
}

fn enqueue(message: OpcMessage) {
    if let Err(TrySendError(message)) = INBOX.try_send(message) {
        tracing::warn!(channel = message.channel(), "inbox full, dropping message");
    }
}

async fn serve_tcp(addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding TCP {addr}"))?;
    tracing::info!(%addr, "listening for OPC over TCP");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                tracing::warn!(%err, "accept failed");
                continue;
            }
        };
        tracing::debug!(%peer, "client connected");
        tokio::spawn(async move {
            match read_messages(stream).await {
                Ok(()) => tracing::debug!(%peer, "client disconnected"),
                Err(err) => tracing::warn!(%peer, %err, "client connection failed"),
            }
        });
    }
}

async fn read_messages(mut stream: TcpStream) -> std::io::Result<()> {
    let mut decoder = StreamDecoder::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let len = stream.read(&mut buffer).await?;
        if len == 0 {
            if decoder.pending() > 0 {
                tracing::debug!(bytes = decoder.pending(), "discarding partial message");
            }
            return Ok(());
        }
        for message in decoder.decode(&buffer[..len]) {
            enqueue(message);
        }
    }
}

/// Each datagram holds one or more whole messages.
async fn serve_udp(addr: SocketAddr) -> Result<()> {
    let socket = UdpSocket::bind(addr)
        .await
        .with_context(|| format!("binding UDP {addr}"))?;
    tracing::info!(%addr, "listening for OPC over UDP");

    let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];
    loop {
        let (len, peer) = match socket.recv_from(&mut buffer).await {
            Ok(received) => received,
            Err(err) => {
                tracing::warn!(%err, "receive failed");
                continue;
            }
        };
        let mut datagram = &buffer[..len];
        while !datagram.is_empty() {
            match decode_prefix(datagram) {
                Ok((message, consumed)) => {
                    enqueue(message);
                    datagram = &datagram[consumed..];
                }
                Err(err) => {
                    tracing::warn!(%peer, %err, "dropping malformed datagram");
                    break;
                }
            }
        }
    }
}
