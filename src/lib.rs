//! Open Pixel Control receiver driving SK9822 LED strips.
//!
//! Inbound OPC messages are decoded ([`opc`]), routed into a per-channel
//! color table ([`router`]) and rendered once per frame by a [`Pipeline`]
//! of [`Stage`]s. The drive stage encodes each channel as an SK9822 frame
//! ([`sk9822`]) and hands it to that channel's writer ([`output`]).

pub mod channel;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod frame_scheduler;
pub mod opc;
pub mod output;
pub mod pipeline;
pub mod router;
pub mod sk9822;
pub mod stage;

pub use channel::{MessageChannel, MessageReceiver, MessageSender};
pub use color::{ColorSequence, Hsv, Rgb, describe, describe_all};
pub use config::{Config, Pattern, Transport};
pub use context::{MessageStats, RenderContext};
pub use error::{DecodeError, DeviceWriteError, Error, Result, RoutingError};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use opc::{Command, OpcMessage, StreamDecoder};
pub use output::{DeviceEndpoint, OutputDriver, WriteStats};
pub use pipeline::Pipeline;
pub use router::{ChannelRouter, ColorTable, RouteOutcome};
pub use stage::{Stage, StageSlot};

pub use embassy_time::{Duration, Instant};
