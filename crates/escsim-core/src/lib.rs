//! # escsim Core Library
//!
//! Core functionality for the escsim synthetic telemetry generator.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - The ESC measurement record model and its wire encoding
//! - A seedable measurement synthesizer
//! - Fixed and stepped power sources
//! - A fire-and-forget UDP datagram sink
//! - The run controller that paces emissions until a deadline or cancellation
//!
//! ## Example
//!
//! ```rust,ignore
//! use escsim_core::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! let config = RunConfig::default();
//! config.validate()?;
//!
//! let sink = UdpSink::open(&config.address, config.port).await?;
//! let mut controller = RunController::new(config, sink, MeasurementSynthesizer::new())?;
//!
//! let summary = controller.run(CancellationToken::new()).await?;
//! println!("emitted {} records", summary.emitted);
//! ```

pub mod error;
pub mod power;
pub mod run;
pub mod synth;
pub mod telemetry;
pub mod transport;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{ConfigError, RunError};
    pub use crate::power::{PowerReading, PowerSource, StepSequencer};
    pub use crate::run::{
        RunConfig, RunController, RunPhase, RunState, RunSummary, StopReason, Variant,
    };
    pub use crate::synth::{MeasurementSynthesizer, SampleRequest};
    pub use crate::telemetry::{
        MeasurementRecord, Measurements, Params, TestConfiguration, TimeReading,
    };
    pub use crate::transport::{DatagramSink, TransportError, UdpSink};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
