// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A DogStatsD client for Rust!
//!
//! Dogstatsd sends metrics and events to a [DogStatsD](https://docs.datadoghq.com/developers/dogstatsd/)
//! agent using its plain text datagram protocol.
//!
//! ## Features
//!
//! * Support for emitting counters, gauges, histograms and sets over UDP.
//! * Support for posting events, including `warning`, `error`, `info` and
//!   `success` shortcuts.
//! * A namespace and global tags applied to everything the client sends.
//! * Support for alternate backends via the `MetricSink` trait.
//! * Optional client side sampling with the `sample-rate` feature.
//!
//! ## Install
//!
//! To make use of `dogstatsd` in your project, add it as a dependency in your `Cargo.toml` file.
//!
//! ```toml
//! [dependencies]
//! dogstatsd = "x.y.z"
//! ```
//!
//! ## Usage
//!
//! ### Simple Use
//!
//! Create a client that will write to some imaginary agent over UDP and
//! send a few metrics. Every call formats and sends a single datagram.
//!
//! ```rust,no_run
//! use dogstatsd::prelude::*;
//! use dogstatsd::{StatsdClient, DEFAULT_PORT};
//!
//! // Note that you'll probably want to actually handle any errors creating
//! // the client when you use it for real in your application. We're just
//! // using .unwrap() here since this is an example!
//! let mut client = StatsdClient::from_udp_host(("metrics.example.com", DEFAULT_PORT)).unwrap();
//! client.set_global_namespace("my.app.");
//! client.set_global_tags(vec!["env:production"]);
//!
//! // Emit metrics!
//! client.count("page.views", 1, &[], 1.0);
//! client.gauge("fuel.level", 0.5, &["tank:1"], 1.0);
//! client.histogram("song.length", 240.0, &[], 0.5);
//! client.set("users.uniques", "user-1234", &[], 1.0);
//! ```
//!
//! This sends the following datagrams:
//!
//! ```text
//! my.app.page.views:1|c|#env:production
//! my.app.fuel.level:0.500000|g|#tank:1,env:production
//! my.app.song.length:240.000000|h|@0.500000|#env:production
//! my.app.users.uniques:user-1234|s|#env:production
//! ```
//!
//! ### Events
//!
//! Events are sent with `event` when every optional field should be chosen
//! explicitly, or with one of the severity shortcuts. The shortcuts tag the
//! event with the client's namespace.
//!
//! ```rust
//! use dogstatsd::prelude::*;
//! use dogstatsd::{EventOpts, EventPriority, StatsdClient, NopMetricSink};
//!
//! let client = StatsdClient::builder(NopMetricSink).with_namespace("my.app.").build();
//!
//! let event = client.warning("Disk", "disk is 90% full", &["host:db1"]).unwrap();
//! assert_eq!(
//!     "_e{11,16}:my.app.Disk|disk is 90% full|t:warning|s:my.app|#host:db1,my.app-warning,my.app",
//!     event.as_metric_str()
//! );
//!
//! let opts = EventOpts {
//!     priority: Some(EventPriority::Low),
//!     ..EventOpts::default()
//! };
//! let event = client.event("Deploy", "version 1.2.3", &opts).unwrap();
//! assert_eq!(
//!     "_e{13,13}:my.app.Deploy|version 1.2.3|p:low|#my.app",
//!     event.as_metric_str()
//! );
//! ```
//!
//! The body of an event is limited to 8KB. Larger events are discarded and
//! an error with the `EventTooLarge` kind is returned.
//!
//! ### Error Handling
//!
//! Every method returns the datagram that was sent, or an error if it could
//! not be formatted or written. Errors are never retried: a DogStatsD agent
//! is a best effort destination and callers are free to ignore the result.
//!
//! ```rust
//! use dogstatsd::prelude::*;
//! use dogstatsd::{ErrorKind, StatsdClient, NopMetricSink};
//!
//! let client = StatsdClient::from_sink(NopMetricSink);
//! let res = client.gauge("some.gauge", f64::NAN, &[], 1.0);
//! assert_eq!(ErrorKind::InvalidInput, res.unwrap_err().kind());
//! ```
//!
//! ### Custom Metric Sinks
//!
//! Datagrams are written by a `MetricSink`. The UDP sink is used by
//! `from_udp_host` but any other implementation may be given to `from_sink`
//! or `builder`.
//!
//! ```rust
//! use std::io;
//! use dogstatsd::prelude::*;
//! use dogstatsd::{StatsdClient, MetricSink};
//!
//! pub struct MyMetricSink;
//!
//! impl MetricSink for MyMetricSink {
//!     fn emit(&self, metric: &str) -> io::Result<usize> {
//!         // Your custom metric sink implementation goes here!
//!         Ok(0)
//!     }
//! }
//!
//! let client = StatsdClient::from_sink(MyMetricSink);
//! client.count("my.counter.thing", 42, &[], 1.0);
//! ```
//!
//! ### Sampling
//!
//! A sample rate below `1.0` is always written to the datagram so the agent
//! can scale counts back up. With the `sample-rate` feature enabled, the
//! client also drops datagrams with that probability before they reach the
//! sink. The formatted metric is returned either way.

#![forbid(unsafe_code)]

/// Default port of a DogStatsD agent.
pub const DEFAULT_PORT: u16 = 8125;

pub use self::builder::event::{EventAlertType, EventOpts, EventPriority, MAX_EVENT_BYTES};

pub use self::client::{
    Counted, CountedExt, Evented, Gauged, Histogrammed, MetricClient, Setted, StatsdClient, StatsdClientBuilder,
};

pub use self::sinks::{LoggingMetricSink, MetricSink, NopMetricSink, SinkStats, SpyMetricSink, UdpMetricSink};

pub use self::types::{Counter, ErrorKind, Event, Gauge, Histogram, Metric, MetricError, MetricResult, Set};

mod builder;
mod client;
pub mod ext;
pub mod prelude;
mod sinks;
mod types;


mod sealed {
    pub trait Sealed {}
}
