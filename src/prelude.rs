// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Export commonly used parts of Dogstatsd for easy glob imports
//!
//! # Example
//!
//! ```
//! use dogstatsd::prelude::*;
//! use dogstatsd::{StatsdClient, NopMetricSink};
//!
//! let client = StatsdClient::from_sink(NopMetricSink);
//!
//! client.count("some.counter", 1, &[], 1.0).unwrap();
//! client.incr("some.counter", &[]).unwrap();
//! client.gauge("some.gauge", 2.5, &[], 1.0).unwrap();
//! client.histogram("some.histogram", 4.0, &[], 1.0).unwrap();
//! client.set("some.set", 5i64, &[], 1.0).unwrap();
//! client.success("some.event", "it worked", &[]).unwrap();
//! ```

pub use crate::client::{Counted, CountedExt, Evented, Gauged, Histogrammed, MetricClient, Setted};
pub use crate::types::Metric;
