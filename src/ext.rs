// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2018-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Advanced extension points for the Dogstatsd library
//!
//! Most users of the library should not need anything from this module.
//! It exposes the value conversions used by each kind of metric and the
//! backend used to send fully formed datagrams, for building metric types
//! the client does not support directly.

pub use crate::builder::MetricValue;
pub use crate::client::{MetricBackend, ToCounterValue, ToGaugeValue, ToHistogramValue, ToSetValue};
