// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2018 Philip Jenvey <pjenvey@mozilla.com>
// Copyright 2018-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::builder::compose::{compose_name, compose_tags};
use std::fmt::{self, Write};

pub(crate) mod compose;
pub(crate) mod event;
pub(crate) mod sampler;

const TAG_PREFIX: &str = "|#";
const SAMPLE_RATE_PREFIX: &str = "|@";

/// Type of metric that knows how to display itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetricType {
    Counter,
    Gauge,
    Histogram,
    Set,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricType::Counter => "c".fmt(f),
            MetricType::Gauge => "g".fmt(f),
            MetricType::Histogram => "h".fmt(f),
            MetricType::Set => "s".fmt(f),
        }
    }
}

/// Holder for primitive metric values that knows how to display itself
///
/// Floating point values are always written with six digits after the
/// decimal point, integers without one, and strings verbatim.
///
/// This enum is internal to how various types that are valid for each type
/// of metric (e.g. types for which `ToCounterValue`, `ToGaugeValue`, etc) are
/// implemented but is exposed for documentation purposes and advanced use cases.
///
/// Typical use of this library shouldn't require interacting with this type.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Str(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricValue::Signed(v) => v.fmt(f),
            MetricValue::Unsigned(v) => v.fmt(f),
            MetricValue::Float(v) => write!(f, "{:.6}", v),
            MetricValue::Str(ref v) => v.fmt(f),
        }
    }
}

/// Write `|#tag1,tag2,...` to the output if there are any tags.
pub(crate) fn write_tags<'a, I>(out: &mut String, tags: I)
where
    I: IntoIterator<Item = &'a str>,
{
    for (i, tag) in tags.into_iter().enumerate() {
        if i == 0 {
            out.push_str(TAG_PREFIX);
        } else {
            out.push(',');
        }
        out.push_str(tag);
    }
}

/// Size of the `|#...` section for the given tags, zero if there are none.
pub(crate) fn tags_size_hint(tags: &[&str]) -> usize {
    if tags.is_empty() {
        return 0;
    }

    // prefix, tags, commas
    TAG_PREFIX.len() + tags.iter().map(|t| t.len()).sum::<usize>() + tags.len() - 1
}

#[derive(Debug, Clone)]
pub(crate) struct MetricFormatter<'a> {
    name: String,
    val: MetricValue,
    type_: MetricType,
    tags: Vec<&'a str>,
    sample_rate: f64,
}

impl<'a> MetricFormatter<'a> {
    fn from_val(namespace: &str, key: &str, val: MetricValue, type_: MetricType) -> Self {
        MetricFormatter {
            name: compose_name(namespace, key),
            val,
            type_,
            tags: Vec::new(),
            sample_rate: 1.0,
        }
    }

    /// Call-site tags first, then the client's global tags.
    pub(crate) fn with_tags<C, G>(&mut self, call: &'a [C], global: &'a [G])
    where
        C: AsRef<str>,
        G: AsRef<str>,
    {
        self.tags = compose_tags(call, global);
    }

    pub(crate) fn with_sample_rate(&mut self, rate: f64) {
        self.sample_rate = rate;
    }

    #[allow(clippy::float_cmp)]
    fn has_sample_rate(&self) -> bool {
        self.sample_rate != 1.0
    }

    fn write_base_metric(&self, out: &mut String) {
        let _ = write!(out, "{}:{}|{}", self.name, self.val, self.type_);
    }

    fn write_sample_rate(&self, out: &mut String) {
        if self.has_sample_rate() {
            let _ = write!(out, "{}{:.6}", SAMPLE_RATE_PREFIX, self.sample_rate);
        }
    }

    fn size_hint(&self) -> usize {
        let rate = if self.has_sample_rate() {
            SAMPLE_RATE_PREFIX.len() + 8
        } else {
            0
        };

        self.name.len() + 1 /* : */ + 16 /* value */ + 1 /* | */ + 1 /* type */ + rate + tags_size_hint(&self.tags)
    }

    pub(crate) fn format(&self) -> String {
        let mut metric_string = String::with_capacity(self.size_hint());
        self.write_base_metric(&mut metric_string);
        self.write_sample_rate(&mut metric_string);
        write_tags(&mut metric_string, self.tags.iter().copied());
        metric_string
    }
}

/// Render a single metric datagram given the client's namespace and global
/// tags along with the call-site name, value, tags and sample rate.
pub(crate) fn format_metric<C, G>(
    namespace: &str,
    global_tags: &[G],
    name: &str,
    value: MetricValue,
    tags: &[C],
    sample_rate: f64,
    kind: MetricType,
) -> String
where
    C: AsRef<str>,
    G: AsRef<str>,
{
    let mut formatter = MetricFormatter::from_val(namespace, name, value, kind);
    formatter.with_tags(tags, global_tags);
    formatter.with_sample_rate(sample_rate);
    formatter.format()
}
