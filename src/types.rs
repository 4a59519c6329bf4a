// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::error;
use std::fmt;
use std::io;

/// Trait for metrics to expose the DogStatsD wire format of themselves.
pub trait Metric {
    fn as_metric_str(&self) -> &str;
}

macro_rules! metric_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Debug, Hash, Clone)]
        pub struct $name {
            repr: String,
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name { repr: s }
            }
        }

        impl Metric for $name {
            fn as_metric_str(&self) -> &str {
                &self.repr
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.repr.fmt(f)
            }
        }
    };
}

metric_type!(
    /// Counters are simple values incremented or decremented by a client.
    ///
    /// See the `Counted` trait for more information.
    Counter
);

metric_type!(
    /// Gauges are an instantaneous value determined by the client.
    ///
    /// See the `Gauged` trait for more information.
    Gauge
);

metric_type!(
    /// Histograms are values whose distribution is calculated by the server.
    ///
    /// See the `Histogrammed` trait for more information.
    Histogram
);

metric_type!(
    /// Sets count the number of unique elements in a group.
    ///
    /// See the `Setted` trait for more information.
    Set
);

metric_type!(
    /// Events are entries posted to the Datadog event stream.
    ///
    /// See the `Evented` trait for more information.
    Event
);

/// Potential categories an error from this library falls into.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ErrorKind {
    /// A value passed by the caller could not be encoded.
    InvalidInput,
    /// An event payload exceeded the maximum size and was discarded.
    EventTooLarge,
    /// The underlying sink failed to write the datagram.
    IoError,
}

/// Error generated by this library potentially wrapping another
/// type of error (exposed via the `Error` trait).
#[derive(Debug)]
pub struct MetricError {
    repr: ErrorRepr,
}

#[derive(Debug)]
enum ErrorRepr {
    WithDescription(ErrorKind, &'static str),
    WithDetail(ErrorKind, String),
    IoError(io::Error),
}

impl MetricError {
    /// Return the kind of the error
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::IoError(_) => ErrorKind::IoError,
            ErrorRepr::WithDescription(kind, _) => kind,
            ErrorRepr::WithDetail(kind, _) => kind,
        }
    }
}

impl fmt::Display for MetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            ErrorRepr::IoError(ref err) => err.fmt(f),
            ErrorRepr::WithDescription(_, desc) => desc.fmt(f),
            ErrorRepr::WithDetail(_, ref desc) => desc.fmt(f),
        }
    }
}

impl error::Error for MetricError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self.repr {
            ErrorRepr::IoError(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MetricError {
    fn from(err: io::Error) -> MetricError {
        MetricError {
            repr: ErrorRepr::IoError(err),
        }
    }
}

impl From<(ErrorKind, &'static str)> for MetricError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> MetricError {
        MetricError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

impl From<(ErrorKind, String)> for MetricError {
    fn from((kind, desc): (ErrorKind, String)) -> MetricError {
        MetricError {
            repr: ErrorRepr::WithDetail(kind, desc),
        }
    }
}

pub type MetricResult<T> = Result<T, MetricError>;
