// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::builder::event::{format_event, severity_opts, EventAlertType, EventOpts, EventOrigin};
use crate::builder::sampler::{Sampler, Sampling};
use crate::builder::{format_metric, MetricType, MetricValue};
use crate::sealed::Sealed;
use crate::sinks::{MetricSink, SinkStats, UdpMetricSink};
use crate::types::{Counter, ErrorKind, Event, Gauge, Histogram, Metric, MetricError, MetricResult, Set};
use std::fmt;
use std::net::{ToSocketAddrs, UdpSocket};
use std::panic::RefUnwindSafe;

fn float_value(v: f64) -> MetricResult<MetricValue> {
    if v.is_finite() {
        Ok(MetricValue::Float(v))
    } else {
        Err(MetricError::from((
            ErrorKind::InvalidInput,
            "NaN and infinite values cannot be encoded",
        )))
    }
}

/// Conversion trait for valid values for counters
///
/// This trait must be implemented for any types that are used as counter
/// values (currently `i64` and `i32`). This trait is internal to how values
/// are formatted as part of metrics but is exposed publicly for documentation
/// purposes.
///
/// Typical use of this library shouldn't require interacting with this trait.
pub trait ToCounterValue {
    fn try_to_value(self) -> MetricResult<MetricValue>;
}

impl ToCounterValue for i64 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        Ok(MetricValue::Signed(self))
    }
}

impl ToCounterValue for i32 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        Ok(MetricValue::Signed(self.into()))
    }
}

/// Conversion trait for valid values for gauges
///
/// This trait must be implemented for any types that are used as gauge
/// values (currently `f64`, `f32`, `i32` and `u32`). Gauges are always
/// written as a decimal with six digits after the point. NaN and infinite
/// values are rejected with an `InvalidInput` error.
///
/// Typical use of this library shouldn't require interacting with this trait.
pub trait ToGaugeValue {
    fn try_to_value(self) -> MetricResult<MetricValue>;
}

impl ToGaugeValue for f64 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        float_value(self)
    }
}

impl ToGaugeValue for f32 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        float_value(self.into())
    }
}

impl ToGaugeValue for i32 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        float_value(self.into())
    }
}

impl ToGaugeValue for u32 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        float_value(self.into())
    }
}

/// Conversion trait for valid values for histograms
///
/// This trait must be implemented for any types that are used as histogram
/// values (currently `f64`, `f32`, `i32` and `u32`). Like gauges, NaN and
/// infinite values are rejected with an `InvalidInput` error.
///
/// Typical use of this library shouldn't require interacting with this trait.
pub trait ToHistogramValue {
    fn try_to_value(self) -> MetricResult<MetricValue>;
}

impl ToHistogramValue for f64 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        float_value(self)
    }
}

impl ToHistogramValue for f32 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        float_value(self.into())
    }
}

impl ToHistogramValue for i32 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        float_value(self.into())
    }
}

impl ToHistogramValue for u32 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        float_value(self.into())
    }
}

/// Conversion trait for valid values for sets
///
/// This trait must be implemented for any types that are used as set
/// members (currently `&str`, `String`, `i64` and `u64`). Strings are
/// written verbatim: they must not contain any of `:`, `|` or `,`.
///
/// Typical use of this library shouldn't require interacting with this trait.
pub trait ToSetValue {
    fn try_to_value(self) -> MetricResult<MetricValue>;
}

impl ToSetValue for &str {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        Ok(MetricValue::Str(self.to_string()))
    }
}

impl ToSetValue for String {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        Ok(MetricValue::Str(self))
    }
}

impl ToSetValue for i64 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        Ok(MetricValue::Signed(self))
    }
}

impl ToSetValue for u64 {
    fn try_to_value(self) -> MetricResult<MetricValue> {
        Ok(MetricValue::Unsigned(self))
    }
}

/// Trait for incrementing and decrementing counters.
///
/// Counters are simple values incremented or decremented by a client. The
/// rates at which these events occur or average values will be determined
/// by the server receiving them. Examples of counter uses include number
/// of logins to a system or requests received.
///
/// Each call takes the tags for this metric, written before the client's
/// global tags, and a sample rate. A sample rate of exactly `1.0` is not
/// written to the datagram. NaN and infinite sample rates are rejected with
/// an `InvalidInput` error for every kind of metric.
///
/// The following types are valid for counters:
/// * `i64`
/// * `i32`
pub trait Counted<T>
where
    T: ToCounterValue,
{
    /// Increment or decrement the counter by the given amount
    fn count(&self, key: &str, count: T, tags: &[&str], sample_rate: f64) -> MetricResult<Counter>;
}

/// Trait for convenience methods for counters
///
/// This trait specifically implements increment and decrement convenience
/// methods for counters with `i64` types. These are always sent with a
/// sample rate of `1.0`.
pub trait CountedExt: Counted<i64> {
    /// Increment the counter by 1
    fn incr(&self, key: &str, tags: &[&str]) -> MetricResult<Counter> {
        self.count(key, 1, tags, 1.0)
    }

    /// Decrement the counter by 1
    fn decr(&self, key: &str, tags: &[&str]) -> MetricResult<Counter> {
        self.count(key, -1, tags, 1.0)
    }
}

/// Trait for recording gauge values.
///
/// Gauge values are an instantaneous measurement of a value determined
/// by the client. They do not change unless changed by the client. Examples
/// include things like load average or how many connections are active.
///
/// The following types are valid for gauges:
/// * `f64`
/// * `f32`
/// * `i32`
/// * `u32`
pub trait Gauged<T>
where
    T: ToGaugeValue,
{
    /// Record a gauge value with the given key
    fn gauge(&self, key: &str, value: T, tags: &[&str], sample_rate: f64) -> MetricResult<Gauge>;
}

/// Trait for recording histogram values.
///
/// Histogram values are values that can represent anything, whose
/// statistical distribution is calculated by the server. The values can be
/// timings, amount of some resource consumed, size of HTTP responses in
/// some application, etc.
///
/// The following types are valid for histograms:
/// * `f64`
/// * `f32`
/// * `i32`
/// * `u32`
pub trait Histogrammed<T>
where
    T: ToHistogramValue,
{
    /// Record a single histogram value with the given key
    fn histogram(&self, key: &str, value: T, tags: &[&str], sample_rate: f64) -> MetricResult<Histogram>;
}

/// Trait for recording set values.
///
/// Sets count the number of unique elements in a group. You can use them to,
/// for example, count the unique visitors to your site.
///
/// The following types are valid for sets:
/// * `&str`
/// * `String`
/// * `i64`
/// * `u64`
pub trait Setted<T>
where
    T: ToSetValue,
{
    /// Record a single set value with the given key
    fn set(&self, key: &str, value: T, tags: &[&str], sample_rate: f64) -> MetricResult<Set>;
}

/// Trait for posting events to the Datadog event stream.
///
/// Events have a title and a body of text. Title and text lengths are
/// written to the event as numbers of characters rather than bytes. Events
/// with a body larger than 8KB are discarded and an error is returned.
///
/// The severity shortcuts (`warning`, `error`, `info` and `success`) set the
/// alert type of the event, use the client's namespace (without its trailing
/// `.`) as the source type, and add two tags derived from the namespace:
/// `<namespace>-<alert type>` and `<namespace>`. Neither the source type nor
/// these tags are added when the client has no namespace.
///
/// Note that events are a [Datadog](https://docs.datadoghq.com/developers/dogstatsd/)
/// extension to Statsd and may not be supported by your server.
pub trait Evented {
    /// Post an event with every optional field given explicitly.
    ///
    /// The namespace tag is added after the tags in `opts`, but not the
    /// `<namespace>-<alert type>` tag.
    fn event(&self, title: &str, text: &str, opts: &EventOpts) -> MetricResult<Event>;

    /// Post an event with the given alert type in the manner of the
    /// severity shortcuts.
    fn alert(&self, alert_type: EventAlertType, title: &str, text: &str, tags: &[&str]) -> MetricResult<Event>;

    /// Post a `warning` event
    fn warning(&self, title: &str, text: &str, tags: &[&str]) -> MetricResult<Event> {
        self.alert(EventAlertType::Warning, title, text, tags)
    }

    /// Post an `error` event
    fn error(&self, title: &str, text: &str, tags: &[&str]) -> MetricResult<Event> {
        self.alert(EventAlertType::Error, title, text, tags)
    }

    /// Post an `info` event
    fn info(&self, title: &str, text: &str, tags: &[&str]) -> MetricResult<Event> {
        self.alert(EventAlertType::Info, title, text, tags)
    }

    /// Post a `success` event
    fn success(&self, title: &str, text: &str, tags: &[&str]) -> MetricResult<Event> {
        self.alert(EventAlertType::Success, title, text, tags)
    }
}

/// Trait that encompasses all other traits for sending metrics.
///
/// If you wish to use `StatsdClient` with a generic type or place a
/// `StatsdClient` instance behind a pointer (such as a `Box`) this will allow
/// you to reference all the implemented methods for recording metrics, while
/// using a single trait. An example of this is shown below.
///
/// ```
/// use dogstatsd::prelude::*;
/// use dogstatsd::{StatsdClient, NopMetricSink};
///
/// let client: Box<dyn MetricClient> = Box::new(StatsdClient::from_sink(NopMetricSink));
///
/// client.count("some.counter", 1, &[], 1.0).unwrap();
/// client.incr("some.counter", &["region:us-east-1"]).unwrap();
/// client.gauge("some.gauge", 8.5, &[], 1.0).unwrap();
/// client.histogram("some.histogram", 4.0, &[], 0.5).unwrap();
/// client.set("some.set", "user-1234", &[], 1.0).unwrap();
/// client.info("deployed", "version 1.2.3 is live", &[]).unwrap();
/// ```
pub trait MetricClient:
    Counted<i64>
    + Counted<i32>
    + CountedExt
    + Gauged<f64>
    + Gauged<f32>
    + Gauged<i32>
    + Gauged<u32>
    + Histogrammed<f64>
    + Histogrammed<f32>
    + Histogrammed<i32>
    + Histogrammed<u32>
    + for<'a> Setted<&'a str>
    + Setted<String>
    + Setted<i64>
    + Setted<u64>
    + Evented
{
}

/// Typically internal client methods for sending metrics.
///
/// This trait exposes methods of the client that would normally be internal
/// but may be useful for consumers of the library to extend it in unforeseen
/// ways. Most consumers of the library shouldn't need to make use of this
/// extension point.
///
/// NOTE: This is a sealed trait and so it cannot be implemented outside of the
/// library.
///
/// # Example
///
/// ```
/// use dogstatsd::{Metric, MetricResult, StatsdClient, NopMetricSink};
/// use dogstatsd::ext::MetricBackend;
///
/// struct ServiceCheck {
///     repr: String,
/// }
///
/// impl Metric for ServiceCheck {
///     fn as_metric_str(&self) -> &str {
///         &self.repr
///     }
/// }
///
/// let client = StatsdClient::from_sink(NopMetricSink);
/// let check = ServiceCheck { repr: "_sc|my.service|0".to_string() };
/// client.send_metric(&check).unwrap();
/// ```
pub trait MetricBackend: Sealed {
    /// Send a fully formed `Metric` implementation via the underlying `MetricSink`
    ///
    /// The metric is sent verbatim: it is expected to already include any
    /// namespace or tags.
    fn send_metric<M>(&self, metric: &M) -> MetricResult<()>
    where
        M: Metric;
}

/// Builder for creating and customizing `StatsdClient` instances.
///
/// Instances of the builder should be created by calling the `::builder()`
/// method on the `StatsdClient` struct.
///
/// # Example
///
/// ```
/// use dogstatsd::prelude::*;
/// use dogstatsd::{StatsdClient, NopMetricSink};
///
/// let client = StatsdClient::builder(NopMetricSink)
///     .with_namespace("my.app.")
///     .with_tag("environment:production")
///     .with_tag("rust")
///     .build();
///
/// let res = client.count("some.counter", 42, &["region:us-east-2"], 1.0);
/// assert_eq!(
///     "my.app.some.counter:42|c|#region:us-east-2,environment:production,rust",
///     res.unwrap().as_metric_str()
/// );
/// ```
pub struct StatsdClientBuilder {
    namespace: String,
    sink: Box<dyn MetricSink + Sync + Send + RefUnwindSafe>,
    tags: Vec<String>,
}

impl StatsdClientBuilder {
    // Set the required fields and defaults for optional fields
    fn new<T>(sink: T) -> Self
    where
        T: MetricSink + Sync + Send + RefUnwindSafe + 'static,
    {
        StatsdClientBuilder {
            // required
            sink: Box::new(sink),

            // optional with defaults
            namespace: String::new(),
            tags: Vec::new(),
        }
    }

    /// Set the namespace prepended to every metric name and event title.
    ///
    /// The namespace is used exactly as given: include a trailing separator
    /// (`"my.app."`) if you want one between the namespace and the name.
    pub fn with_namespace<S>(mut self, namespace: S) -> Self
    where
        S: Into<String>,
    {
        self.namespace = namespace.into();
        self
    }

    /// Add a global tag to every metric and event sent by the built client.
    pub fn with_tag<S>(mut self, tag: S) -> Self
    where
        S: ToString,
    {
        self.tags.push(tag.to_string());
        self
    }

    /// Add several global tags to every metric and event sent by the built
    /// client.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.tags.extend(tags.into_iter().map(|t| t.to_string()));
        self
    }

    /// Construct a new `StatsdClient` instance based on current settings.
    pub fn build(self) -> StatsdClient {
        StatsdClient::from_builder(self)
    }
}

/// Client for DogStatsD that implements various traits to record metrics
/// and post events.
///
/// # Traits
///
/// * `Counted` and `CountedExt` for emitting counters.
/// * `Gauged` for emitting gauge values.
/// * `Histogrammed` for emitting histogram values.
/// * `Setted` for emitting set values.
/// * `Evented` for posting events.
/// * `MetricClient` for a combination of all of the above.
///
/// Every method formats a single datagram and hands it to the `MetricSink`
/// before returning. The datagram is returned to the caller on success,
/// errors from the sink are returned as-is and never retried.
///
/// # Namespace and global tags
///
/// The namespace is prepended to every metric name and event title as-is.
/// Global tags are written after the tags given for each call. Both may be
/// replaced with `set_global_namespace` and `set_global_tags`, which only
/// affect datagrams sent afterwards.
///
/// # Threading
///
/// All methods for sending metrics take `&self` and the client is `Send`
/// and `Sync`, so it can be shared between threads with an `Arc`. Changing
/// the namespace or global tags requires `&mut self`: a shared client must be
/// configured before it is shared, or be wrapped in a lock by the caller.
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use dogstatsd::prelude::*;
/// use dogstatsd::{StatsdClient, NopMetricSink};
///
/// let mut client = StatsdClient::from_sink(NopMetricSink);
/// client.set_global_namespace("my.app.");
/// client.set_global_tags(vec!["env:test"]);
///
/// let client = Arc::new(client);
/// let local = Arc::clone(&client);
/// thread::spawn(move || {
///     local.count("request.handler", 1, &[], 1.0).unwrap();
/// })
/// .join()
/// .unwrap();
/// ```
pub struct StatsdClient {
    namespace: String,
    sink: Box<dyn MetricSink + Sync + Send + RefUnwindSafe>,
    tags: Vec<String>,
    sampler: Sampler,
}

impl StatsdClient {
    /// Create a new client that sends datagrams over UDP to the given
    /// address, using an ephemeral local socket in non-blocking mode.
    ///
    /// The client starts with no namespace and no global tags.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dogstatsd::{StatsdClient, DEFAULT_PORT};
    ///
    /// let client = StatsdClient::from_udp_host(("127.0.0.1", DEFAULT_PORT)).unwrap();
    /// ```
    ///
    /// # Failures
    ///
    /// This method may fail if the local socket cannot be bound or the
    /// address of the server cannot be resolved.
    pub fn from_udp_host<A>(host: A) -> MetricResult<Self>
    where
        A: ToSocketAddrs,
    {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.set_nonblocking(true)?;
        let sink = UdpMetricSink::from(host, socket)?;
        log::debug!("sending DogStatsD datagrams to {}", sink.peer_addr());
        Ok(Self::from_sink(sink))
    }

    /// Create a new client instance that will emit metrics to the given
    /// `MetricSink` implementation, with no namespace and no global tags.
    ///
    /// # Example
    ///
    /// ```
    /// use dogstatsd::{StatsdClient, NopMetricSink};
    ///
    /// let client = StatsdClient::from_sink(NopMetricSink);
    /// ```
    pub fn from_sink<T>(sink: T) -> Self
    where
        T: MetricSink + Sync + Send + RefUnwindSafe + 'static,
    {
        Self::builder(sink).build()
    }

    /// Create a new builder with the provided metric sink.
    pub fn builder<T>(sink: T) -> StatsdClientBuilder
    where
        T: MetricSink + Sync + Send + RefUnwindSafe + 'static,
    {
        StatsdClientBuilder::new(sink)
    }

    /// Replace the namespace prepended to metric names and event titles.
    ///
    /// An empty namespace means no prefix.
    pub fn set_global_namespace<S>(&mut self, namespace: S)
    where
        S: Into<String>,
    {
        self.namespace = namespace.into();
    }

    /// Replace the global tags written after the tags of each call.
    pub fn set_global_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
    }

    /// The namespace currently prepended to metric names and event titles.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The global tags currently written after the tags of each call.
    pub fn global_tags(&self) -> &[String] {
        &self.tags
    }

    /// Return I/O telemetry of the underlying sink.
    pub fn stats(&self) -> SinkStats {
        self.sink.stats()
    }

    // Create a new StatsdClient by consuming the builder
    fn from_builder(builder: StatsdClientBuilder) -> Self {
        StatsdClient {
            namespace: builder.namespace,
            sink: builder.sink,
            tags: builder.tags,
            sampler: Sampler::new(),
        }
    }

    fn send_value<M>(
        &self,
        key: &str,
        value: MetricResult<MetricValue>,
        tags: &[&str],
        sample_rate: f64,
        type_: MetricType,
    ) -> MetricResult<M>
    where
        M: Metric + From<String>,
    {
        if !sample_rate.is_finite() {
            return Err(MetricError::from((
                ErrorKind::InvalidInput,
                "NaN and infinite sample rates cannot be encoded",
            )));
        }

        let metric = M::from(format_metric(
            &self.namespace,
            &self.tags,
            key,
            value?,
            tags,
            sample_rate,
            type_,
        ));

        if self.sampler.sample(sample_rate) {
            self.send_metric(&metric)?;
        }

        Ok(metric)
    }

    fn send_event(&self, title: &str, text: &str, opts: &EventOpts, origin: EventOrigin) -> MetricResult<Event> {
        let event = Event::from(format_event(&self.namespace, &self.tags, title, text, opts, origin)?);
        self.send_metric(&event)?;
        Ok(event)
    }
}

impl Sealed for StatsdClient {}

impl MetricBackend for StatsdClient {
    fn send_metric<M>(&self, metric: &M) -> MetricResult<()>
    where
        M: Metric,
    {
        self.sink.emit(metric.as_metric_str())?;
        Ok(())
    }
}

impl fmt::Debug for StatsdClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StatsdClient {{ namespace: {:?}, sink: ..., tags: {:?} }}",
            self.namespace, self.tags,
        )
    }
}

impl<T> Counted<T> for StatsdClient
where
    T: ToCounterValue,
{
    fn count(&self, key: &str, count: T, tags: &[&str], sample_rate: f64) -> MetricResult<Counter> {
        self.send_value(key, count.try_to_value(), tags, sample_rate, MetricType::Counter)
    }
}

impl CountedExt for StatsdClient {}

impl<T> Gauged<T> for StatsdClient
where
    T: ToGaugeValue,
{
    fn gauge(&self, key: &str, value: T, tags: &[&str], sample_rate: f64) -> MetricResult<Gauge> {
        self.send_value(key, value.try_to_value(), tags, sample_rate, MetricType::Gauge)
    }
}

impl<T> Histogrammed<T> for StatsdClient
where
    T: ToHistogramValue,
{
    fn histogram(&self, key: &str, value: T, tags: &[&str], sample_rate: f64) -> MetricResult<Histogram> {
        self.send_value(key, value.try_to_value(), tags, sample_rate, MetricType::Histogram)
    }
}

impl<T> Setted<T> for StatsdClient
where
    T: ToSetValue,
{
    fn set(&self, key: &str, value: T, tags: &[&str], sample_rate: f64) -> MetricResult<Set> {
        self.send_value(key, value.try_to_value(), tags, sample_rate, MetricType::Set)
    }
}

impl Evented for StatsdClient {
    fn event(&self, title: &str, text: &str, opts: &EventOpts) -> MetricResult<Event> {
        self.send_event(title, text, opts, EventOrigin::Custom)
    }

    fn alert(&self, alert_type: EventAlertType, title: &str, text: &str, tags: &[&str]) -> MetricResult<Event> {
        let opts = severity_opts(&self.namespace, alert_type, tags);
        self.send_event(title, text, &opts, EventOrigin::Severity)
    }
}

impl MetricClient for StatsdClient {}

#[cfg(test)]
mod tests {
    use super::{
        Counted, CountedExt, Evented, Gauged, Histogrammed, MetricBackend, MetricClient, Setted, StatsdClient,
    };
    use crate::builder::event::{EventAlertType, EventOpts, EventPriority};
    use crate::sinks::{NopMetricSink, SpyMetricSink};
    use crate::test::ErrorMetricSink;
    use crate::types::{Counter, ErrorKind, Metric};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, UNIX_EPOCH};

    fn flubber_client() -> StatsdClient {
        StatsdClient::builder(NopMetricSink).with_namespace("flubber.").build()
    }

    #[test]
    fn test_statsd_client_gauge() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.gauge("test.gauge", 1.0, &[], 1.0);
        assert_eq!("test.gauge:1.000000|g", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_gauge_with_sample_rate() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.gauge("test.gauge", 1.0, &[], 0.999999);
        assert_eq!("test.gauge:1.000000|g|@0.999999", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_gauge_with_tags() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.gauge("test.gauge", 1.0, &["tagA", "tagB"], 1.0);
        assert_eq!("test.gauge:1.000000|g|#tagA,tagB", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_gauge_integer_types() {
        let client = StatsdClient::from_sink(NopMetricSink);
        assert_eq!(
            "test.gauge:7.000000|g",
            client.gauge("test.gauge", 7u32, &[], 1.0).unwrap().as_metric_str()
        );
        assert_eq!(
            "test.gauge:-7.000000|g",
            client.gauge("test.gauge", -7i32, &[], 1.0).unwrap().as_metric_str()
        );
        assert_eq!(
            "test.gauge:0.500000|g",
            client.gauge("test.gauge", 0.5f32, &[], 1.0).unwrap().as_metric_str()
        );
    }

    #[test]
    fn test_statsd_client_gauge_non_finite() {
        let (rx, sink) = SpyMetricSink::new();
        let client = StatsdClient::from_sink(sink);

        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let res = client.gauge("test.gauge", value, &[], 1.0);
            assert_eq!(ErrorKind::InvalidInput, res.unwrap_err().kind());
        }

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_statsd_client_histogram_non_finite() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.histogram("test.histogram", f64::NAN, &[], 1.0);
        assert_eq!(ErrorKind::InvalidInput, res.unwrap_err().kind());
    }

    #[test]
    fn test_statsd_client_non_finite_sample_rate() {
        let (rx, sink) = SpyMetricSink::new();
        let client = StatsdClient::from_sink(sink);

        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let res = client.count("test.count", 1, &[], rate);
            assert_eq!(ErrorKind::InvalidInput, res.unwrap_err().kind());

            let res = client.set("test.set", "uuid", &[], rate);
            assert_eq!(ErrorKind::InvalidInput, res.unwrap_err().kind());
        }

        assert!(rx.try_recv().is_err());
    }

    #[cfg(feature = "sample-rate")]
    #[test]
    fn test_statsd_client_sampled_out_not_sent() {
        let (rx, sink) = SpyMetricSink::new();
        let client = StatsdClient::from_sink(sink);

        let res = client.count("test.count", 1, &[], 0.0);
        assert_eq!("test.count:1|c|@0.000000", res.unwrap().as_metric_str());

        let res = client.gauge("test.gauge", 2.0, &["tagA"], 0.0);
        assert_eq!("test.gauge:2.000000|g|@0.000000|#tagA", res.unwrap().as_metric_str());

        assert!(rx.try_recv().is_err());
    }

    #[cfg(feature = "sample-rate")]
    #[test]
    fn test_statsd_client_rate_of_one_always_sent() {
        let (rx, sink) = SpyMetricSink::new();
        let client = StatsdClient::from_sink(sink);

        for _ in 0..100 {
            client.incr("test.count", &[]).unwrap();
        }

        assert_eq!(100, rx.try_iter().count());
    }

    #[test]
    fn test_statsd_client_count() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.count("test.count", 1, &["tagA"], 1.0);
        assert_eq!("test.count:1|c|#tagA", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_count_negative() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.count("test.count", -1, &["tagA"], 1.0);
        assert_eq!("test.count:-1|c|#tagA", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_count_i32() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.count("test.count", 5i32, &[], 1.0);
        assert_eq!("test.count:5|c", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_incr_decr() {
        let client = flubber_client();
        assert_eq!(
            "flubber.logins:1|c|#web",
            client.incr("logins", &["web"]).unwrap().as_metric_str()
        );
        assert_eq!("flubber.logins:-1|c", client.decr("logins", &[]).unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_histogram() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.histogram("test.histogram", 2.3, &["tagA"], 1.0);
        assert_eq!("test.histogram:2.300000|h|#tagA", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_set() {
        let client = StatsdClient::from_sink(NopMetricSink);
        let res = client.set("test.set", "uuid", &["tagA"], 1.0);
        assert_eq!("test.set:uuid|s|#tagA", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_set_other_types() {
        let client = StatsdClient::from_sink(NopMetricSink);
        assert_eq!(
            "test.set:uuid|s",
            client.set("test.set", "uuid".to_string(), &[], 1.0).unwrap().as_metric_str()
        );
        assert_eq!("test.set:-42|s", client.set("test.set", -42i64, &[], 1.0).unwrap().as_metric_str());
        assert_eq!("test.set:42|s", client.set("test.set", 42u64, &[], 1.0).unwrap().as_metric_str());
        assert_eq!(
            "test.set:18446744073709551615|s",
            client.set("test.set", u64::MAX, &[], 1.0).unwrap().as_metric_str()
        );
    }

    #[test]
    fn test_statsd_client_set_global_namespace() {
        let mut client = StatsdClient::from_sink(NopMetricSink);
        client.set_global_namespace("flubber.");
        let res = client.set("test.set", "uuid", &["tagA"], 1.0);

        assert_eq!("flubber.", client.namespace());
        assert_eq!("flubber.test.set:uuid|s|#tagA", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_set_global_tags() {
        let mut client = StatsdClient::from_sink(NopMetricSink);
        client.set_global_tags(vec!["tagC"]);
        let res = client.set("test.set", "uuid", &["tagA"], 1.0);

        assert_eq!(&["tagC".to_string()], client.global_tags());
        assert_eq!("test.set:uuid|s|#tagA,tagC", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_set_global_tags_replaces() {
        let mut client = StatsdClient::builder(NopMetricSink).with_tag("tagB").build();
        client.set_global_tags(vec!["tagC".to_string(), "tagD".to_string()]);
        let res = client.count("test.count", 1, &[], 1.0);
        assert_eq!("test.count:1|c|#tagC,tagD", res.unwrap().as_metric_str());

        client.set_global_tags(Vec::<String>::new());
        let res = client.count("test.count", 1, &[], 1.0);
        assert_eq!("test.count:1|c", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_builder_tags() {
        let client = StatsdClient::builder(NopMetricSink)
            .with_namespace("app.")
            .with_tag("a")
            .with_tags(vec!["b", "c"])
            .build();
        let res = client.count("test.count", 1, &["x"], 1.0);
        assert_eq!("app.test.count:1|c|#x,a,b,c", res.unwrap().as_metric_str());
    }

    #[test]
    fn test_statsd_client_event_severity_shortcuts() {
        let client = flubber_client();

        assert_eq!(
            "_e{13,4}:flubber.title|text|t:warning|s:flubber|#tag1,tag2,flubber-warning,flubber",
            client.warning("title", "text", &["tag1", "tag2"]).unwrap().as_metric_str()
        );
        assert_eq!(
            "_e{14,10}:flubber.Error!|some error|t:error|s:flubber|#tag3,flubber-error,flubber",
            client.error("Error!", "some error", &["tag3"]).unwrap().as_metric_str()
        );
        assert_eq!(
            "_e{11,4}:flubber.FYI|note|t:info|s:flubber|#flubber-info,flubber",
            client.info("FYI", "note", &[]).unwrap().as_metric_str()
        );
        assert_eq!(
            "_e{18,6}:flubber.Great News|hurray|t:success|s:flubber|#foo,bar,baz,flubber-success,flubber",
            client.success("Great News", "hurray", &["foo", "bar", "baz"]).unwrap().as_metric_str()
        );
        assert_eq!(
            "_e{15,2}:flubber.Unicode|世界|t:info|s:flubber|#flubber-info,flubber",
            client.info("Unicode", "世界", &[]).unwrap().as_metric_str()
        );
    }

    #[test]
    fn test_statsd_client_event_all_options() {
        let client = flubber_client();
        let opts = EventOpts {
            date_happened: Some(UNIX_EPOCH + Duration::from_secs(1411080960)),
            priority: Some(EventPriority::Normal),
            host: Some("node.example.com".to_string()),
            aggregation_key: Some("foo".to_string()),
            source_type_name: Some("bar".to_string()),
            alert_type: Some(EventAlertType::Success),
            tags: Vec::new(),
        };

        assert_eq!(
            "_e{20,11}:flubber.custom title|custom body|t:success|s:bar|d:1411080960|p:normal|h:node.example.com|k:foo|#flubber",
            client.event("custom title", "custom body", &opts).unwrap().as_metric_str()
        );
    }

    #[test]
    fn test_statsd_client_event_global_tags_last() {
        let client = StatsdClient::builder(NopMetricSink)
            .with_namespace("flubber.")
            .with_tag("env:prod")
            .build();
        let res = client.warning("title", "text", &["tag1"]);

        assert_eq!(
            "_e{13,4}:flubber.title|text|t:warning|s:flubber|#tag1,flubber-warning,flubber,env:prod",
            res.unwrap().as_metric_str()
        );
    }

    #[test]
    fn test_statsd_client_event_too_big_not_sent() {
        let (rx, sink) = SpyMetricSink::new();
        let client = StatsdClient::builder(sink).with_namespace("flubber.").build();
        let text = "a".repeat(8 * 1024 + 1);

        let err = client.error("too long", &text, &[]).unwrap_err();

        assert_eq!(ErrorKind::EventTooLarge, err.kind());
        assert_eq!(
            "Event \"flubber.too long\" payload is too big (more that 8KB), event discarded",
            err.to_string()
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_statsd_client_sink_error_returned() {
        let client = StatsdClient::from_sink(ErrorMetricSink::always());

        let res = client.count("test.count", 1, &[], 1.0);
        assert_eq!(ErrorKind::IoError, res.unwrap_err().kind());

        let res = client.info("title", "text", &[]);
        assert_eq!(ErrorKind::IoError, res.unwrap_err().kind());
    }

    #[test]
    fn test_statsd_client_sends_in_order() {
        let (rx, sink) = SpyMetricSink::new();
        let client = StatsdClient::from_sink(sink);

        client.count("a", 1, &[], 1.0).unwrap();
        client.gauge("b", 2.0, &[], 1.0).unwrap();
        client.info("c", "d", &[]).unwrap();

        let sent: Vec<_> = rx.try_iter().map(|b| String::from_utf8(b).unwrap()).collect();
        assert_eq!(vec!["a:1|c", "b:2.000000|g", "_e{1,1}:c|d|t:info"], sent);
    }

    #[test]
    fn test_statsd_client_send_metric() {
        let (rx, sink) = SpyMetricSink::new();
        let client = StatsdClient::from_sink(sink);
        let metric = Counter::from("raw:1|c".to_string());

        client.send_metric(&metric).unwrap();
        assert_eq!(b"raw:1|c".to_vec(), rx.recv().unwrap());
    }

    #[test]
    fn test_statsd_client_debug() {
        let client = flubber_client();
        assert_eq!(
            "StatsdClient { namespace: \"flubber.\", sink: ..., tags: [] }",
            format!("{:?}", client)
        );
    }

    #[test]
    fn test_statsd_client_as_metric_client() {
        let client: Box<dyn MetricClient + Send + Sync> = Box::new(flubber_client());
        assert_eq!(
            "flubber.some.gauge:8.000000|g",
            client.gauge("some.gauge", 8.0, &[], 1.0).unwrap().as_metric_str()
        );
    }

    #[test]
    fn test_statsd_client_shared_between_threads() {
        let (rx, sink) = SpyMetricSink::new();
        let client = Arc::new(StatsdClient::builder(sink).with_namespace("t.").build());

        let threads: Vec<_> = (0..4)
            .map(|i| {
                let local = Arc::clone(&client);
                thread::spawn(move || {
                    for _ in 0..10 {
                        local.count("counter", i, &[], 1.0).unwrap();
                    }
                })
            })
            .collect();

        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(40, rx.try_iter().count());
    }
}
