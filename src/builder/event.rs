// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2018-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::builder::compose::{compose_name, trim_namespace};
use crate::builder::{tags_size_hint, write_tags};
use crate::types::{ErrorKind, MetricError, MetricResult};
use std::fmt::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum size, in bytes, of the text of an event.
///
/// Events with a larger body are discarded rather than truncated.
pub const MAX_EVENT_BYTES: usize = 8 * 1024;

/// The priority of an event.
///
/// See [Datadog](https://docs.datadoghq.com/developers/dogstatsd/).
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy)]
pub enum EventPriority {
    Low,
    Normal,
    High,
}

impl fmt::Display for EventPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            EventPriority::Low => "low".fmt(f),
            EventPriority::Normal => "normal".fmt(f),
            EventPriority::High => "high".fmt(f),
        }
    }
}

/// The alert type, or severity, of an event.
///
/// See [Datadog](https://docs.datadoghq.com/developers/dogstatsd/).
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy)]
pub enum EventAlertType {
    Error,
    Warning,
    Info,
    Success,
}

impl fmt::Display for EventAlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            EventAlertType::Error => "error".fmt(f),
            EventAlertType::Warning => "warning".fmt(f),
            EventAlertType::Info => "info".fmt(f),
            EventAlertType::Success => "success".fmt(f),
        }
    }
}

/// Optional fields of an event.
///
/// Every field is only written to the event when it is set. Tags given here
/// are written before any of the client's global tags.
///
/// # Example
///
/// ```
/// use std::time::{Duration, UNIX_EPOCH};
/// use dogstatsd::{EventAlertType, EventOpts, EventPriority};
///
/// let opts = EventOpts {
///     date_happened: Some(UNIX_EPOCH + Duration::from_secs(1411080960)),
///     priority: Some(EventPriority::Normal),
///     host: Some("node.example.com".to_string()),
///     alert_type: Some(EventAlertType::Success),
///     ..EventOpts::default()
/// };
///
/// assert!(opts.aggregation_key.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOpts {
    pub date_happened: Option<SystemTime>,
    pub priority: Option<EventPriority>,
    pub host: Option<String>,
    pub aggregation_key: Option<String>,
    pub source_type_name: Option<String>,
    pub alert_type: Option<EventAlertType>,
    pub tags: Vec<String>,
}

/// How an event was submitted, which decides the tags synthesized from
/// the namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventOrigin {
    /// `event()` with caller supplied options: only the namespace tag.
    Custom,
    /// One of the severity shortcuts: `<namespace>-<alert type>` and the
    /// namespace tag.
    Severity,
}

fn epoch_seconds(time: SystemTime) -> MetricResult<u64> {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| MetricError::from((ErrorKind::InvalidInput, "event date is before the Unix epoch")))
}

fn event_too_big_error(title: &str) -> MetricError {
    MetricError::from((
        ErrorKind::EventTooLarge,
        format!(
            "Event \"{}\" payload is too big (more that {}KB), event discarded",
            title,
            MAX_EVENT_BYTES / 1024
        ),
    ))
}

#[derive(Debug, Clone)]
pub(crate) struct EventFormatter<'a> {
    title: String,
    text: &'a str,
    title_len: usize,
    text_len: usize,
    alert_type: Option<EventAlertType>,
    src_type: Option<&'a str>,
    timestamp: Option<u64>,
    priority: Option<EventPriority>,
    hostname: Option<&'a str>,
    aggregation_key: Option<&'a str>,
    tags: Vec<&'a str>,
    alert_tag: Option<String>,
    namespace_tag: Option<&'a str>,
    global_tags: Vec<&'a str>,
}

impl<'a> EventFormatter<'a> {
    pub(crate) fn new(namespace: &'a str, title: &str, text: &'a str) -> Self {
        let title = compose_name(namespace, title);
        // lengths in the header are code points, not bytes
        let title_len = title.chars().count();
        let text_len = text.chars().count();

        EventFormatter {
            title,
            text,
            title_len,
            text_len,
            alert_type: None,
            src_type: None,
            timestamp: None,
            priority: None,
            hostname: None,
            aggregation_key: None,
            tags: Vec::new(),
            alert_tag: None,
            namespace_tag: None,
            global_tags: Vec::new(),
        }
    }

    pub(crate) fn with_opts(&mut self, opts: &'a EventOpts) -> MetricResult<()> {
        self.alert_type = opts.alert_type;
        self.src_type = opts.source_type_name.as_deref();
        self.timestamp = opts.date_happened.map(epoch_seconds).transpose()?;
        self.priority = opts.priority;
        self.hostname = opts.host.as_deref();
        self.aggregation_key = opts.aggregation_key.as_deref();
        self.tags = opts.tags.iter().map(String::as_str).collect();
        Ok(())
    }

    /// Tags derived from the namespace, skipped entirely when there is no
    /// namespace to derive them from.
    pub(crate) fn with_namespace_tags(&mut self, namespace: &'a str, origin: EventOrigin) {
        let trimmed = trim_namespace(namespace);
        if trimmed.is_empty() {
            return;
        }

        if origin == EventOrigin::Severity {
            if let Some(alert_type) = self.alert_type {
                self.alert_tag = Some(format!("{}-{}", trimmed, alert_type));
            }
        }

        self.namespace_tag = Some(trimmed);
    }

    pub(crate) fn with_global_tags<G>(&mut self, global: &'a [G])
    where
        G: AsRef<str>,
    {
        self.global_tags = global.iter().map(AsRef::as_ref).collect();
    }

    fn validate(&self) -> MetricResult<()> {
        if self.text.len() > MAX_EVENT_BYTES {
            Err(event_too_big_error(&self.title))
        } else {
            Ok(())
        }
    }

    fn write_base_event(&self, out: &mut String) {
        let _ = write!(
            out,
            "_e{{{},{}}}:{}|{}",
            self.title_len, self.text_len, self.title, self.text
        );
    }

    fn write_fields(&self, out: &mut String) {
        if let Some(alert_type) = self.alert_type {
            let _ = write!(out, "|t:{}", alert_type);
        }

        if let Some(src_type) = self.src_type {
            let _ = write!(out, "|s:{}", src_type);
        }

        if let Some(timestamp) = self.timestamp {
            let _ = write!(out, "|d:{}", timestamp);
        }

        if let Some(priority) = self.priority {
            let _ = write!(out, "|p:{}", priority);
        }

        if let Some(hostname) = self.hostname {
            let _ = write!(out, "|h:{}", hostname);
        }

        if let Some(aggregation_key) = self.aggregation_key {
            let _ = write!(out, "|k:{}", aggregation_key);
        }
    }

    fn all_tags(&self) -> Vec<&str> {
        let mut tags = Vec::with_capacity(self.tags.len() + 2 + self.global_tags.len());
        tags.extend(self.tags.iter().copied());
        tags.extend(self.alert_tag.as_deref());
        tags.extend(self.namespace_tag);
        tags.extend(self.global_tags.iter().copied());
        tags
    }

    fn size_hint(&self, tags: &[&str]) -> usize {
        let mut size = 2 /* _e */ + 1 /* { */ + 10 /* lengths and , */ + 2 /* }: */
            + self.title.len() + 1 /* | */ + self.text.len()
            + 10 /* |t:warning */;

        if let Some(src_type) = self.src_type {
            size += 3 + src_type.len();
        }

        if self.timestamp.is_some() {
            size += 3 + 20;
        }

        if self.priority.is_some() {
            size += 3 + 6;
        }

        if let Some(hostname) = self.hostname {
            size += 3 + hostname.len();
        }

        if let Some(aggregation_key) = self.aggregation_key {
            size += 3 + aggregation_key.len();
        }

        size + tags_size_hint(tags)
    }

    pub(crate) fn format(&self) -> MetricResult<String> {
        self.validate()?;

        let tags = self.all_tags();
        let mut event_string = String::with_capacity(self.size_hint(&tags));
        self.write_base_event(&mut event_string);
        self.write_fields(&mut event_string);
        write_tags(&mut event_string, tags);
        Ok(event_string)
    }
}

/// Render an event datagram, failing if the text of the event is too big.
pub(crate) fn format_event<G>(
    namespace: &str,
    global_tags: &[G],
    title: &str,
    text: &str,
    opts: &EventOpts,
    origin: EventOrigin,
) -> MetricResult<String>
where
    G: AsRef<str>,
{
    let mut formatter = EventFormatter::new(namespace, title, text);
    formatter.with_opts(opts)?;
    formatter.with_namespace_tags(namespace, origin);
    formatter.with_global_tags(global_tags);
    formatter.format()
}

/// Options used by the severity shortcuts (`warning`, `error`, ...).
///
/// The source type defaults to the namespace without its trailing
/// separator, left unset when there is no namespace.
pub(crate) fn severity_opts<T>(namespace: &str, alert_type: EventAlertType, tags: &[T]) -> EventOpts
where
    T: AsRef<str>,
{
    let trimmed = trim_namespace(namespace);
    EventOpts {
        alert_type: Some(alert_type),
        source_type_name: if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        },
        tags: tags.iter().map(|t| t.as_ref().to_string()).collect(),
        ..EventOpts::default()
    }
}
