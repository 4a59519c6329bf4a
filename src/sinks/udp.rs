// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use crate::sinks::core::{MetricSink, SinkStats, SocketStats};
use crate::types::{ErrorKind, MetricError, MetricResult};

/// Resolve the agent address, keeping only the first address it yields.
fn get_addr<A: ToSocketAddrs>(addr: A) -> MetricResult<SocketAddr> {
    addr.to_socket_addrs()?.next().ok_or_else(|| {
        MetricError::from((ErrorKind::InvalidInput, "agent address resolved to nothing"))
    })
}

/// Sink that writes each DogStatsD datagram to an agent over UDP.
///
/// Every call to `.emit()` is a single `send_to` on the caller's thread.
/// Nothing is buffered or retried: a failed write is returned to the caller
/// and counted as dropped in `stats()`. This is the sink behind
/// `StatsdClient::from_udp_host`.
#[derive(Debug)]
pub struct UdpMetricSink {
    addr: SocketAddr,
    socket: UdpSocket,
    stats: SocketStats,
}

impl UdpMetricSink {
    /// Create a sink writing to the agent at `to_addr` through `socket`.
    ///
    /// The socket is used as given: bind it and pick blocking or
    /// non-blocking mode before handing it over. The address is resolved
    /// once, here.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::net::UdpSocket;
    /// use dogstatsd::{StatsdClient, UdpMetricSink, DEFAULT_PORT};
    ///
    /// let socket = UdpSocket::bind("0.0.0.0:0").unwrap();
    /// socket.set_nonblocking(true).unwrap();
    /// let sink = UdpMetricSink::from(("agent.example.com", DEFAULT_PORT), socket).unwrap();
    /// let client = StatsdClient::builder(sink).with_namespace("my.app.").build();
    /// ```
    ///
    /// # Failures
    ///
    /// Returns an `IoError` if the agent's hostname cannot be resolved, or
    /// an `InvalidInput` error if it resolves to no address at all.
    pub fn from<A>(to_addr: A, socket: UdpSocket) -> MetricResult<UdpMetricSink>
    where
        A: ToSocketAddrs,
    {
        let addr = get_addr(to_addr)?;
        let stats = SocketStats::default();
        Ok(UdpMetricSink { addr, socket, stats })
    }

    /// Address datagrams are sent to.
    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }
}

impl MetricSink for UdpMetricSink {
    fn emit(&self, metric: &str) -> io::Result<usize> {
        self.stats
            .update(self.socket.send_to(metric.as_bytes(), self.addr), metric.len())
    }

    fn stats(&self) -> SinkStats {
        (&self.stats).into()
    }
}
