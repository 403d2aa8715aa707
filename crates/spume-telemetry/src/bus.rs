//! Event bus with pluggable sinks.
//!
//! Collision passes and the bench runner push [`TickEvent`]s through an
//! `std::sync::mpsc` channel; sinks only see them when the driver calls
//! [`EventBus::flush`], so no sink I/O ever lands inside a tick.

use std::sync::mpsc;

use crate::events::TickEvent;
use crate::sinks::EventSink;

/// Collision telemetry bus.
///
/// One bus per process is the expected shape: build it at startup,
/// register sinks once, flush at tick boundaries, finalize at shutdown.
pub struct EventBus {
    tx: mpsc::Sender<TickEvent>,
    rx: mpsc::Receiver<TickEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
}

impl EventBus {
    /// Creates a bus with no sinks registered.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink. Every flushed event reaches every sink.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables emission. A disabled bus drops events.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the bus currently accepts events.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event for the next flush.
    ///
    /// Cheap enough to call from timing-sensitive code; the event just
    /// crosses the channel. A send failure means the receiver half is
    /// gone, which cannot happen while the bus owns it, so the result
    /// is ignored.
    pub fn emit(&self, event: TickEvent) {
        if self.enabled {
            let _ = self.tx.send(event);
        }
    }

    /// Drains every queued event into the registered sinks.
    ///
    /// Returns how many events were dispatched.
    pub fn flush(&mut self) -> usize {
        let mut dispatched = 0;
        while let Ok(event) = self.rx.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            dispatched += 1;
        }
        dispatched
    }

    /// Flushes, then finalizes every sink. Call once at shutdown.
    pub fn finalize(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
