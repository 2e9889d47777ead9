//! Test utilities for beacon core functionality
//!
//! A [`Timeline`] records every key transition and every requested wait in
//! the order they happen. [`RecordingKey`] and [`RecordingDelay`] write into
//! the same timeline, so the recorded sequence is exactly what the hardware
//! would have seen, without blocking.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use heapless::String;

use crate::hal::{HalError, OutputKey};
use crate::types::KeyEvent;

/// Shared, ordered record of key events
#[derive(Clone, Default, Debug)]
pub struct Timeline {
    inner: Rc<RefCell<Vec<KeyEvent>>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key output and delay both recording into this timeline
    pub fn ports(&self) -> (RecordingKey, RecordingDelay) {
        (
            RecordingKey { timeline: self.clone(), state: false },
            RecordingDelay { timeline: self.clone() },
        )
    }

    fn push(&self, event: KeyEvent) {
        self.inner.borrow_mut().push(event);
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<KeyEvent> {
        self.inner.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Only the `Key` transitions
    pub fn transitions(&self) -> Vec<bool> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|event| match event {
                KeyEvent::Key(state) => Some(*state),
                KeyEvent::Wait(_) => None,
            })
            .collect()
    }

    /// Only the requested wait durations
    pub fn waits(&self) -> Vec<u32> {
        self.inner
            .borrow()
            .iter()
            .filter_map(|event| match event {
                KeyEvent::Wait(ms) => Some(*ms),
                KeyEvent::Key(_) => None,
            })
            .collect()
    }

    /// Total simulated time in milliseconds
    pub fn total_ms(&self) -> u64 {
        self.inner.borrow().iter().map(|e| u64::from(e.wait_ms())).sum()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    /// Render the keyed output as dots and dashes.
    ///
    /// Key-down periods up to one `unit` are dits, longer ones dahs. Key-up
    /// periods of 3 to 5 units separate characters (`' '`), 6 units or more
    /// separate words (`" / "`).
    pub fn to_morse_string(&self, unit: u32) -> String<256> {
        let mut result = String::new();
        let mut key_down = false;
        let mut held = 0u32;
        let mut gap = 0u32;

        for event in self.inner.borrow().iter() {
            match *event {
                KeyEvent::Key(true) if !key_down => {
                    if !result.is_empty() {
                        push_gap(&mut result, gap, unit);
                    }
                    key_down = true;
                    held = 0;
                }
                KeyEvent::Key(false) if key_down => {
                    let mark = if held <= unit { '.' } else { '-' };
                    result.push(mark).ok();
                    key_down = false;
                    gap = 0;
                }
                KeyEvent::Key(_) => {}
                KeyEvent::Wait(ms) if key_down => held += ms,
                KeyEvent::Wait(ms) => gap += ms,
            }
        }
        result
    }
}

fn push_gap<const N: usize>(result: &mut String<N>, gap: u32, unit: u32) {
    if gap >= unit * 6 {
        result.push_str(" / ").ok();
    } else if gap >= unit * 3 {
        result.push(' ').ok();
    }
}

/// Key output recording into a [`Timeline`]
#[derive(Debug)]
pub struct RecordingKey {
    timeline: Timeline,
    state: bool,
}

impl OutputKey for RecordingKey {
    type Error = HalError;

    fn set_state(&mut self, state: bool) -> Result<(), Self::Error> {
        self.state = state;
        self.timeline.push(KeyEvent::Key(state));
        Ok(())
    }

    fn get_state(&self) -> Result<bool, Self::Error> {
        Ok(self.state)
    }
}

/// Fake clock: records requested durations instead of blocking.
///
/// Sub-millisecond requests round up to the next whole millisecond, so a
/// nonzero delay never shows up as `Wait(0)`.
#[derive(Debug)]
pub struct RecordingDelay {
    timeline: Timeline,
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.push(KeyEvent::Wait(ns.div_ceil(1_000_000)));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timeline.push(KeyEvent::Wait(ms));
    }
}

impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.timeline.push(KeyEvent::Wait(ns.div_ceil(1_000_000)));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.timeline.push(KeyEvent::Wait(ms));
    }
}
