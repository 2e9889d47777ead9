//! Message encoder and keying sequencer
//!
//! [`MessageEncoder`] walks an identification string and yields the timed
//! [`KeyEvent`] sequence. [`play`] and [`play_async`] execute such a
//! sequence on a key output and a delay, strictly in order.

use core::str::Chars;

use embedded_hal::delay::DelayNs;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

use crate::hal::OutputKey;
use crate::timing::TimingProfile;
use crate::types::{KeyEvent, Mark, Symbol};

/// Position inside the pattern of the character being sent
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    KeyDown,
    Hold,
    KeyUp,
    MarkGap,
    CharGap,
}

#[derive(Copy, Clone, Debug)]
struct PatternCursor {
    marks: &'static [Mark],
    index: usize,
    step: Step,
}

impl PatternCursor {
    fn new(marks: &'static [Mark]) -> Self {
        Self { marks, index: 0, step: Step::KeyDown }
    }

    /// Emit the next event of this character, or `None` once it is complete
    fn advance(&mut self, profile: &TimingProfile) -> Option<KeyEvent> {
        let mark = *self.marks.get(self.index)?;
        let event = match self.step {
            Step::KeyDown => {
                self.step = Step::Hold;
                KeyEvent::Key(true)
            }
            Step::Hold => {
                self.step = Step::KeyUp;
                KeyEvent::Wait(profile.duration_of(mark))
            }
            Step::KeyUp => {
                self.step = Step::MarkGap;
                KeyEvent::Key(false)
            }
            Step::MarkGap => {
                self.step = if self.index + 1 < self.marks.len() {
                    self.index += 1;
                    Step::KeyDown
                } else {
                    Step::CharGap
                };
                KeyEvent::Wait(profile.inter_mark_gap)
            }
            Step::CharGap => {
                // Past the last mark: the cursor is exhausted from now on
                self.index = self.marks.len();
                KeyEvent::Wait(profile.inter_char_gap)
            }
        };
        Some(event)
    }
}

/// Lazy encoder over one identification string.
///
/// The traversal cursor lives here and nowhere else, so every encoder starts
/// from the beginning and two encoders over the same input yield identical
/// sequences.
#[derive(Clone, Debug)]
pub struct MessageEncoder<'a> {
    chars: Chars<'a>,
    profile: TimingProfile,
    current: Option<PatternCursor>,
}

impl<'a> MessageEncoder<'a> {
    /// Create new encoder for `message` with the given timing
    pub fn new(message: &'a str, profile: TimingProfile) -> Self {
        Self {
            chars: message.chars(),
            profile,
            current: None,
        }
    }

    /// Timing used by this encoder
    pub fn profile(&self) -> &TimingProfile {
        &self.profile
    }
}

impl Iterator for MessageEncoder<'_> {
    type Item = KeyEvent;

    fn next(&mut self) -> Option<KeyEvent> {
        loop {
            if let Some(cursor) = self.current.as_mut() {
                if let Some(event) = cursor.advance(&self.profile) {
                    return Some(event);
                }
                self.current = None;
            }

            let symbol = Symbol::classify(self.chars.next()?);
            match symbol {
                Symbol::Space => return Some(KeyEvent::Wait(self.profile.inter_word_gap)),
                Symbol::Unsupported => continue,
                Symbol::Letter(_) | Symbol::Digit(_) | Symbol::Slash => {
                    if let Some(marks) = symbol.pattern() {
                        self.current = Some(PatternCursor::new(marks));
                    }
                }
            }
        }
    }
}

/// Execute a key event sequence on blocking ports.
///
/// Stops at the first key output failure and returns it.
pub fn play<I, K, D>(events: I, key: &mut K, delay: &mut D) -> Result<(), K::Error>
where
    I: IntoIterator<Item = KeyEvent>,
    K: OutputKey,
    D: DelayNs,
{
    for event in events {
        #[cfg(feature = "defmt")]
        defmt::trace!("event: {:?}", event);

        match event {
            KeyEvent::Key(state) => key.set_state(state)?,
            KeyEvent::Wait(ms) => delay.delay_ms(ms),
        }
    }
    Ok(())
}

/// Execute a key event sequence with an async delay
pub async fn play_async<I, K, D>(events: I, key: &mut K, delay: &mut D) -> Result<(), K::Error>
where
    I: IntoIterator<Item = KeyEvent>,
    K: OutputKey,
    D: AsyncDelayNs,
{
    for event in events {
        match event {
            KeyEvent::Key(state) => key.set_state(state)?,
            KeyEvent::Wait(ms) => delay.delay_ms(ms).await,
        }
    }
    Ok(())
}

/// Encode `message` and send it on the given ports
pub fn send_message<K, D>(
    message: &str,
    profile: TimingProfile,
    key: &mut K,
    delay: &mut D,
) -> Result<(), K::Error>
where
    K: OutputKey,
    D: DelayNs,
{
    play(MessageEncoder::new(message, profile), key, delay)
}

/// Total time spent sending `message`, in milliseconds
pub fn message_duration_ms(message: &str, profile: TimingProfile) -> u64 {
    MessageEncoder::new(message, profile)
        .map(|event| u64::from(event.wait_ms()))
        .sum()
}
