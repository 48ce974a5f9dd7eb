//! Perturbation input feed.
//!
//! Events carry a target hand and two modifiers. On a pointer host these
//! are the shift (boost) and ctrl (invert) keys held during a click; the
//! `clockdyn` binary reads them as short text commands instead:
//!
//! | command | hand   | amplitude | direction |
//! |---------|--------|-----------|-----------|
//! | `s`     | second | low       | positive  |
//! | `M`     | minute | high      | positive  |
//! | `-h`    | hour   | low       | negative  |
//! | `-S`    | second | high      | negative  |

use std::io::BufRead;
use std::thread::{self, JoinHandle};

use bitflags::bitflags;
use clockdyn_common::hand::HandKind;
use tracing::{debug, warn};

use crate::perturbation::{Amplitude, Direction, PerturbationInbox};

/// Shown once at startup.
pub const USAGE_HINT: &str = "Type s/m/h + Enter to push the second/minute/hour hand; \
uppercase for a stronger push, a leading '-' to push backwards.";

bitflags! {
    /// Modifiers attached to a perturbation event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PerturbModifiers: u8 {
        /// Select the high amplitude.
        const BOOST  = 0x01;
        /// Push counter-clockwise.
        const INVERT = 0x02;
    }
}

/// One user perturbation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerturbationEvent {
    /// Target hand.
    pub hand: HandKind,
    /// Amplitude and direction modifiers.
    pub modifiers: PerturbModifiers,
}

impl PerturbationEvent {
    /// Create an event.
    pub const fn new(hand: HandKind, modifiers: PerturbModifiers) -> Self {
        Self { hand, modifiers }
    }

    /// Amplitude class selected by `BOOST`.
    #[inline]
    pub fn amplitude(&self) -> Amplitude {
        if self.modifiers.contains(PerturbModifiers::BOOST) {
            Amplitude::High
        } else {
            Amplitude::Low
        }
    }

    /// Direction selected by `INVERT`.
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.modifiers.contains(PerturbModifiers::INVERT) {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }

    /// Queue this event into an inbox.
    pub fn post(&self, inbox: &PerturbationInbox) {
        inbox.post(self.hand, self.amplitude(), self.direction());
    }
}

/// Parse one text command. Returns `None` for anything unrecognised.
pub fn parse_command(line: &str) -> Option<PerturbationEvent> {
    let cmd = line.trim();
    let (invert, rest) = match cmd.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cmd),
    };

    let mut chars = rest.chars();
    let letter = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let hand = match letter.to_ascii_lowercase() {
        's' => HandKind::Second,
        'm' => HandKind::Minute,
        'h' => HandKind::Hour,
        _ => return None,
    };

    let mut modifiers = PerturbModifiers::empty();
    modifiers.set(PerturbModifiers::BOOST, letter.is_ascii_uppercase());
    modifiers.set(PerturbModifiers::INVERT, invert);
    Some(PerturbationEvent::new(hand, modifiers))
}

/// Feed every parsed line of `reader` into `inbox` on a background thread.
///
/// The thread ends at end of input or on a read error.
pub fn spawn_line_reader<R>(reader: R, inbox: PerturbationInbox) -> std::io::Result<JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("clockdyn-input".into())
        .spawn(move || {
            for line in reader.lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        warn!("Input reader stopped: {e}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(event) => event.post(&inbox),
                    None => debug!("Ignoring input {:?}", line.trim()),
                }
            }
        })
}

// ─── Tests ──────────────────────────────────────────────────────────
