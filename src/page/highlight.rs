use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time between two border toggles
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Total time the link blinks before it is opened
pub const BLINK_DURATION: Duration = Duration::from_millis(3000);

/// Number of border toggles within [`BLINK_DURATION`]
pub const BLINK_TICKS: u32 = (BLINK_DURATION.as_millis() / BLINK_INTERVAL.as_millis()) as u32;

/// Stages of one highlight-and-open run inside the page
///
/// ```text
/// Searching -> Done                                  (no matching anchor)
/// Searching -> Found -> Scrolling -> Blinking(1..=6)
///           -> Cleared -> Opened -> Done
/// ```
///
/// The page executes this sequence on its own timers, ticking through
/// [`blink_pattern`], so nothing on the caller side can interrupt it once
/// `Found` is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightState {
    Searching,
    Found,
    Scrolling,
    Blinking { tick: u32 },
    Cleared,
    Opened,
    Done,
}

impl HighlightState {
    /// Next stage; `found` only matters when leaving `Searching`
    pub fn advance(self, found: bool) -> Self {
        match self {
            HighlightState::Searching if found => HighlightState::Found,
            HighlightState::Searching => HighlightState::Done,
            HighlightState::Found => HighlightState::Scrolling,
            HighlightState::Scrolling => HighlightState::Blinking { tick: 1 },
            HighlightState::Blinking { tick } if tick < BLINK_TICKS => HighlightState::Blinking { tick: tick + 1 },
            HighlightState::Blinking { .. } => HighlightState::Cleared,
            HighlightState::Cleared => HighlightState::Opened,
            HighlightState::Opened | HighlightState::Done => HighlightState::Done,
        }
    }

    /// Whether the red border is drawn in this stage (odd ticks turn it on)
    pub fn border_visible(&self) -> bool {
        matches!(self, HighlightState::Blinking { tick } if tick % 2 == 1)
    }

    pub fn is_done(&self) -> bool {
        *self == HighlightState::Done
    }
}

/// Border state after each blink tick of a found link, in tick order
///
/// This is what the page script plays back: one entry per interval, and the
/// link is cleared and opened on the last one.
pub fn blink_pattern() -> Vec<bool> {
    HighlightOutcome::Scheduled
        .trace()
        .iter()
        .filter(|s| matches!(s, HighlightState::Blinking { .. }))
        .map(HighlightState::border_visible)
        .collect()
}

/// What the page reported back when the highlight request arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightOutcome {
    /// No anchor with that exact href; nothing changed on the page
    NotFound,
    /// The anchor was found and the blink-then-open sequence is running
    Scheduled,
}

impl HighlightOutcome {
    pub fn from_found(found: bool) -> Self {
        if found { HighlightOutcome::Scheduled } else { HighlightOutcome::NotFound }
    }

    pub fn found(&self) -> bool {
        *self == HighlightOutcome::Scheduled
    }

    /// Every stage the page walks through for this outcome, ending in `Done`
    pub fn trace(&self) -> Vec<HighlightState> {
        let found = self.found();
        let mut state = HighlightState::Searching;
        let mut states = vec![state];
        while !state.is_done() {
            state = state.advance(found);
            states.push(state);
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_count() {
        assert_eq!(BLINK_TICKS, 6);
    }

    #[test]
    fn test_not_found_goes_straight_to_done() {
        assert_eq!(
            HighlightOutcome::NotFound.trace(),
            vec![HighlightState::Searching, HighlightState::Done]
        );
    }

    #[test]
    fn test_found_sequence() {
        let trace = HighlightOutcome::Scheduled.trace();

        assert_eq!(trace.first(), Some(&HighlightState::Searching));
        assert_eq!(trace[1..4], [HighlightState::Found, HighlightState::Scrolling, HighlightState::Blinking { tick: 1 }]);
        assert_eq!(
            trace.iter().filter(|s| matches!(s, HighlightState::Blinking { .. })).count(),
            BLINK_TICKS as usize
        );
        assert_eq!(trace[trace.len() - 3..], [HighlightState::Cleared, HighlightState::Opened, HighlightState::Done]);
    }

    #[test]
    fn test_border_alternates() {
        assert_eq!(blink_pattern(), vec![true, false, true, false, true, false]);
    }

    #[test]
    fn test_pattern_spans_the_blink_duration() {
        let pattern = blink_pattern();

        assert_eq!(pattern.len(), BLINK_TICKS as usize);
        assert_eq!(BLINK_INTERVAL * pattern.len() as u32, BLINK_DURATION);
        assert_eq!(pattern.last(), Some(&HighlightState::Cleared.border_visible()));
    }

    #[test]
    fn test_done_is_terminal() {
        assert_eq!(HighlightState::Done.advance(true), HighlightState::Done);
        assert_eq!(HighlightState::Done.advance(false), HighlightState::Done);
    }
}
