//! When does a drawing get matched?
//!
//! A small state machine driven by the session: strokes starting and
//! finishing, explicit requests, and the host's clock via [`RecognitionTrigger::poll`].
//! A pending delay is just a deadline inside `ArmedDelay`; cancelling it is
//! a state change, so a stale timer can never fire.

use std::time::Instant;

use super::config::AutoMatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    /// A stroke is being drawn.
    PendingStroke,
    /// A stroke just finished; match once `deadline` passes.
    ArmedDelay { deadline: Instant },
    /// A match request is in flight.
    Matching,
}

#[derive(Debug)]
pub struct RecognitionTrigger {
    state: TriggerState,
    policy: AutoMatch,
}

impl RecognitionTrigger {
    pub fn new(policy: AutoMatch) -> RecognitionTrigger {
        RecognitionTrigger {
            state: TriggerState::Idle,
            policy,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn policy(&self) -> AutoMatch {
        self.policy
    }

    /// Takes effect from the next finished stroke; an armed delay keeps its deadline.
    pub fn set_policy(&mut self, policy: AutoMatch) {
        self.policy = policy;
    }

    /// A new stroke starts. Cancels any pending delay.
    pub fn begin_stroke(&mut self) {
        if self.state != TriggerState::Matching {
            self.state = TriggerState::PendingStroke;
        }
    }

    /// A stroke was committed at `now`. Returns true if matching should start right away.
    pub fn finish_stroke(&mut self, now: Instant) -> bool {
        if self.state == TriggerState::Matching {
            return false;
        }
        self.state = match self.policy {
            AutoMatch::Manual => TriggerState::Idle,
            AutoMatch::Immediate => TriggerState::Matching,
            AutoMatch::After(delay) => TriggerState::ArmedDelay { deadline: now + delay },
        };
        self.state == TriggerState::Matching
    }

    /// The in-progress stroke went away without being committed.
    pub fn abandon_stroke(&mut self) {
        if self.state == TriggerState::PendingStroke {
            self.state = TriggerState::Idle;
        }
    }

    /// Check an armed delay against the clock. Returns true if it fired,
    /// in which case the trigger is now `Matching`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            TriggerState::ArmedDelay { deadline } if now >= deadline => {
                self.state = TriggerState::Matching;
                true
            }
            _ => false,
        }
    }

    /// Explicit request: match now, dropping any pending delay.
    /// Returns false if a match is already in flight.
    pub fn request(&mut self) -> bool {
        if self.state == TriggerState::Matching {
            return false;
        }
        self.state = TriggerState::Matching;
        true
    }

    /// The in-flight match finished, with or without results.
    pub fn complete(&mut self) {
        if self.state == TriggerState::Matching {
            self.state = TriggerState::Idle;
        }
    }

    /// Back to `Idle`, whatever was pending.
    pub fn reset(&mut self) {
        self.state = TriggerState::Idle;
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            TriggerState::ArmedDelay { deadline } => Some(deadline),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_immediate() {
        let mut trigger = RecognitionTrigger::new(AutoMatch::Immediate);
        trigger.begin_stroke();
        assert_eq!(trigger.state(), TriggerState::PendingStroke);
        assert!(trigger.finish_stroke(Instant::now()));
        assert_eq!(trigger.state(), TriggerState::Matching);
        trigger.complete();
        assert_eq!(trigger.state(), TriggerState::Idle);
    }

    #[test]
    fn test_manual() {
        let mut trigger = RecognitionTrigger::new(AutoMatch::Manual);
        let now = Instant::now();
        trigger.begin_stroke();
        assert!(!trigger.finish_stroke(now));
        assert_eq!(trigger.state(), TriggerState::Idle);
        assert!(!trigger.poll(now + Duration::from_secs(60)));
        assert!(trigger.request());
        assert_eq!(trigger.state(), TriggerState::Matching);
    }

    #[test]
    fn test_delay_fires_at_deadline() {
        let mut trigger = RecognitionTrigger::new(AutoMatch::After(Duration::from_millis(500)));
        let now = Instant::now();
        trigger.begin_stroke();
        assert!(!trigger.finish_stroke(now));
        assert_eq!(trigger.deadline(), Some(now + Duration::from_millis(500)));
        assert!(!trigger.poll(now + Duration::from_millis(499)));
        assert!(trigger.poll(now + Duration::from_millis(500)));
        assert_eq!(trigger.state(), TriggerState::Matching);
        // Fires once
        assert!(!trigger.poll(now + Duration::from_millis(900)));
    }

    #[test]
    fn test_new_stroke_cancels_delay() {
        let mut trigger = RecognitionTrigger::new(AutoMatch::After(Duration::from_millis(500)));
        let now = Instant::now();
        trigger.begin_stroke();
        trigger.finish_stroke(now);
        trigger.begin_stroke();
        assert_eq!(trigger.deadline(), None);
        assert!(!trigger.poll(now + Duration::from_secs(5)));
        assert_eq!(trigger.state(), TriggerState::PendingStroke);
    }

    #[test]
    fn test_request_cancels_delay() {
        let mut trigger = RecognitionTrigger::new(AutoMatch::After(Duration::from_millis(500)));
        let now = Instant::now();
        trigger.finish_stroke(now);
        assert!(trigger.request());
        trigger.complete();
        assert!(!trigger.poll(now + Duration::from_secs(1)));
        assert_eq!(trigger.state(), TriggerState::Idle);
    }

    #[test]
    fn test_no_overlapping_requests() {
        let mut trigger = RecognitionTrigger::new(AutoMatch::Immediate);
        assert!(trigger.request());
        assert!(!trigger.request());
        assert!(!trigger.finish_stroke(Instant::now()));
        trigger.complete();
        assert!(trigger.request());
    }
}
