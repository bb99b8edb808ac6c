//! Analog clock hand animation.
//!
//! [`advance`] is the whole decision procedure: compare the new wall-clock
//! time with the last observed one and produce the hand moves to schedule.
//! [`ClockAnimator`] wraps it with the coarse "a tick happened" flag that the
//! per-frame loop consumes.
//!
//! If the timer stalls long enough to cross several boundaries at once, only
//! the latest position is animated; intermediate positions are skipped.

use std::f32::consts::{PI, TAU};
use std::fmt::Debug;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::animation::{Easing, OnComplete, Tween, TweenEngine};

const RAD_PER_DEG: f32 = PI / 180.0;
const DEG_PER_SEC: f32 = 6.0;
const DEG_PER_MIN: f32 = 6.0;
const DEG_PER_HOUR: f32 = 30.0;

/// One of the three rotating hand groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Second,
    Minute,
    Hour,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Second, Hand::Minute, Hand::Hour];

    fn degrees_per_unit(self) -> f32 {
        match self {
            Hand::Second => DEG_PER_SEC,
            Hand::Minute => DEG_PER_MIN,
            Hand::Hour => DEG_PER_HOUR,
        }
    }

    /// Dial value this hand shows for `time`; hours use the 12-hour dial
    fn field(self, time: &NaiveTime) -> u32 {
        match self {
            Hand::Second => time.second(),
            Hand::Minute => time.minute(),
            Hand::Hour => time.hour() % 12,
        }
    }

    fn changed(self, previous: &NaiveTime, now: &NaiveTime) -> bool {
        match self {
            Hand::Second => previous.second() != now.second(),
            Hand::Minute => previous.minute() != now.minute(),
            Hand::Hour => previous.hour() != now.hour(),
        }
    }
}

/// Angle for a dial value: clockwise, so negative about +z
pub fn hand_angle(hand: Hand, value: u32) -> f32 {
    (value as f32 * -hand.degrees_per_unit()) * RAD_PER_DEG
}

/// Tween parameters shared by all hands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandTiming {
    /// Seconds per hand move; short so each move reads as a tick
    pub tween_duration: f32,
    /// How far short of a full turn a wrapping hand stops before snapping to 0
    pub zero_epsilon: f32,
    pub easing: Easing,
}

impl Default for HandTiming {
    fn default() -> Self {
        Self {
            tween_duration: 0.3,
            zero_epsilon: 0.0001,
            easing: Easing::QuadOut,
        }
    }
}

/// Last wall-clock time the hands were updated for, whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockState {
    pub previous: NaiveTime,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockState {
    /// Starts at midnight so the first real observation registers a change
    pub fn new() -> Self {
        Self {
            previous: NaiveTime::MIN,
        }
    }
}

/// A rotation tween the animator wants scheduled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandMove {
    pub hand: Hand,
    /// Target rotation about z, radians
    pub target: f32,
    pub duration: f32,
    pub easing: Easing,
    /// Set the rotation to exactly 0 once the tween lands
    pub snap_to_zero: bool,
}

impl HandMove {
    fn new(hand: Hand, value: u32, timing: &HandTiming) -> Self {
        let angle = hand_angle(hand, value);

        // Tweening from near -2π straight to 0 would sweep the hand backwards
        // a full turn; stop just short of -2π and jump to 0 instead.
        let (target, snap_to_zero) = if angle == 0.0 {
            (-(TAU - timing.zero_epsilon), true)
        } else {
            (angle, false)
        };

        Self {
            hand,
            target,
            duration: timing.tween_duration,
            easing: timing.easing,
            snap_to_zero,
        }
    }

    pub fn into_tween<K>(self, key: K) -> Tween<K> {
        let tween = Tween::to(key, self.target, self.duration).with_easing(self.easing);
        if self.snap_to_zero {
            tween.on_complete(OnComplete::Set(0.0))
        } else {
            tween
        }
    }
}

/// Decide which hands move for the observation `now`.
///
/// Seconds are checked first; minutes only if seconds changed, hours only if
/// minutes changed. The returned state always records `now`.
pub fn advance(state: ClockState, now: NaiveTime, timing: &HandTiming) -> (ClockState, Vec<HandMove>) {
    let now = now.with_nanosecond(0).unwrap_or(now);
    let mut moves = Vec::new();

    for hand in Hand::ALL {
        if !hand.changed(&state.previous, &now) {
            break;
        }
        moves.push(HandMove::new(hand, hand.field(&now), timing));
    }

    (ClockState { previous: now }, moves)
}

/// Drives the three hands from a coarse timer.
///
/// The timer only calls [`ClockAnimator::tick`]; the render loop calls
/// [`ClockAnimator::apply_if_ticked`] once per frame, so several coalesced
/// ticks still cause at most one update.
#[derive(Debug, Clone)]
pub struct ClockAnimator {
    state: ClockState,
    timing: HandTiming,
    ticked: bool,
}

impl ClockAnimator {
    pub fn new(timing: HandTiming) -> Self {
        Self {
            state: ClockState::new(),
            timing,
            ticked: false,
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Flag that a timer period elapsed
    pub fn tick(&mut self) {
        self.ticked = true;
    }

    pub fn is_ticked(&self) -> bool {
        self.ticked
    }

    /// Update the hands if a tick is pending, then clear the flag.
    /// Returns the number of hand tweens scheduled.
    pub fn apply_if_ticked<K, F>(&mut self, now: NaiveTime, tweens: &mut TweenEngine<K>, key_of: F) -> usize
    where
        K: Copy + Eq + Debug,
        F: Fn(Hand) -> K,
    {
        if !self.ticked {
            return 0;
        }
        self.ticked = false;
        self.update_hands(now, tweens, key_of)
    }

    /// Update the hands for `now` unconditionally
    pub fn update_hands<K, F>(&mut self, now: NaiveTime, tweens: &mut TweenEngine<K>, key_of: F) -> usize
    where
        K: Copy + Eq + Debug,
        F: Fn(Hand) -> K,
    {
        let gap = now.signed_duration_since(self.state.previous).num_seconds();
        let (state, moves) = advance(self.state, now, &self.timing);

        if moves.is_empty() {
            log::trace!("clock tick at {} with no change", now);
        } else if gap > 1 && self.state.previous != NaiveTime::MIN {
            log::debug!("clock tick {}s after the previous one; intermediate positions skipped", gap);
        }
        self.state = state;

        for mv in &moves {
            if mv.snap_to_zero {
                log::debug!("{:?} hand wrapping past 12", mv.hand);
            }
            tweens.schedule(mv.into_tween(key_of(mv.hand)));
        }

        moves.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Animatable;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn timing() -> HandTiming {
        HandTiming::default()
    }

    #[test]
    fn test_initial_state_is_midnight() {
        assert_eq!(ClockState::new().previous, t(0, 0, 0));
    }

    #[test]
    fn test_same_second_schedules_nothing() {
        let state = ClockState { previous: t(10, 20, 30) };
        let (next, moves) = advance(state, t(10, 20, 30), &timing());
        assert!(moves.is_empty());
        assert_eq!(next.previous, t(10, 20, 30));
    }

    #[test]
    fn test_new_second_moves_second_hand_only() {
        let state = ClockState { previous: t(10, 20, 30) };
        let (_, moves) = advance(state, t(10, 20, 31), &timing());
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].hand, Hand::Second);
        assert!((moves[0].target - (-31.0 * 6.0_f32).to_radians()).abs() < 1e-5);
        assert!(!moves[0].snap_to_zero);
    }

    #[test]
    fn test_minute_boundary_moves_second_and_minute() {
        let state = ClockState { previous: t(10, 20, 59) };
        let (_, moves) = advance(state, t(10, 21, 1), &timing());
        let hands: Vec<Hand> = moves.iter().map(|m| m.hand).collect();
        assert_eq!(hands, vec![Hand::Second, Hand::Minute]);
        assert!((moves[1].target - hand_angle(Hand::Minute, 21)).abs() < 1e-6);
    }

    #[test]
    fn test_minute_change_ignored_without_second_change() {
        // Exactly one minute later: the seconds field did not change
        let state = ClockState { previous: t(10, 20, 15) };
        let (_, moves) = advance(state, t(10, 21, 15), &timing());
        assert!(moves.is_empty());
    }

    #[test]
    fn test_hour_boundary_moves_all_hands() {
        let state = ClockState { previous: t(14, 59, 59) };
        let (_, moves) = advance(state, t(15, 0, 0), &timing());
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[2].hand, Hand::Hour);
        assert!((moves[2].target - hand_angle(Hand::Hour, 3)).abs() < 1e-6);
        assert!((moves[2].target + 90f32.to_radians()).abs() < 1e-5);
    }

    #[test]
    fn test_zero_crossing_targets_just_short_of_full_turn() {
        let state = ClockState { previous: t(9, 30, 59) };
        let (_, moves) = advance(state, t(9, 31, 0), &timing());

        let sec = moves[0];
        assert_eq!(sec.hand, Hand::Second);
        assert!(sec.snap_to_zero);
        assert_eq!(sec.target, -(TAU - 0.0001));

        let tween = sec.into_tween("second");
        assert_eq!(tween.on_complete, Some(OnComplete::Set(0.0)));
    }

    #[test]
    fn test_noon_wraps_hour_hand() {
        let state = ClockState { previous: t(11, 59, 59) };
        let (_, moves) = advance(state, t(12, 0, 0), &timing());
        assert_eq!(moves.len(), 3);
        assert!(moves.iter().all(|m| m.snap_to_zero));
        assert_eq!(moves[2].hand, Hand::Hour);
    }

    #[test]
    fn test_sub_second_precision_is_truncated() {
        let now = NaiveTime::from_hms_milli_opt(8, 0, 5, 750).unwrap();
        let (state, _) = advance(ClockState::new(), now, &timing());
        assert_eq!(state.previous, t(8, 0, 5));
    }

    struct Rotations([f32; 3]);

    impl Animatable for Rotations {
        type Key = Hand;

        fn get(&self, key: Hand) -> Option<f32> {
            Some(self.0[key as usize])
        }

        fn set(&mut self, key: Hand, value: f32) {
            self.0[key as usize] = value;
        }
    }

    #[test]
    fn test_animator_applies_only_after_tick() {
        let mut animator = ClockAnimator::new(timing());
        let mut engine = TweenEngine::new();

        assert_eq!(animator.apply_if_ticked(t(3, 15, 20), &mut engine, |h| h), 0);
        assert!(engine.is_empty());

        animator.tick();
        animator.tick();
        assert_eq!(animator.apply_if_ticked(t(3, 15, 20), &mut engine, |h| h), 3);
        assert!(!animator.is_ticked());
        assert_eq!(animator.apply_if_ticked(t(3, 15, 21), &mut engine, |h| h), 0);
    }

    #[test]
    fn test_wrapping_second_hand_ends_at_zero() {
        let mut animator = ClockAnimator::new(timing());
        let mut engine = TweenEngine::new();
        let mut rotations = Rotations([hand_angle(Hand::Second, 59), 0.0, 0.0]);

        animator.update_hands(t(0, 0, 59), &mut engine, |h| h);
        engine.update(1.0, &mut rotations);

        animator.update_hands(t(0, 1, 0), &mut engine, |h| h);
        engine.update(0.15, &mut rotations);
        // Mid-tween the hand keeps going clockwise towards -2π
        assert!(rotations.0[0] < hand_angle(Hand::Second, 59));

        engine.update(0.2, &mut rotations);
        assert_eq!(rotations.0[0], 0.0);
    }

    fn wrap_hour(before: NaiveTime, after: NaiveTime) -> Rotations {
        let mut animator = ClockAnimator::new(timing());
        let mut engine = TweenEngine::new();
        let mut rotations = Rotations([0.0; 3]);

        animator.update_hands(before, &mut engine, |h| h);
        engine.update(1.0, &mut rotations);
        assert_eq!(rotations.0[Hand::Hour as usize], hand_angle(Hand::Hour, 11));

        animator.update_hands(after, &mut engine, |h| h);
        engine.update(1.0, &mut rotations);
        rotations
    }

    #[test]
    fn test_hour_wrap_at_noon_snaps_only_hour_hand() {
        // A stalled timer: the minute hand lands on 1 while the hour wraps
        let rotations = wrap_hour(t(11, 58, 59), t(12, 1, 0));
        assert_eq!(rotations.0[Hand::Hour as usize], 0.0);
        assert_eq!(rotations.0[Hand::Minute as usize], hand_angle(Hand::Minute, 1));
        assert_eq!(rotations.0[Hand::Second as usize], 0.0);
    }

    #[test]
    fn test_hour_wrap_at_midnight_snaps_only_hour_hand() {
        let rotations = wrap_hour(t(23, 58, 59), t(0, 2, 0));
        assert_eq!(rotations.0[Hand::Hour as usize], 0.0);
        assert_eq!(rotations.0[Hand::Minute as usize], hand_angle(Hand::Minute, 2));

        let rotations = wrap_hour(t(23, 59, 59), t(0, 0, 0));
        assert_eq!(rotations.0, [0.0; 3]);
    }
}
