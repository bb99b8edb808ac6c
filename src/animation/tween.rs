//! Fire-and-forget property tweens, advanced once per rendered frame.
//!
//! Tweens address properties by key rather than by reference, so the
//! engine never borrows the scene between frames. Scheduling a tween on a key
//! that already has one replaces it: the last writer wins.

use std::fmt::Debug;

use super::easing::{ease, Easing};

/// Something whose numeric properties can be tweened
pub trait Animatable {
    type Key: Copy + Eq + Debug;

    /// Current value, or `None` if the key no longer resolves
    fn get(&self, key: Self::Key) -> Option<f32>;
    fn set(&mut self, key: Self::Key, value: f32);
}

/// Action run once a tween has written its final value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OnComplete {
    /// Overwrite the tweened property with this value
    Set(f32),
}

/// A scheduled interpolation of one property towards `to`
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<K> {
    pub key: K,
    pub to: f32,
    /// Seconds
    pub duration: f32,
    /// Seconds before the tween starts and samples its start value
    pub delay: f32,
    pub easing: Easing,
    pub on_complete: Option<OnComplete>,
}

impl<K> Tween<K> {
    pub fn to(key: K, to: f32, duration: f32) -> Self {
        Self {
            key,
            to,
            duration,
            delay: 0.0,
            easing: Easing::default(),
            on_complete: None,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_complete(mut self, action: OnComplete) -> Self {
        self.on_complete = Some(action);
        self
    }
}

#[derive(Debug, Clone)]
struct ActiveTween<K> {
    tween: Tween<K>,
    elapsed: f32,
    from: Option<f32>,
}

/// Owns every in-flight tween
#[derive(Debug, Clone)]
pub struct TweenEngine<K> {
    active: Vec<ActiveTween<K>>,
}

impl<K> Default for TweenEngine<K> {
    fn default() -> Self {
        Self { active: Vec::new() }
    }
}

impl<K: Copy + Eq + Debug> TweenEngine<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `tween`, replacing any tween on the same key
    pub fn schedule(&mut self, tween: Tween<K>) {
        let before = self.active.len();
        self.active.retain(|t| t.tween.key != tween.key);
        if self.active.len() != before {
            log::trace!("tween on {:?} overwritten", tween.key);
        }

        self.active.push(ActiveTween {
            tween,
            elapsed: 0.0,
            from: None,
        });
    }

    /// Advance all tweens by `dt` seconds and write their values into
    /// `target`. Returns how many tweens finished this frame.
    pub fn update<T>(&mut self, dt: f32, target: &mut T) -> usize
    where
        T: Animatable<Key = K>,
    {
        let mut finished = 0;

        self.active.retain_mut(|active| {
            active.elapsed += dt;
            let tween = &active.tween;
            if active.elapsed < tween.delay {
                return true;
            }

            let from = match active.from {
                Some(from) => from,
                None => match target.get(tween.key) {
                    Some(v) => *active.from.insert(v),
                    None => {
                        log::debug!("dropping tween on unresolved {:?}", tween.key);
                        return false;
                    }
                },
            };

            let progress = if tween.duration <= 0.0 {
                1.0
            } else {
                ((active.elapsed - tween.delay) / tween.duration).min(1.0)
            };

            if progress >= 1.0 {
                target.set(tween.key, tween.to);
                if let Some(OnComplete::Set(value)) = tween.on_complete {
                    target.set(tween.key, value);
                }
                finished += 1;
                return false;
            }

            let value = from + (tween.to - from) * ease(progress, tween.easing);
            target.set(tween.key, value);
            true
        });

        finished
    }

    pub fn is_animating(&self, key: K) -> bool {
        self.active.iter().any(|t| t.tween.key == key)
    }

    /// Target value of the tween in flight on `key`
    pub fn pending_target(&self, key: K) -> Option<f32> {
        self.active
            .iter()
            .find(|t| t.tween.key == key)
            .map(|t| t.tween.to)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
