//! Decorative leaf sprites scattered over the clock face and hands.
//!
//! Leaves are placed once when the scene is populated. Each one starts
//! invisible and gets a single fade-in tween with its own delay, so the
//! scene fills in gradually.

use std::f32::consts::{FRAC_PI_6, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::animation::{Easing, Tween};
use crate::color::Color;
use crate::config::Span;
use crate::math::Vec3;
use crate::random::Random;

/// A single leaf sprite
#[derive(Debug, Clone, PartialEq)]
pub struct Ornament {
    pub position: Vec3,
    /// Uniform scale relative to the base sprite size
    pub scale: f32,
    /// In-plane rotation; 0 points the leaf tip along +x
    pub rotation: f32,
    pub color: Color,
    pub opacity: f32,
}

impl Ornament {
    /// Floats per leaf in [`Ornament::particle_data`]
    pub const STRIDE: usize = 9;

    /// Vertex data for GPU upload.
    /// Layout: position(3) + scale(1) + rotation(1) + opacity(1) + color(3)
    pub fn particle_data(&self) -> [f32; Self::STRIDE] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.scale,
            self.rotation,
            self.opacity,
            self.color.r,
            self.color.g,
            self.color.b,
        ]
    }
}

/// Leaf placement parameters for the face and hand regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafScatter {
    pub face_count: usize,
    /// Leaves per hand
    pub hand_count: usize,
    /// Half-width of the ring around the face radius that face leaves land in
    pub face_band: f32,
    /// Largest sideways offset of a hand leaf from the hand's axis
    pub hand_jitter: f32,
    pub scale: Span,
    /// Hue range (0..1) for face leaves
    pub face_hue: Span,
    /// Hue range (0..1) for hand leaves
    pub hand_hue: Span,
    pub saturation: f32,
    pub lightness: Span,
    pub target_opacity: Span,
    pub fade_delay: Span,
    pub fade_duration: Span,
}

impl Default for LeafScatter {
    fn default() -> Self {
        Self {
            face_count: 60,
            hand_count: 6,
            face_band: 1.5,
            hand_jitter: 0.3,
            scale: Span::new(0.6, 1.4),
            face_hue: Span::new(0.2, 0.38),
            hand_hue: Span::new(0.03, 0.12),
            saturation: 0.7,
            lightness: Span::new(0.35, 0.6),
            target_opacity: Span::new(0.5, 0.95),
            fade_delay: Span::new(2.0, 14.0),
            fade_duration: Span::new(1.0, 4.0),
        }
    }
}

impl LeafScatter {
    /// Leaves in a ring around `face_radius`, centred on the origin.
    ///
    /// A leaf inside the nominal radius points towards the centre and one
    /// outside points away from it, with some angular jitter.
    pub fn scatter_face(&self, rng: &mut Random, face_radius: f32) -> Vec<Ornament> {
        (0..self.face_count)
            .map(|_| {
                let theta = rng.range(0.0, TAU);
                let r = rng.range(face_radius - self.face_band, face_radius + self.face_band);
                let facing = if r < face_radius { theta + PI } else { theta };
                let rotation = facing + rng.range(-FRAC_PI_6, FRAC_PI_6);

                self.leaf(rng, Vec3::planar(r * theta.cos(), r * theta.sin()), rotation, self.face_hue)
            })
            .collect()
    }

    /// Leaves along a hand of `length`, in the hand group's frame where the
    /// hand points along +y.
    pub fn scatter_hand(&self, rng: &mut Random, length: f32) -> Vec<Ornament> {
        (0..self.hand_count)
            .map(|_| {
                let y = rng.range(0.0, length);
                let x = rng.range(-self.hand_jitter, self.hand_jitter);
                let rotation = rng.range(0.0, TAU);
                self.leaf(rng, Vec3::planar(x, y), rotation, self.hand_hue)
            })
            .collect()
    }

    /// Fade-in tween for one leaf on `key`
    pub fn fade_in<K>(&self, rng: &mut Random, key: K) -> Tween<K> {
        let to = self.target_opacity.sample(rng);
        let duration = self.fade_duration.sample(rng);
        let delay = self.fade_delay.sample(rng);

        Tween::to(key, to, duration)
            .with_delay(delay)
            .with_easing(Easing::QuartOut)
    }

    fn leaf(&self, rng: &mut Random, position: Vec3, rotation: f32, hue: Span) -> Ornament {
        let color = Color::from_hsl(hue.sample(rng), self.saturation, self.lightness.sample(rng));

        Ornament {
            position,
            scale: self.scale.sample(rng),
            rotation,
            color,
            opacity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_leaves_stay_in_band() {
        let scatter = LeafScatter::default();
        let mut rng = Random::from_seed(31);
        let leaves = scatter.scatter_face(&mut rng, 10.0);

        assert_eq!(leaves.len(), scatter.face_count);
        for leaf in &leaves {
            let r = leaf.position.length();
            assert!(r >= 10.0 - scatter.face_band - 1e-4 && r <= 10.0 + scatter.face_band + 1e-4);
            assert_eq!(leaf.opacity, 0.0);
        }
    }

    #[test]
    fn test_face_leaf_rotation_bias() {
        let scatter = LeafScatter {
            face_count: 200,
            ..LeafScatter::default()
        };
        let mut rng = Random::from_seed(32);

        for leaf in scatter.scatter_face(&mut rng, 10.0) {
            let tip = Vec3::planar(leaf.rotation.cos(), leaf.rotation.sin());
            let radial = leaf.position.normalize();
            // Jitter is under 30°, so the tip stays on the biased side
            if leaf.position.length() < 10.0 {
                assert!(tip.dot(&radial) < 0.0);
            } else {
                assert!(tip.dot(&radial) > 0.0);
            }
        }
    }

    #[test]
    fn test_hand_leaves_follow_hand() {
        let scatter = LeafScatter::default();
        let mut rng = Random::from_seed(33);
        let leaves = scatter.scatter_hand(&mut rng, 6.0);

        assert_eq!(leaves.len(), scatter.hand_count);
        for leaf in &leaves {
            assert!((0.0..6.0).contains(&leaf.position.y));
            assert!(leaf.position.x.abs() <= scatter.hand_jitter);
            assert!(scatter.scale.contains(leaf.scale));
        }
    }

    #[test]
    fn test_hand_leaf_hue_in_range() {
        let scatter = LeafScatter::default();
        let mut rng = Random::from_seed(34);
        for leaf in scatter.scatter_hand(&mut rng, 9.5) {
            let h = leaf.color.to_hsl().h;
            assert!(h >= scatter.hand_hue.min - 1e-3 && h <= scatter.hand_hue.max + 1e-3, "hue {}", h);
        }
    }

    #[test]
    fn test_fade_in_tween_within_windows() {
        let scatter = LeafScatter::default();
        let mut rng = Random::from_seed(35);
        for i in 0..50 {
            let tween = scatter.fade_in(&mut rng, i);
            assert_eq!(tween.key, i);
            assert!(scatter.target_opacity.contains(tween.to));
            assert!(scatter.fade_delay.contains(tween.delay));
            assert!(scatter.fade_duration.contains(tween.duration));
        }
    }

    #[test]
    fn test_particle_data_layout() {
        let leaf = Ornament {
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: 0.5,
            rotation: 1.0,
            color: Color::new(0.1, 0.2, 0.3),
            opacity: 0.75,
        };
        assert_eq!(leaf.particle_data(), [1.0, 2.0, 3.0, 0.5, 1.0, 0.75, 0.1, 0.2, 0.3]);
    }
}
