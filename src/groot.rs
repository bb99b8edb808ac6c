//! The wavy analog clock scene.
//!
//! The dial is a hundred overlapping wavy circles. Each hand is a bundle of
//! wavy lines pointing up (+y) inside its own group, so rotating the group
//! about z moves the whole bundle. Most lines start hidden and are revealed
//! by dash tweens; leaves fade in afterwards.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::animation::{Tween, TweenEngine};
use crate::clock::{ClockAnimator, Hand};
use crate::color::Color;
use crate::config::ClockConfig;
use crate::error::{ConfigError, GeometryError};
use crate::geometry::{CircleStyle, LineStyle, Material, PrimitiveFactory};
use crate::math::Vec3;
use crate::random::Random;
use crate::scene::{FrameContext, GroupId, OrbitControls, Scene, SceneBuilder, SceneKey};

pub struct GrootClockScene {
    config: ClockConfig,
    center_colors: (Color, Color),
    factory: PrimitiveFactory,
    animator: ClockAnimator,
    hands_set: bool,
}

impl GrootClockScene {
    pub fn new(config: ClockConfig, rng: Random) -> Result<Self, ConfigError> {
        config.validate()?;
        let center_colors = config.center.colors()?;
        let animator = ClockAnimator::new(config.hands.timing);

        Ok(Self {
            config,
            center_colors,
            factory: PrimitiveFactory::new(rng),
            animator,
            hands_set: false,
        })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn animator(&self) -> &ClockAnimator {
        &self.animator
    }

    /// Coarse timer entry point, nominally once a second
    pub fn tick(&mut self) {
        self.animator.tick();
    }

    fn populate_face(&mut self, scene: &mut Scene, tweens: &mut TweenEngine<SceneKey>) -> Result<(), GeometryError> {
        let face = &self.config.face;

        for i in 0..face.circle_count {
            let rng = self.factory.rng();
            let radius = rng.range(face.radius, face.radius + face.radius_spread);
            let (start, end) = (rng.color(), rng.color());
            let perturbance = face.perturbance.sample(rng);
            let start_angle = rng.range(0.0, TAU);

            let revealed = i % face.solid_every != 0;
            let mut line = LineStyle::new()
                .with_gradient(start, end)
                .with_perturbance(perturbance)
                .with_segments(face.segment_count);
            if revealed {
                line = line.with_material(Material::dashed_reveal());
            }

            let circle = self
                .factory
                .create_circle(Vec3::ZERO, radius, &CircleStyle::new(line).with_start_angle(start_angle))?;
            let idx = scene.group_mut(GroupId::Face).add_primitive(circle);

            if revealed {
                let rng = self.factory.rng();
                let duration = face.reveal_duration.sample(rng);
                let delay = face.reveal_delay.sample(rng);
                tweens.schedule(
                    Tween::to(SceneKey::DashSize(GroupId::Face, idx), face.reveal_dash, duration).with_delay(delay),
                );
            }
        }

        Ok(())
    }

    fn populate_hand(
        &mut self,
        hand: Hand,
        scene: &mut Scene,
        tweens: &mut TweenEngine<SceneKey>,
    ) -> Result<(), GeometryError> {
        let hands = &self.config.hands;
        let spec = hands.lines(hand);
        let group = GroupId::Hand(hand);

        for _ in 0..spec.line_count {
            let rng = self.factory.rng();
            let length = rng.range(spec.length - spec.length_jitter, spec.length);
            let (start, end) = (rng.color(), rng.color());
            let perturbance = spec.perturbance.sample(rng);

            let style = LineStyle::new()
                .with_gradient(start, end)
                .with_perturbance(perturbance)
                .with_segments(spec.segment_count)
                .with_material(Material::dashed_reveal());
            let line = self.factory.create_line(Vec3::ZERO, FRAC_PI_2, length, &style)?;
            let idx = scene.group_mut(group).add_primitive(line);

            let delay = hands.reveal_delay.sample(self.factory.rng());
            tweens.schedule(
                Tween::to(SceneKey::DashSize(group, idx), hands.reveal_dash, hands.reveal_duration)
                    .with_delay(delay),
            );
        }

        Ok(())
    }

    fn populate_center(&mut self, scene: &mut Scene) -> Result<(), GeometryError> {
        let center = &self.config.center;
        let (inner, outer) = self.center_colors;

        for _ in 0..center.circle_count {
            let perturbance = center.perturbance.sample(self.factory.rng());
            let style = CircleStyle::new(
                LineStyle::new()
                    .with_gradient(inner, outer)
                    .with_perturbance(perturbance)
                    .with_segments(center.segment_count),
            );
            let circle = self.factory.create_circle(Vec3::ZERO, center.radius, &style)?;
            scene.group_mut(GroupId::Center).add_primitive(circle);
        }

        Ok(())
    }

    fn populate_leaves(&mut self, scene: &mut Scene, tweens: &mut TweenEngine<SceneKey>) {
        let leaves = &self.config.leaves;
        let rng = self.factory.rng();

        let mut regions = vec![(GroupId::Face, leaves.scatter_face(rng, self.config.face.radius))];
        for hand in Hand::ALL {
            let length = self.config.hands.lines(hand).length;
            regions.push((GroupId::Hand(hand), leaves.scatter_hand(rng, length)));
        }

        for (group, ornaments) in regions {
            for leaf in ornaments {
                let idx = scene.group_mut(group).add_ornament(leaf);
                tweens.schedule(leaves.fade_in(rng, SceneKey::OrnamentOpacity(group, idx)));
            }
        }
    }
}

impl SceneBuilder for GrootClockScene {
    fn populate_scene(&mut self, scene: &mut Scene, tweens: &mut TweenEngine<SceneKey>) -> Result<(), GeometryError> {
        self.populate_face(scene, tweens)?;
        for hand in [Hand::Hour, Hand::Minute, Hand::Second] {
            self.populate_hand(hand, scene, tweens)?;
        }
        self.populate_center(scene)?;
        self.populate_leaves(scene, tweens);

        log::debug!(
            "clock populated: {} face circles, {} center circles",
            scene.group(GroupId::Face).primitives.len(),
            scene.group(GroupId::Center).primitives.len()
        );
        Ok(())
    }

    fn animate(&mut self, frame: &FrameContext, _scene: &mut Scene, tweens: &mut TweenEngine<SceneKey>) {
        // First frame: set the hands without waiting for the timer
        if !self.hands_set {
            self.hands_set = true;
            self.animator.update_hands(frame.now, tweens, hand_key);
            return;
        }
        self.animator.apply_if_ticked(frame.now, tweens, hand_key);
    }

    fn create_controls(&self) -> OrbitControls {
        let camera = &self.config.camera;
        OrbitControls::new(camera.distance, camera.min_distance, camera.max_distance)
    }
}

fn hand_key(hand: Hand) -> SceneKey {
    SceneKey::Rotation(GroupId::Hand(hand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Animatable;
    use crate::clock::hand_angle;
    use crate::scene::SceneDriver;
    use chrono::NaiveTime;

    fn driver(seed: u64) -> SceneDriver<GrootClockScene> {
        let mut driver = SceneDriver::new(GrootClockScene::new(ClockConfig::default(), Random::from_seed(seed)).unwrap());
        driver.start().unwrap();
        driver
    }

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_populates_stock_clock() {
        let driver = driver(1);
        let scene = driver.scene();
        let leaves = &ClockConfig::default().leaves;

        assert_eq!(scene.group(GroupId::Face).primitives.len(), 100);
        assert_eq!(scene.group(GroupId::Hand(Hand::Hour)).primitives.len(), 20);
        assert_eq!(scene.group(GroupId::Hand(Hand::Minute)).primitives.len(), 15);
        assert_eq!(scene.group(GroupId::Hand(Hand::Second)).primitives.len(), 2);
        assert_eq!(scene.group(GroupId::Center).primitives.len(), 13);
        assert_eq!(scene.ornament_count(), leaves.face_count + 3 * leaves.hand_count);
    }

    #[test]
    fn test_every_99th_face_circle_is_solid() {
        let driver = driver(2);
        let face = &driver.scene().group(GroupId::Face).primitives;

        assert!(face[0].material.dash.is_none());
        assert!(face[99].material.dash.is_none());
        assert!(face[1..99].iter().all(|p| p.material.dash.is_some()));

        let revealed = face.len() - 2;
        let hand_lines = 20 + 15 + 2;
        let leaves = driver.scene().ornament_count();
        assert_eq!(driver.tweens().len(), revealed + hand_lines + leaves);
    }

    #[test]
    fn test_hand_lines_point_up() {
        let driver = driver(3);
        for line in &driver.scene().group(GroupId::Hand(Hand::Second)).primitives {
            let end = *line.points().last().unwrap();
            assert!(end.y > 8.0, "second hand tip at {:?}", end);
        }
    }

    #[test]
    fn test_lines_are_revealed_over_time() {
        let mut driver = driver(4);
        let key = SceneKey::DashSize(GroupId::Hand(Hand::Hour), 0);
        assert_eq!(driver.scene().get(key), Some(0.0));

        for _ in 0..25 {
            driver.frame(1.0, t(1, 0, 0));
        }
        assert_eq!(driver.scene().get(key), Some(20.0));
    }

    #[test]
    fn test_hand_reveal_uses_hand_dash() {
        let mut config = ClockConfig::default();
        config.hands.reveal_dash = 8.0;
        let mut driver = SceneDriver::new(GrootClockScene::new(config, Random::from_seed(6)).unwrap());
        driver.start().unwrap();

        for _ in 0..25 {
            driver.frame(1.0, t(1, 0, 0));
        }
        assert_eq!(driver.scene().get(SceneKey::DashSize(GroupId::Hand(Hand::Minute), 0)), Some(8.0));
        assert_eq!(driver.scene().get(SceneKey::DashSize(GroupId::Face, 1)), Some(20.0));
    }

    #[test]
    fn test_first_frame_sets_hands_then_waits_for_tick() {
        let mut driver = driver(5);
        driver.frame(0.016, t(4, 20, 10));
        driver.frame(1.0, t(4, 20, 10));

        let rotation = |d: &SceneDriver<GrootClockScene>, hand| d.scene().group(GroupId::Hand(hand)).rotation_z;
        assert!((rotation(&driver, Hand::Second) - hand_angle(Hand::Second, 10)).abs() < 1e-5);
        assert!((rotation(&driver, Hand::Minute) - hand_angle(Hand::Minute, 20)).abs() < 1e-5);
        assert!((rotation(&driver, Hand::Hour) - hand_angle(Hand::Hour, 4)).abs() < 1e-5);

        // Time moves on but no tick arrived
        driver.frame(1.0, t(4, 20, 12));
        assert!((rotation(&driver, Hand::Second) - hand_angle(Hand::Second, 10)).abs() < 1e-5);

        driver.builder_mut().tick();
        driver.frame(1.0, t(4, 20, 12));
        assert!((rotation(&driver, Hand::Second) - hand_angle(Hand::Second, 12)).abs() < 1e-5);
    }

    #[test]
    fn test_seed_reproduces_scene() {
        let a = driver(6);
        let b = driver(6);
        let pa = a.scene().group(GroupId::Face).primitives[10].points().to_vec();
        let pb = b.scene().group(GroupId::Face).primitives[10].points().to_vec();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_leaves_fade_in() {
        let mut driver = driver(7);
        assert_eq!(driver.scene().get(SceneKey::OrnamentOpacity(GroupId::Face, 0)), Some(0.0));
        for _ in 0..20 {
            driver.frame(1.0, t(9, 0, 0));
        }
        let opacity = driver.scene().get(SceneKey::OrnamentOpacity(GroupId::Face, 0)).unwrap();
        assert!(ClockConfig::default().leaves.target_opacity.contains(opacity));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ClockConfig::default();
        config.face.segment_count = 1;
        assert!(GrootClockScene::new(config, Random::from_seed(8)).is_err());
    }
}
