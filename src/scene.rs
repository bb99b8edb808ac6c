//! Scene graph and its lifecycle.
//!
//! A [`Scene`] is a fixed set of groups: the dial face, the centre knot and
//! one group per clock hand. Groups rotate about z and own their primitives
//! and leaves. A [`SceneBuilder`] fills the scene once and then gets a hook
//! on every frame; [`SceneDriver`] runs that lifecycle and advances tweens.

use std::f32::consts::FRAC_PI_2;

use chrono::NaiveTime;

use crate::animation::{Animatable, TweenEngine};
use crate::clock::Hand;
use crate::error::GeometryError;
use crate::geometry::Primitive;
use crate::math::Vec3;
use crate::ornament::Ornament;

/// Identifies a group in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupId {
    Face,
    Center,
    Hand(Hand),
}

impl GroupId {
    pub const ALL: [GroupId; 5] = [
        GroupId::Face,
        GroupId::Center,
        GroupId::Hand(Hand::Hour),
        GroupId::Hand(Hand::Minute),
        GroupId::Hand(Hand::Second),
    ];
}

/// Tweenable scene property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKey {
    Rotation(GroupId),
    Opacity(GroupId, usize),
    DashSize(GroupId, usize),
    OrnamentOpacity(GroupId, usize),
}

/// A rotation pivot owning primitives and leaves
#[derive(Debug, Clone, Default)]
pub struct Group {
    /// Rotation about +z in radians; negative turns clockwise
    pub rotation_z: f32,
    pub primitives: Vec<Primitive>,
    pub ornaments: Vec<Ornament>,
}

impl Group {
    /// Add a primitive and return its index in this group
    pub fn add_primitive(&mut self, primitive: Primitive) -> usize {
        self.primitives.push(primitive);
        self.primitives.len() - 1
    }

    pub fn add_ornament(&mut self, ornament: Ornament) -> usize {
        self.ornaments.push(ornament);
        self.ornaments.len() - 1
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.vertex_count()).sum()
    }

    /// Leaf data for all ornaments, see [`Ornament::particle_data`]
    pub fn ornament_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.ornaments.len() * Ornament::STRIDE);
        for leaf in &self.ornaments {
            data.extend_from_slice(&leaf.particle_data());
        }
        data
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    face: Group,
    center: Group,
    hands: [Group; 3],
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, id: GroupId) -> &Group {
        match id {
            GroupId::Face => &self.face,
            GroupId::Center => &self.center,
            GroupId::Hand(hand) => &self.hands[hand as usize],
        }
    }

    pub fn group_mut(&mut self, id: GroupId) -> &mut Group {
        match id {
            GroupId::Face => &mut self.face,
            GroupId::Center => &mut self.center,
            GroupId::Hand(hand) => &mut self.hands[hand as usize],
        }
    }

    /// Groups in draw order: face, centre, then hands from hour to second
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> + '_ {
        GroupId::ALL.into_iter().map(move |id| (id, self.group(id)))
    }

    pub fn primitive_count(&self) -> usize {
        self.groups().map(|(_, g)| g.primitives.len()).sum()
    }

    pub fn ornament_count(&self) -> usize {
        self.groups().map(|(_, g)| g.ornaments.len()).sum()
    }
}

impl Animatable for Scene {
    type Key = SceneKey;

    fn get(&self, key: SceneKey) -> Option<f32> {
        match key {
            SceneKey::Rotation(id) => Some(self.group(id).rotation_z),
            SceneKey::Opacity(id, i) => self.group(id).primitives.get(i).map(|p| p.material.opacity),
            SceneKey::DashSize(id, i) => self
                .group(id)
                .primitives
                .get(i)
                .filter(|p| p.material.dash.is_some())
                .map(|p| p.material.dash_size()),
            SceneKey::OrnamentOpacity(id, i) => self.group(id).ornaments.get(i).map(|o| o.opacity),
        }
    }

    fn set(&mut self, key: SceneKey, value: f32) {
        match key {
            SceneKey::Rotation(id) => self.group_mut(id).rotation_z = value,
            SceneKey::Opacity(id, i) => {
                if let Some(p) = self.group_mut(id).primitives.get_mut(i) {
                    p.material.opacity = value;
                }
            }
            SceneKey::DashSize(id, i) => {
                if let Some(p) = self.group_mut(id).primitives.get_mut(i) {
                    p.material.set_dash_size(value);
                }
            }
            SceneKey::OrnamentOpacity(id, i) => {
                if let Some(o) = self.group_mut(id).ornaments.get_mut(i) {
                    o.opacity = value;
                }
            }
        }
    }
}

/// Camera orbiting a target point, with clamped zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Elevation above the target's xz plane
    pub angle_x: f32,
    /// Azimuth about +y
    pub angle_y: f32,
    pub target: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            distance: 12.0,
            min_distance: 3.0,
            max_distance: 30.0,
            angle_x: 0.0,
            angle_y: 0.0,
            target: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new(distance: f32, min_distance: f32, max_distance: f32) -> Self {
        Self {
            distance: distance.clamp(min_distance, max_distance),
            min_distance,
            max_distance,
            ..Self::default()
        }
    }

    /// Rotate by pointer deltas in pixels
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.angle_y += delta_x * 0.01;
        self.angle_x = (self.angle_x + delta_y * 0.01).clamp(-FRAC_PI_2 + 0.1, FRAC_PI_2 - 0.1);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta * 0.5).clamp(self.min_distance, self.max_distance);
    }

    pub fn camera_position(&self) -> Vec3 {
        let (sin_x, cos_x) = self.angle_x.sin_cos();
        let (sin_y, cos_y) = self.angle_y.sin_cos();

        Vec3::new(
            self.target.x + self.distance * cos_x * sin_y,
            self.target.y + self.distance * sin_x,
            self.target.z + self.distance * cos_x * cos_y,
        )
    }
}

/// Per-frame inputs handed to [`SceneBuilder::animate`]
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Seconds since the driver started
    pub elapsed: f32,
    /// Local wall-clock time
    pub now: NaiveTime,
}

/// Fills a scene and reacts to frames
pub trait SceneBuilder {
    /// Add every primitive and leaf, and schedule the intro tweens
    fn populate_scene(&mut self, scene: &mut Scene, tweens: &mut TweenEngine<SceneKey>) -> Result<(), GeometryError>;

    /// Called once per frame before tweens advance
    fn animate(&mut self, _frame: &FrameContext, _scene: &mut Scene, _tweens: &mut TweenEngine<SceneKey>) {}

    fn create_controls(&self) -> OrbitControls {
        OrbitControls::default()
    }
}

/// Runs a [`SceneBuilder`]: populate once, then animate and tween per frame
pub struct SceneDriver<B> {
    builder: B,
    scene: Scene,
    tweens: TweenEngine<SceneKey>,
    controls: OrbitControls,
    started: bool,
    elapsed: f32,
}

impl<B: SceneBuilder> SceneDriver<B> {
    pub fn new(builder: B) -> Self {
        let controls = builder.create_controls();
        Self {
            builder,
            scene: Scene::new(),
            tweens: TweenEngine::new(),
            controls,
            started: false,
            elapsed: 0.0,
        }
    }

    /// Populate the scene. Later calls do nothing.
    pub fn start(&mut self) -> Result<(), GeometryError> {
        if self.started {
            return Ok(());
        }
        self.builder.populate_scene(&mut self.scene, &mut self.tweens)?;
        self.started = true;

        log::info!(
            "scene populated: {} primitives, {} leaves, {} tweens scheduled",
            self.scene.primitive_count(),
            self.scene.ornament_count(),
            self.tweens.len()
        );
        Ok(())
    }

    /// Advance one frame. Returns the number of tweens that finished.
    pub fn frame(&mut self, dt: f32, now: NaiveTime) -> usize {
        if !self.started {
            return 0;
        }
        self.elapsed += dt;

        let frame = FrameContext {
            dt,
            elapsed: self.elapsed,
            now,
        };
        self.builder.animate(&frame, &mut self.scene, &mut self.tweens);
        self.tweens.update(dt, &mut self.scene)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    pub fn tweens(&self) -> &TweenEngine<SceneKey> {
        &self.tweens
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Tween;
    use crate::geometry::{CircleStyle, LineStyle, Material, PrimitiveFactory};
    use crate::random::Random;

    struct OneLine {
        animated_frames: usize,
    }

    impl SceneBuilder for OneLine {
        fn populate_scene(&mut self, scene: &mut Scene, tweens: &mut TweenEngine<SceneKey>) -> Result<(), GeometryError> {
            let mut factory = PrimitiveFactory::new(Random::from_seed(1));
            let style = LineStyle::new().with_segments(4).with_material(Material::dashed_reveal());
            let line = factory.create_line(Vec3::ZERO, FRAC_PI_2, 5.0, &style)?;
            let idx = scene.group_mut(GroupId::Face).add_primitive(line);
            tweens.schedule(Tween::to(SceneKey::DashSize(GroupId::Face, idx), 20.0, 1.0));
            Ok(())
        }

        fn animate(&mut self, _frame: &FrameContext, _scene: &mut Scene, _tweens: &mut TweenEngine<SceneKey>) {
            self.animated_frames += 1;
        }
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_driver_lifecycle() {
        let mut driver = SceneDriver::new(OneLine { animated_frames: 0 });
        assert_eq!(driver.frame(0.1, noon()), 0);
        assert_eq!(driver.builder().animated_frames, 0);

        driver.start().unwrap();
        driver.start().unwrap();
        assert_eq!(driver.scene().primitive_count(), 1);

        driver.frame(0.5, noon());
        let dash = driver.scene().get(SceneKey::DashSize(GroupId::Face, 0)).unwrap();
        assert!(dash > 0.0 && dash < 20.0);

        assert_eq!(driver.frame(0.6, noon()), 1);
        assert_eq!(driver.scene().get(SceneKey::DashSize(GroupId::Face, 0)), Some(20.0));
        assert_eq!(driver.builder().animated_frames, 2);
        assert!((driver.elapsed() - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_scene_keys_resolve() {
        let mut scene = Scene::new();
        let hour = GroupId::Hand(Hand::Hour);

        scene.set(SceneKey::Rotation(hour), -1.0);
        assert_eq!(scene.group(hour).rotation_z, -1.0);
        assert_eq!(scene.group(GroupId::Hand(Hand::Minute)).rotation_z, 0.0);

        assert_eq!(scene.get(SceneKey::Opacity(GroupId::Face, 0)), None);
        assert_eq!(scene.get(SceneKey::OrnamentOpacity(hour, 3)), None);
    }

    #[test]
    fn test_dash_key_requires_dashed_material() {
        let mut scene = Scene::new();
        let mut factory = PrimitiveFactory::new(Random::from_seed(2));
        let line = factory.create_line(Vec3::ZERO, 0.0, 1.0, &LineStyle::new()).unwrap();
        scene.group_mut(GroupId::Center).add_primitive(line);

        assert_eq!(scene.get(SceneKey::DashSize(GroupId::Center, 0)), None);
        assert_eq!(scene.get(SceneKey::Opacity(GroupId::Center, 0)), Some(1.0));
    }

    #[test]
    fn test_opacity_fade() {
        let mut scene = Scene::new();
        let mut factory = PrimitiveFactory::new(Random::from_seed(4));
        let circle = factory.create_circle(Vec3::ZERO, 2.0, &CircleStyle::new(LineStyle::new().with_segments(12))).unwrap();
        let idx = scene.group_mut(GroupId::Face).add_primitive(circle);

        let mut tweens = TweenEngine::new();
        tweens.schedule(Tween::to(SceneKey::Opacity(GroupId::Face, idx), 0.0, 1.0));
        tweens.update(0.5, &mut scene);
        let half = scene.group(GroupId::Face).primitives[idx].material.opacity;
        assert!(half > 0.0 && half < 1.0);

        assert_eq!(tweens.update(0.6, &mut scene), 1);
        assert_eq!(scene.group(GroupId::Face).primitives[idx].material.opacity, 0.0);
    }

    #[test]
    fn test_groups_draw_order() {
        let scene = Scene::new();
        let ids: Vec<GroupId> = scene.groups().map(|(id, _)| id).collect();
        assert_eq!(ids[0], GroupId::Face);
        assert_eq!(ids[4], GroupId::Hand(Hand::Second));
    }

    #[test]
    fn test_orbit_controls_clamp_zoom() {
        let mut controls = OrbitControls::new(30.0, 10.0, 100.0);
        controls.zoom(-100.0);
        assert_eq!(controls.distance, 10.0);
        controls.zoom(1000.0);
        assert_eq!(controls.distance, 100.0);

        let pos = OrbitControls::new(30.0, 10.0, 100.0).camera_position();
        assert!((pos.z - 30.0).abs() < 1e-5);
        assert!(pos.x.abs() < 1e-5 && pos.y.abs() < 1e-5);
    }

    #[test]
    fn test_orbit_limits_elevation() {
        let mut controls = OrbitControls::default();
        controls.orbit(0.0, 10_000.0);
        assert!(controls.angle_x < FRAC_PI_2);
    }
}
