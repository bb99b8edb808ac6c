use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext, HtmlCanvasElement};

pub mod animation;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod groot;
pub mod logging;
pub mod math;
pub mod ornament;
pub mod random;
pub mod render;
pub mod scene;

pub use config::ClockConfig;
pub use error::{ConfigError, GeometryError};
pub use geometry::{CircleStyle, LineStyle, Primitive, PrimitiveFactory};

use groot::GrootClockScene;
use logging::{init_logging, LoggingConfig};
use random::Random;
use render::RenderPipeline;
use scene::SceneDriver;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Animated wavy clock bound to a canvas
#[wasm_bindgen]
pub struct CrookedClock {
    pipeline: RenderPipeline,
    driver: SceneDriver<GrootClockScene>,
}

#[wasm_bindgen]
impl CrookedClock {
    /// Build the clock on `canvas`. `config` is an optional YAML document;
    /// omitted fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: Option<String>) -> Result<CrookedClock, JsValue> {
        let config = ClockConfig::from_yaml(config.as_deref().unwrap_or_default()).map_err(to_js)?;
        init_logging(LoggingConfig {
            level: config.level_filter().map_err(to_js)?,
        });

        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let mut pipeline = RenderPipeline::new(gl, width, height)
            .map_err(|e| JsValue::from_str(&e))?;

        let seed = config.seed.unwrap_or_else(entropy_seed);
        log::info!("building clock with seed {}", seed);

        let builder = GrootClockScene::new(config, Random::from_seed(seed)).map_err(to_js)?;
        let mut driver = SceneDriver::new(builder);
        driver.start().map_err(to_js)?;

        pipeline.upload_scene(driver.scene())
            .map_err(|e| JsValue::from_str(&e))?;

        Ok(Self { pipeline, driver })
    }

    /// Coarse timer callback; call about once a second
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.driver.builder_mut().tick();
    }

    /// Update and render a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        let now = chrono::Local::now().time();
        self.driver.frame(dt, now);

        self.pipeline.update_leaves(self.driver.scene());
        self.pipeline.render(self.driver.scene(), self.driver.controls());
    }

    /// Resize the canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) {
        self.pipeline.resize(width, height);
    }

    /// Orbit camera
    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.driver.controls_mut().orbit(delta_x, delta_y);
    }

    /// Zoom camera
    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.driver.controls_mut().zoom(delta);
    }

    /// Number of lines and loops in the scene
    #[wasm_bindgen]
    pub fn primitive_count(&self) -> usize {
        self.driver.scene().primitive_count()
    }
}

fn to_js<E: std::fmt::Display>(err: E) -> JsValue {
    log::error!("{}", err);
    JsValue::from_str(&err.to_string())
}

/// Seed from the wall clock when the config does not fix one
fn entropy_seed() -> u64 {
    seed_from_time(chrono::Utc::now())
}

fn seed_from_time(now: chrono::DateTime<chrono::Utc>) -> u64 {
    (now.timestamp_millis() as u64).rotate_left(20) ^ u64::from(now.timestamp_subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_seed_from_time_mixes_millis_and_nanos() {
        let a = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let b = Utc.timestamp_opt(1_700_000_000, 1_000_000).unwrap();
        let c = Utc.timestamp_opt(1_700_000_000, 1_000_001).unwrap();

        assert_eq!(seed_from_time(a), seed_from_time(a));
        assert_ne!(seed_from_time(a), seed_from_time(b));
        // Same millisecond, different nanoseconds
        assert_ne!(seed_from_time(b), seed_from_time(c));
    }
}
