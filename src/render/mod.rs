//! WebGL2 renderer for wavy lines and leaf sprites

pub mod webgl;
pub mod shaders;
pub mod pipeline;

pub use webgl::WebGLContext;
pub use pipeline::RenderPipeline;
