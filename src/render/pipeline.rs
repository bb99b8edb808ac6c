use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject,
};
use crate::geometry::{Primitive, PrimitiveKind};
use crate::math::{Mat4, Vec3};
use crate::ornament::Ornament;
use crate::scene::{Group, GroupId, OrbitControls, Scene};
use super::webgl::WebGLContext;
use super::shaders::*;

/// Floats per line vertex, see [`Primitive::vertex_data`]
const LINE_STRIDE: i32 = 7;
const LEAF_STRIDE: i32 = Ornament::STRIDE as i32;

/// Cached uniform locations for the line shader
struct LineUniforms {
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
    dashed: Option<WebGlUniformLocation>,
    dash_size: Option<WebGlUniformLocation>,
    gap_size: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the leaf shader
struct LeafUniforms {
    model_view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    group_rotation: Option<WebGlUniformLocation>,
    point_size: Option<WebGlUniformLocation>,
}

/// One primitive's vertex array on the GPU
struct GpuLine {
    vao: WebGlVertexArrayObject,
    _buffer: WebGlBuffer,
    count: i32,
    mode: u32,
}

/// GPU state for one scene group
struct GpuGroup {
    id: GroupId,
    lines: Vec<GpuLine>,
    leaf_vao: Option<WebGlVertexArrayObject>,
    leaf_buffer: Option<WebGlBuffer>,
    leaf_count: i32,
}

/// Draws a [`Scene`]: each group's lines, then its leaves, under the group's
/// z rotation
pub struct RenderPipeline {
    ctx: WebGLContext,

    line_program: WebGlProgram,
    leaf_program: WebGlProgram,
    line_uniforms: LineUniforms,
    leaf_uniforms: LeafUniforms,

    groups: Vec<GpuGroup>,

    width: i32,
    height: i32,

    pub fov: f32,
    /// Leaf sprite size in pixels at scale 1 and distance 30
    pub leaf_size: f32,
    pub background: [f32; 3],
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32) -> Result<Self, String> {
        let ctx = WebGLContext::new(gl);

        let line_program = ctx.create_program(LINE_VERTEX_SHADER, LINE_FRAGMENT_SHADER)?;
        let leaf_program = ctx.create_program(LEAF_VERTEX_SHADER, LEAF_FRAGMENT_SHADER)?;

        let line_uniforms = LineUniforms {
            model_view: ctx.get_uniform_location(&line_program, "u_model_view"),
            projection: ctx.get_uniform_location(&line_program, "u_projection"),
            opacity: ctx.get_uniform_location(&line_program, "u_opacity"),
            dashed: ctx.get_uniform_location(&line_program, "u_dashed"),
            dash_size: ctx.get_uniform_location(&line_program, "u_dash_size"),
            gap_size: ctx.get_uniform_location(&line_program, "u_gap_size"),
        };

        let leaf_uniforms = LeafUniforms {
            model_view: ctx.get_uniform_location(&leaf_program, "u_model_view"),
            projection: ctx.get_uniform_location(&leaf_program, "u_projection"),
            group_rotation: ctx.get_uniform_location(&leaf_program, "u_group_rotation"),
            point_size: ctx.get_uniform_location(&leaf_program, "u_point_size"),
        };

        Ok(Self {
            ctx,
            line_program,
            leaf_program,
            line_uniforms,
            leaf_uniforms,
            groups: Vec::new(),
            width,
            height,
            fov: std::f32::consts::FRAC_PI_4,
            leaf_size: 18.0,
            background: [0.0, 0.0, 0.0],
        })
    }

    /// Upload every group's geometry. Replaces anything uploaded before.
    pub fn upload_scene(&mut self, scene: &Scene) -> Result<(), String> {
        let mut groups = Vec::new();

        for (id, group) in scene.groups() {
            let lines = group
                .primitives
                .iter()
                .map(|p| self.upload_line(p))
                .collect::<Result<Vec<_>, _>>()?;

            let mut gpu = GpuGroup {
                id,
                lines,
                leaf_vao: None,
                leaf_buffer: None,
                leaf_count: 0,
            };
            if !group.ornaments.is_empty() {
                self.upload_leaves(&mut gpu, group)?;
            }
            groups.push(gpu);
        }

        log::debug!(
            "uploaded {} line buffers",
            groups.iter().map(|g| g.lines.len()).sum::<usize>()
        );
        self.groups = groups;
        Ok(())
    }

    fn upload_line(&self, primitive: &Primitive) -> Result<GpuLine, String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self.ctx.create_buffer_f32(&primitive.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));

        // Layout: position(3) + color(3) + line distance(1)
        self.ctx.float_attribute(0, 3, LINE_STRIDE, 0);
        self.ctx.float_attribute(1, 3, LINE_STRIDE, 3);
        self.ctx.float_attribute(2, 1, LINE_STRIDE, 6);

        gl.bind_vertex_array(None);

        let mode = match primitive.kind() {
            PrimitiveKind::Line => WebGl2RenderingContext::LINE_STRIP,
            PrimitiveKind::LineLoop => WebGl2RenderingContext::LINE_LOOP,
        };

        Ok(GpuLine {
            vao,
            _buffer: buffer,
            count: primitive.vertex_count() as i32,
            mode,
        })
    }

    fn upload_leaves(&self, gpu: &mut GpuGroup, group: &Group) -> Result<(), String> {
        let gl = &self.ctx.gl;

        let vao = self.ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = self.ctx.create_buffer_f32(&group.ornament_data(), WebGl2RenderingContext::DYNAMIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));

        // Layout: position(3) + scale(1) + rotation(1) + opacity(1) + color(3)
        self.ctx.float_attribute(0, 3, LEAF_STRIDE, 0);
        self.ctx.float_attribute(1, 1, LEAF_STRIDE, 3);
        self.ctx.float_attribute(2, 1, LEAF_STRIDE, 4);
        self.ctx.float_attribute(3, 1, LEAF_STRIDE, 5);
        self.ctx.float_attribute(4, 3, LEAF_STRIDE, 6);

        gl.bind_vertex_array(None);

        gpu.leaf_vao = Some(vao);
        gpu.leaf_buffer = Some(buffer);
        gpu.leaf_count = group.ornaments.len() as i32;
        Ok(())
    }

    /// Push fresh leaf opacities to the GPU
    pub fn update_leaves(&mut self, scene: &Scene) {
        for gpu in &mut self.groups {
            if let Some(ref buffer) = gpu.leaf_buffer {
                let group = scene.group(gpu.id);
                self.ctx.update_buffer_f32(buffer, &group.ornament_data());
                gpu.leaf_count = group.ornaments.len() as i32;
            }
        }
    }

    /// Render a frame
    pub fn render(&self, scene: &Scene, controls: &OrbitControls) {
        let gl = &self.ctx.gl;

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let projection = Mat4::perspective(self.fov, aspect, 0.1, 1000.0);
        let view = Mat4::look_at(controls.camera_position(), controls.target, Vec3::UP);

        self.ctx.viewport(0, 0, self.width, self.height);
        let [r, g, b] = self.background;
        self.ctx.clear(r, g, b, 1.0);
        self.ctx.enable_blending();

        gl.use_program(Some(&self.line_program));
        self.ctx.uniform_matrix4fv(self.line_uniforms.projection.as_ref(), projection.as_slice());

        for gpu in &self.groups {
            let group = scene.group(gpu.id);
            let model_view = view.mul(&Mat4::rotation_z(group.rotation_z));
            self.ctx.uniform_matrix4fv(self.line_uniforms.model_view.as_ref(), model_view.as_slice());

            for (line, primitive) in gpu.lines.iter().zip(&group.primitives) {
                let material = &primitive.material;
                self.ctx.uniform_1f(self.line_uniforms.opacity.as_ref(), material.opacity);
                match material.dash {
                    Some(dash) => {
                        self.ctx.uniform_1i(self.line_uniforms.dashed.as_ref(), 1);
                        self.ctx.uniform_1f(self.line_uniforms.dash_size.as_ref(), dash.dash_size);
                        self.ctx.uniform_1f(self.line_uniforms.gap_size.as_ref(), dash.gap_size);
                    }
                    None => self.ctx.uniform_1i(self.line_uniforms.dashed.as_ref(), 0),
                }
                gl.line_width(material.line_width);

                gl.bind_vertex_array(Some(&line.vao));
                gl.draw_arrays(line.mode, 0, line.count);
            }
        }

        gl.use_program(Some(&self.leaf_program));
        self.ctx.uniform_matrix4fv(self.leaf_uniforms.projection.as_ref(), projection.as_slice());
        self.ctx.uniform_1f(self.leaf_uniforms.point_size.as_ref(), self.leaf_size);

        for gpu in &self.groups {
            if gpu.leaf_count == 0 {
                continue;
            }
            let rotation = scene.group(gpu.id).rotation_z;
            let model_view = view.mul(&Mat4::rotation_z(rotation));
            self.ctx.uniform_matrix4fv(self.leaf_uniforms.model_view.as_ref(), model_view.as_slice());
            self.ctx.uniform_1f(self.leaf_uniforms.group_rotation.as_ref(), rotation);

            gl.bind_vertex_array(gpu.leaf_vao.as_ref());
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, gpu.leaf_count);
        }

        gl.bind_vertex_array(None);
    }

    /// Resize the render target
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }
}
