/// Vertex shader for wavy lines and loops
pub const LINE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;
layout(location = 2) in float a_line_distance;

uniform mat4 u_model_view;
uniform mat4 u_projection;

out vec3 v_color;
out float v_line_distance;

void main() {
    v_color = a_color;
    v_line_distance = a_line_distance;
    gl_Position = u_projection * u_model_view * vec4(a_position, 1.0);
}
"#;

/// Fragment shader for lines.
///
/// With `u_dashed` set, fragments whose distance along the line falls in a
/// gap are discarded. A dash of 0 hides the line entirely; growing the dash
/// draws it from its first vertex.
pub const LINE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_color;
in float v_line_distance;

uniform float u_opacity;
uniform bool u_dashed;
uniform float u_dash_size;
uniform float u_gap_size;

out vec4 fragColor;

void main() {
    if (u_dashed) {
        float period = u_dash_size + u_gap_size;
        if (u_dash_size <= 0.0 || mod(v_line_distance, period) > u_dash_size) {
            discard;
        }
    }

    fragColor = vec4(v_color, u_opacity);
}
"#;

/// Vertex shader for leaf sprites
pub const LEAF_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in float a_scale;
layout(location = 2) in float a_rotation;
layout(location = 3) in float a_opacity;
layout(location = 4) in vec3 a_color;

uniform mat4 u_model_view;
uniform mat4 u_projection;
uniform float u_group_rotation;
uniform float u_point_size;

out float v_rotation;
out float v_opacity;
out vec3 v_color;

void main() {
    // Sprites face the camera, so the group's spin is added to the leaf's own
    v_rotation = a_rotation + u_group_rotation;
    v_opacity = a_opacity;
    v_color = a_color;

    vec4 view_pos = u_model_view * vec4(a_position, 1.0);
    gl_Position = u_projection * view_pos;
    gl_PointSize = a_scale * u_point_size * (30.0 / -view_pos.z);
}
"#;

/// Fragment shader drawing a pointed leaf along the sprite's rotated x axis
pub const LEAF_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float v_rotation;
in float v_opacity;
in vec3 v_color;

out vec4 fragColor;

void main() {
    vec2 p = gl_PointCoord - vec2(0.5);
    p.y = -p.y;

    float c = cos(-v_rotation);
    float s = sin(-v_rotation);
    p = vec2(c * p.x - s * p.y, s * p.x + c * p.y);

    // Lens between two arcs, tips at x = -0.5 and x = 0.5
    float half_width = 0.22 * (1.0 - 4.0 * p.x * p.x);
    if (abs(p.y) > half_width) {
        discard;
    }

    // Darker midrib
    float rib = smoothstep(0.0, 0.03, abs(p.y));
    vec3 color = mix(v_color * 0.6, v_color, rib);

    fragColor = vec4(color, v_opacity);
}
"#;
