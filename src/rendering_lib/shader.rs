// src/rendering_lib/shader.rs

pub const WGSL_SHADER_SOURCE: &str = r#"
struct PolygonUniforms {
    viewport: vec2<f32>, // logical pixels
    center: vec2<f32>,
    scale: f32,
    angle: f32,
    pad: vec2<f32>,
    color: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> u: PolygonUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
}

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> VertexOutput {
    var out: VertexOutput;

    let c = cos(u.angle);
    let s = sin(u.angle);
    let scaled = position * u.scale;
    let world = vec2<f32>(scaled.x * c - scaled.y * s, scaled.x * s + scaled.y * c) + u.center;

    // World space has its origin at the viewport centre with +Y up, which is
    // already the orientation of NDC; only the extent needs rescaling.
    out.clip_position = vec4<f32>(world / (u.viewport * 0.5), 0.0, 1.0);

    return out;
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return u.color;
}
"#;
