/// Shared uniform block, identical in both shaders.
const GLOBALS: &str = r#"
struct Globals {
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    // xyz: direction toward the light, w: intensity
    light_dir: vec4<f32>,
    light_color: vec4<f32>,
    base_color: vec4<f32>,
    // x: metalness, y: roughness, z: point size, w: aspect
    material: vec4<f32>,
    particle_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;
"#;

/// Physically based shading for the orbiting meshes: GGX distribution,
/// Smith geometry and Schlick fresnel under one directional light.
const MESH_BODY: &str = r#"
const PI: f32 = 3.14159265;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.proj * globals.view * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    if (!front) {
        n = -n;
    }
    let v = normalize(globals.camera_pos.xyz - in.world_pos);
    let l = normalize(globals.light_dir.xyz);
    let h = normalize(v + l);

    let albedo = globals.base_color.rgb;
    let metal = globals.material.x;
    let rough = max(globals.material.y, 0.04);

    let ndl = max(dot(n, l), 0.0);
    let ndv = max(dot(n, v), 1e-4);
    let ndh = max(dot(n, h), 0.0);
    let vdh = max(dot(v, h), 0.0);

    let a = rough * rough;
    let a2 = a * a;
    let denom = ndh * ndh * (a2 - 1.0) + 1.0;
    let d = a2 / (PI * denom * denom);

    let k = (rough + 1.0) * (rough + 1.0) / 8.0;
    let g = (ndv / (ndv * (1.0 - k) + k)) * (ndl / (ndl * (1.0 - k) + k));

    let f0 = mix(vec3<f32>(0.04), albedo, metal);
    let f = f0 + (vec3<f32>(1.0) - f0) * pow(1.0 - vdh, 5.0);

    let specular = d * g * f / max(4.0 * ndv * ndl, 1e-4);
    let diffuse = (vec3<f32>(1.0) - f) * (1.0 - metal) * albedo / PI;
    let radiance = globals.light_color.rgb * globals.light_dir.w;

    // no environment map: a little ambient keeps the unlit side readable
    let ambient = albedo * 0.03;
    let color = (diffuse + specular) * radiance * ndl + ambient;
    return vec4<f32>(color, 1.0);
}
"#;

/// Camera-facing particle quads, six vertices per instance.
///
/// Sizes follow attenuated point sprites: `size` world units span
/// `size * viewport_height / 2 / depth` pixels.
const PARTICLE_BODY: &str = r#"
struct ParticleOutput {
    @builtin(position) clip_position: vec4<f32>,
};

@vertex
fn vs_particle(
    @builtin(vertex_index) index: u32,
    @location(0) center: vec3<f32>,
) -> ParticleOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    let corner = corners[index];
    let size = globals.material.z;
    let aspect = globals.material.w;

    var clip = globals.proj * globals.view * vec4<f32>(center, 1.0);
    // constant clip-space offset == screen size shrinking with depth
    clip = vec4<f32>(clip.xy + corner * vec2<f32>(size * 0.5 / aspect, size * 0.5), clip.zw);

    var out: ParticleOutput;
    out.clip_position = clip;
    return out;
}

@fragment
fn fs_particle(in: ParticleOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(globals.particle_color.rgb, 1.0);
}
"#;

pub fn mesh_shader() -> String {
    format!("{GLOBALS}{MESH_BODY}")
}

pub fn particle_shader() -> String {
    format!("{GLOBALS}{PARTICLE_BODY}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaders_declare_their_entry_points() {
        let mesh = mesh_shader();
        assert!(mesh.contains("fn vs_main"));
        assert!(mesh.contains("fn fs_main"));
        let particle = particle_shader();
        assert!(particle.contains("fn vs_particle"));
        assert!(particle.contains("fn fs_particle"));
    }

    #[test]
    fn both_shaders_share_the_uniform_block() {
        for src in [mesh_shader(), particle_shader()] {
            assert_eq!(src.matches("struct Globals").count(), 1);
            assert!(src.contains("var<uniform> globals: Globals;"));
        }
    }
}
