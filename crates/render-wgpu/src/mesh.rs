//! Procedural geometry for the scene's mesh shapes.
//!
//! Generators produce indexed positions; [`MeshData::build`] expands them to
//! a plain triangle list with either per-face (flat) or averaged (smooth)
//! normals. Triangles wind counter-clockwise when seen from outside.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use orbitfield_kernel::{MAX_SEGMENTS, MAX_WINDING, MeshShape};
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Non-indexed triangle list ready for upload.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
}

impl MeshData {
    /// Segment and winding counts outside the validated range are clamped
    /// into it, so the index arithmetic stays within `u32`.
    pub fn build(shape: &MeshShape, flat: bool) -> Self {
        let seg = |n: u32| n.clamp(3, MAX_SEGMENTS);
        let wind = |n: u32| n.clamp(1, MAX_WINDING);
        let (positions, indices) = match *shape {
            MeshShape::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(radius, tube, seg(radial_segments), seg(tubular_segments)),
            MeshShape::Octahedron { radius } => octahedron(radius),
            MeshShape::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => torus_knot(
                radius,
                tube,
                seg(tubular_segments),
                seg(radial_segments),
                wind(p),
                wind(q),
            ),
            MeshShape::Icosahedron { radius } => icosahedron(radius),
        };
        let vertices = if flat {
            flat_vertices(&positions, &indices)
        } else {
            smooth_vertices(&positions, &indices)
        };
        Self { vertices }
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Vertex and index counts of a `rows x cols` quad grid with duplicated seams.
fn grid_len(rows: u32, cols: u32) -> (usize, usize) {
    let (rows, cols) = (rows as usize, cols as usize);
    let vertices = (rows + 1).checked_mul(cols + 1).unwrap_or(0);
    let indices = rows
        .checked_mul(cols)
        .and_then(|quads| quads.checked_mul(6))
        .unwrap_or(0);
    (vertices, indices)
}

fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Y)
}

fn flat_vertices(positions: &[Vec3], indices: &[u32]) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(indices.len());
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| positions[tri[k] as usize]);
        let normal = face_normal(a, b, c).to_array();
        for p in [a, b, c] {
            out.push(Vertex {
                position: p.to_array(),
                normal,
            });
        }
    }
    out
}

fn smooth_vertices(positions: &[Vec3], indices: &[u32]) -> Vec<Vertex> {
    // Area-weighted accumulation: the unnormalized cross product scales with area.
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [0, 1, 2].map(|k| positions[tri[k] as usize]);
        let n = (b - a).cross(c - a);
        for &i in tri {
            normals[i as usize] += n;
        }
    }
    indices
        .iter()
        .map(|&i| Vertex {
            position: positions[i as usize].to_array(),
            normal: normals[i as usize]
                .try_normalize()
                .unwrap_or(Vec3::Y)
                .to_array(),
        })
        .collect()
}

/// Ring torus around the z axis. Grid of `(tubular + 1) x (radial + 1)`
/// vertices; the seam vertices are duplicated.
fn torus(radius: f32, tube: f32, radial: u32, tubular: u32) -> (Vec<Vec3>, Vec<u32>) {
    let (vertex_count, index_count) = grid_len(radial, tubular);
    let mut positions = Vec::with_capacity(vertex_count);
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            positions.push(Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin()));
        }
    }

    let row = tubular + 1;
    let mut indices = Vec::with_capacity(index_count);
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    (positions, indices)
}

fn knot_curve(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let qu = q / p * u;
    let cs = qu.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu.sin() * 0.5,
    )
}

/// (p, q) torus knot swept with a circular tube.
fn torus_knot(
    radius: f32,
    tube: f32,
    tubular: u32,
    radial: u32,
    p: u32,
    q: u32,
) -> (Vec<Vec3>, Vec<u32>) {
    let (pf, qf) = (p as f32, q as f32);
    let (vertex_count, index_count) = grid_len(tubular, radial);
    let mut positions = Vec::with_capacity(vertex_count);
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * pf * TAU;
        let p1 = knot_curve(u, pf, qf, radius);
        let p2 = knot_curve(u + 0.01, pf, qf, radius);
        // Frame along the curve: tangent, then binormal and normal from it.
        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1);
        let normal = binormal.cross(tangent).normalize();
        let binormal = binormal.normalize();
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            positions.push(p1 + normal * cx + binormal * cy);
        }
    }

    let row = radial + 1;
    let mut indices = Vec::with_capacity(index_count);
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    (positions, indices)
}

/// Scale the vertices onto a sphere and wind every face outward.
fn polyhedron(vertices: &[[f32; 3]], faces: &[[u32; 3]], radius: f32) -> (Vec<Vec3>, Vec<u32>) {
    let positions: Vec<Vec3> = vertices
        .iter()
        .map(|&v| Vec3::from_array(v).normalize() * radius)
        .collect();
    let mut indices = Vec::with_capacity(faces.len() * 3);
    for &[a, b, c] in faces {
        let (pa, pb, pc) = (
            positions[a as usize],
            positions[b as usize],
            positions[c as usize],
        );
        let centroid = (pa + pb + pc) / 3.0;
        if (pb - pa).cross(pc - pa).dot(centroid) >= 0.0 {
            indices.extend_from_slice(&[a, b, c]);
        } else {
            indices.extend_from_slice(&[a, c, b]);
        }
    }
    (positions, indices)
}

fn octahedron(radius: f32) -> (Vec<Vec3>, Vec<u32>) {
    #[rustfmt::skip]
    let vertices = [
        [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0], [0.0, 0.0, -1.0],
    ];
    #[rustfmt::skip]
    let faces = [
        [0, 2, 4], [0, 4, 3], [0, 3, 5], [0, 5, 2],
        [1, 2, 5], [1, 5, 3], [1, 3, 4], [1, 4, 2],
    ];
    polyhedron(&vertices, &faces, radius)
}

fn icosahedron(radius: f32) -> (Vec<Vec3>, Vec<u32>) {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    #[rustfmt::skip]
    let vertices = [
        [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
        [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
        [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
    ];
    #[rustfmt::skip]
    let faces = [
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];
    polyhedron(&vertices, &faces, radius)
}
