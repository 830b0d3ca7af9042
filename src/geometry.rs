//! CPU-side meshes for the instanced draws.

use glam::Vec3;
use std::f32::consts::{PI, TAU};
use tree_core::{star_outline, STAR_DEPTH};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    fn push(&mut self, v: Vertex) -> u16 {
        self.vertices.push(v);
        (self.vertices.len() - 1) as u16
    }

    fn quad(&mut self, a: u16, b: u16, c: u16, d: u16) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
}

/// Latitude/longitude sphere; counter-clockwise seen from outside.
pub fn uv_sphere(radius: f32, stacks: u32, sectors: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for i in 0..=stacks {
        let theta = i as f32 / stacks as f32 * PI;
        for j in 0..=sectors {
            let phi = j as f32 / sectors as f32 * TAU;
            let n = Vec3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
            mesh.push(Vertex::new(n * radius, n));
        }
    }
    let row = sectors + 1;
    for i in 0..stacks {
        for j in 0..sectors {
            let a = (i * row + j) as u16;
            let b = ((i + 1) * row + j) as u16;
            mesh.quad(a, b, b + 1, a + 1);
        }
    }
    mesh
}

/// Axis-aligned unit cube centered on the origin, flat-shaded.
pub fn cube() -> Mesh {
    let mut mesh = Mesh::default();
    let faces = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    for n in faces {
        // two in-face axes such that u x v == n
        let u = if n.y.abs() > 0.5 { Vec3::Z * n.y.signum() } else { Vec3::Y.cross(n) };
        let v = n.cross(u);
        let c = n * 0.5;
        let a = mesh.push(Vertex::new(c - u * 0.5 - v * 0.5, n));
        let b = mesh.push(Vertex::new(c + u * 0.5 - v * 0.5, n));
        let cc = mesh.push(Vertex::new(c + u * 0.5 + v * 0.5, n));
        let d = mesh.push(Vertex::new(c - u * 0.5 + v * 0.5, n));
        mesh.quad(a, b, cc, d);
    }
    mesh
}

/// Five-pointed star extruded along Z and centered on the origin.
pub fn star_prism() -> Mesh {
    let outline = star_outline();
    let half = STAR_DEPTH * 0.5;
    let mut mesh = Mesh::default();

    for (z, n) in [(half, Vec3::Z), (-half, Vec3::NEG_Z)] {
        let center = mesh.push(Vertex::new(Vec3::new(0.0, 0.0, z), n));
        let first = mesh.vertices.len() as u16;
        for p in &outline {
            mesh.push(Vertex::new(p.extend(z), n));
        }
        let count = outline.len() as u16;
        for i in 0..count {
            let a = first + i;
            let b = first + (i + 1) % count;
            if z > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    for (i, a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        let edge = b - *a;
        let n = Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero();
        let af = mesh.push(Vertex::new(a.extend(half), n));
        let ab = mesh.push(Vertex::new(a.extend(-half), n));
        let bb = mesh.push(Vertex::new(b.extend(-half), n));
        let bf = mesh.push(Vertex::new(b.extend(half), n));
        mesh.quad(af, ab, bb, bf);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(mesh: &Mesh, tri: &[u16]) -> Vec3 {
        let p = |i: u16| Vec3::from(mesh.vertices[i as usize].position);
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
    }

    #[test]
    fn cube_faces_wind_outward() {
        let mesh = cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for tri in mesh.indices.chunks(3) {
            let n = Vec3::from(mesh.vertices[tri[0] as usize].normal);
            assert!(triangle_normal(&mesh, tri).dot(n) > 0.0);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = uv_sphere(1.0, 24, 24);
        assert_eq!(mesh.vertices.len(), 25 * 25);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 1.0).abs() < 1e-5);
        }
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn star_prism_is_thin_and_closed() {
        let mesh = star_prism();
        let max_z = mesh
            .vertices
            .iter()
            .map(|v| v.position[2].abs())
            .fold(0.0_f32, f32::max);
        assert!((max_z - STAR_DEPTH * 0.5).abs() < 1e-6);
        // two fans of 10 triangles plus 10 side quads
        assert_eq!(mesh.indices.len(), (10 + 10 + 10 * 2) * 3);
    }
}
