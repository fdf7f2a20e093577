//! # Primitive Shape Generation
//!
//! This module contains functions to generate common 3D primitive shapes.
//! All shapes are generated with proper normals and texture coordinates and
//! use a Y-up, right-handed coordinate system with counter-clockwise front faces.

use super::GeometryData;
use std::f32::consts::PI;

/// One face of a box: outward normal plus the in-face U and V axes (U x V = normal)
struct BoxFace {
    normal: [f32; 3],
    u_axis: [f32; 3],
    v_axis: [f32; 3],
}

const BOX_FACES: [BoxFace; 6] = [
    // +X
    BoxFace { normal: [1.0, 0.0, 0.0], u_axis: [0.0, 0.0, -1.0], v_axis: [0.0, 1.0, 0.0] },
    // -X
    BoxFace { normal: [-1.0, 0.0, 0.0], u_axis: [0.0, 0.0, 1.0], v_axis: [0.0, 1.0, 0.0] },
    // +Y
    BoxFace { normal: [0.0, 1.0, 0.0], u_axis: [1.0, 0.0, 0.0], v_axis: [0.0, 0.0, -1.0] },
    // -Y
    BoxFace { normal: [0.0, -1.0, 0.0], u_axis: [1.0, 0.0, 0.0], v_axis: [0.0, 0.0, 1.0] },
    // +Z
    BoxFace { normal: [0.0, 0.0, 1.0], u_axis: [1.0, 0.0, 0.0], v_axis: [0.0, 1.0, 0.0] },
    // -Z
    BoxFace { normal: [0.0, 0.0, -1.0], u_axis: [-1.0, 0.0, 0.0], v_axis: [0.0, 1.0, 0.0] },
];

/// Generate a box centered at the origin
///
/// # Arguments
/// * `width` - Extent along X
/// * `height` - Extent along Y
/// * `depth` - Extent along Z
///
/// Each face has its own four vertices so normals stay flat, with UVs
/// spanning the full texture.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let half = [width * 0.5, height * 0.5, depth * 0.5];

    // extent of the box along an axis vector (axes are unit and axis-aligned)
    let extent = |axis: [f32; 3]| {
        axis[0].abs() * half[0] + axis[1].abs() * half[1] + axis[2].abs() * half[2]
    };

    for face in BOX_FACES.iter() {
        let base = data.vertices.len() as u32;
        let hn = extent(face.normal);
        let hu = extent(face.u_axis);
        let hv = extent(face.v_axis);

        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (su, sv) in corners {
            let mut position = [0.0; 3];
            for axis in 0..3 {
                position[axis] = face.normal[axis] * hn
                    + face.u_axis[axis] * hu * su
                    + face.v_axis[axis] * hv * sv;
            }
            data.vertices.push(position);
            data.normals.push(face.normal);
            // v = 0 at the top edge of the face
            data.tex_coords.push([(su + 1.0) * 0.5, (1.0 - sv) * 0.5]);
        }

        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of segments around the equator (min 3)
/// * `height_segments` - Number of segments from pole to pole (min 2)
///
/// Degenerate triangles at the poles are skipped.
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(3);
    let h_segs = height_segments.max(2);

    for iy in 0..=h_segs {
        let v = iy as f32 / h_segs as f32;
        let theta = v * PI; // 0 at the north pole

        for ix in 0..=w_segs {
            let u = ix as f32 / w_segs as f32;
            let phi = u * 2.0 * PI;

            let nx = -phi.cos() * theta.sin();
            let ny = theta.cos();
            let nz = phi.sin() * theta.sin();

            data.vertices.push([radius * nx, radius * ny, radius * nz]);
            data.normals.push([nx, ny, nz]);
            data.tex_coords.push([u, v]);
        }
    }

    let row = w_segs + 1;
    for iy in 0..h_segs {
        for ix in 0..w_segs {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h_segs - 1 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    data
}

/// Generate a plane in the XY plane facing +Z
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `height` - Height of the plane (Y direction)
/// * `width_segments` - Number of subdivisions along width
/// * `height_segments` - Number of subdivisions along height
///
/// Rotate it by -90° around X to lay it flat on the ground.
pub fn generate_plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let h_segs = height_segments.max(1);

    let segment_width = width / w_segs as f32;
    let segment_height = height / h_segs as f32;

    for iy in 0..=h_segs {
        let y = iy as f32 * segment_height - height * 0.5;
        for ix in 0..=w_segs {
            let x = ix as f32 * segment_width - width * 0.5;

            // first row is the top edge
            data.vertices.push([x, -y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords
                .push([ix as f32 / w_segs as f32, iy as f32 / h_segs as f32]);
        }
    }

    let row = w_segs + 1;
    for iy in 0..h_segs {
        for ix in 0..w_segs {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = (ix + 1) + row * (iy + 1);
            let d = (ix + 1) + row * iy;

            data.indices.extend_from_slice(&[a, b, d]);
            data.indices.extend_from_slice(&[b, c, d]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Every triangle's geometric normal agrees with its vertex normal
    fn assert_ccw_outward(data: &GeometryData) {
        for tri in data.indices.chunks(3) {
            let [p0, p1, p2] = [0, 1, 2].map(|k| data.vertices[tri[k] as usize]);
            let face = cross(sub(p1, p0), sub(p2, p0));
            let n = data.normals[tri[0] as usize];
            assert!(dot(face, n) > 0.0, "triangle {:?} winds clockwise", tri);
        }
    }

    #[test]
    fn box_generation() {
        let cube = generate_box(2.0, 2.0, 2.0);
        assert_eq!(cube.vertices.len(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.indices.len(), 36); // 6 faces * 2 triangles * 3 indices
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        for v in &cube.vertices {
            assert!(v.iter().all(|c| c.abs() == 1.0));
        }
        assert_ccw_outward(&cube);
    }

    #[test]
    fn box_respects_each_extent() {
        let slab = generate_box(4.0, 1.0, 2.0);
        let max = |axis: usize| {
            slab.vertices
                .iter()
                .map(|v| v[axis])
                .fold(f32::MIN, f32::max)
        };
        assert_eq!((max(0), max(1), max(2)), (2.0, 0.5, 1.0));
    }

    #[test]
    fn sphere_generation() {
        let sphere = generate_sphere(1.0, 8, 6);
        assert_eq!(sphere.vertices.len(), 9 * 7);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
        // pole rows contribute one triangle per segment, the rest two
        assert_eq!(sphere.triangle_count(), 2 * 8 * 6 - 2 * 8);
        assert_ccw_outward(&sphere);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sphere = generate_sphere(4.0, 50, 50);
        assert_eq!(sphere.vertex_count(), 51 * 51);
        for v in &sphere.vertices {
            let len = dot(*v, *v).sqrt();
            assert!((len - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_clamps_resolution() {
        let sphere = generate_sphere(1.0, 0, 0);
        assert_eq!(sphere.vertex_count(), 4 * 3);
    }

    #[test]
    fn plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_ccw_outward(&plane);
    }

    #[test]
    fn plane_spans_its_size() {
        let plane = generate_plane(30.0, 30.0, 1, 1);
        assert_eq!(plane.vertices[0], [-15.0, 15.0, 0.0]);
        assert_eq!(plane.vertices[3], [15.0, -15.0, 0.0]);
        assert_eq!(plane.tex_coords[3], [1.0, 1.0]);
    }
}
