use crate::resources::geometry::{Attribute, Geometry};
use wgpu::VertexFormat;

/// Subdivision counts for [`create_box`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxSegments {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Default for BoxSegments {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            depth: 1,
        }
    }
}

/// Per-face plane description: which vertex component each planar axis
/// writes to, their directions, and the plane extents.
struct FacePlane {
    u: usize,
    v: usize,
    w: usize,
    u_dir: f32,
    v_dir: f32,
    width: f32,
    height: f32,
    depth: f32,
    grid_x: u32,
    grid_y: u32,
}

#[derive(Default)]
struct BoxBuffers {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

/// Builds a box centred on the origin, subdivided along each axis.
///
/// Faces are emitted in the order +X, -X, +Y, -Y, +Z, -Z and each face gets
/// its own geometry group, so group `i` is drawn with material `i`.
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32, segments: BoxSegments) -> Geometry {
    let sx = segments.width.max(1);
    let sy = segments.height.max(1);
    let sz = segments.depth.max(1);

    // (x, y, z) = (0, 1, 2)
    #[rustfmt::skip]
    let faces = [
        FacePlane { u: 2, v: 1, w: 0, u_dir: -1.0, v_dir: -1.0, width: depth, height, depth: width, grid_x: sz, grid_y: sy },
        FacePlane { u: 2, v: 1, w: 0, u_dir: 1.0, v_dir: -1.0, width: depth, height, depth: -width, grid_x: sz, grid_y: sy },
        FacePlane { u: 0, v: 2, w: 1, u_dir: 1.0, v_dir: 1.0, width, height: depth, depth: height, grid_x: sx, grid_y: sz },
        FacePlane { u: 0, v: 2, w: 1, u_dir: 1.0, v_dir: -1.0, width, height: depth, depth: -height, grid_x: sx, grid_y: sz },
        FacePlane { u: 0, v: 1, w: 2, u_dir: 1.0, v_dir: -1.0, width, height, depth, grid_x: sx, grid_y: sy },
        FacePlane { u: 0, v: 1, w: 2, u_dir: -1.0, v_dir: -1.0, width, height, depth: -depth, grid_x: sx, grid_y: sy },
    ];

    let mut buffers = BoxBuffers::default();
    let mut geo = Geometry::new();

    for (material_index, face) in faces.iter().enumerate() {
        let group_start = buffers.indices.len() as u32;
        build_plane(face, &mut buffers);
        let group_count = buffers.indices.len() as u32 - group_start;
        geo.add_group(group_start, group_count, material_index);
    }

    geo.set_attribute(
        "position",
        Attribute::new_planar(&buffers.positions, VertexFormat::Float32x3),
    );
    geo.set_attribute(
        "normal",
        Attribute::new_planar(&buffers.normals, VertexFormat::Float32x3),
    );
    geo.set_attribute("uv", Attribute::new_planar(&buffers.uvs, VertexFormat::Float32x2));
    geo.set_indices(&buffers.indices);

    geo.compute_bounding_volume();

    geo
}

fn build_plane(face: &FacePlane, out: &mut BoxBuffers) {
    let base = out.positions.len() as u32;

    let segment_width = face.width / face.grid_x as f32;
    let segment_height = face.height / face.grid_y as f32;

    let width_half = face.width / 2.0;
    let height_half = face.height / 2.0;
    let depth_half = face.depth / 2.0;

    let grid_x1 = face.grid_x + 1;
    let grid_y1 = face.grid_y + 1;

    for iy in 0..grid_y1 {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..grid_x1 {
            let x = ix as f32 * segment_width - width_half;

            let mut position = [0.0_f32; 3];
            position[face.u] = x * face.u_dir;
            position[face.v] = y * face.v_dir;
            position[face.w] = depth_half;
            out.positions.push(position);

            let mut normal = [0.0_f32; 3];
            normal[face.w] = if face.depth > 0.0 { 1.0 } else { -1.0 };
            out.normals.push(normal);

            out.uvs.push([
                ix as f32 / face.grid_x as f32,
                1.0 - iy as f32 / face.grid_y as f32,
            ]);
        }
    }

    // Two triangles per cell, counter-clockwise when viewed from outside
    for iy in 0..face.grid_y {
        for ix in 0..face.grid_x {
            let a = base + ix + grid_x1 * iy;
            let b = base + ix + grid_x1 * (iy + 1);
            let c = base + (ix + 1) + grid_x1 * (iy + 1);
            let d = base + (ix + 1) + grid_x1 * iy;

            out.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}
