use cgmath::{Matrix, Matrix4, Rad, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;
use wgpu::Device;

use super::vertex::Vertex3D;
use crate::gfx::geometry::GeometryData;
use crate::gfx::resources::material::MaterialId;
use crate::wgpu_utils::{
    binding_builder::{BindGroupBuilder, BindGroupLayoutWithDesc},
    uniform_buffer::UniformBuffer,
};

/// Triangle mesh plus the edge list used for wireframe drawing
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    edge_indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    edge_buffer: Option<wgpu::Buffer>,
    pub vertex_count: u32,
    pub index_count: u32,
    pub edge_index_count: u32,
}

impl Mesh {
    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let vertices = geometry.to_vertices();
        let edge_indices = geometry.wireframe_indices();
        Self {
            vertex_count: vertices.len() as u32,
            index_count: geometry.indices.len() as u32,
            edge_index_count: edge_indices.len() as u32,
            vertices,
            indices: geometry.indices.clone(),
            edge_indices,
            vertex_buffer: None,
            index_buffer: None,
            edge_buffer: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn edge_indices(&self) -> &[u32] {
        &self.edge_indices
    }

    pub fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some()
    }

    fn init_gpu_resources(&mut self, device: &Device, label: &str) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.edge_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Edge Buffer")),
            contents: bytemuck::cast_slice(&self.edge_indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Position, XYZ Euler rotation (radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Rotation applied X first in the parent frame, i.e. `Rx * Ry * Rz`
    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * self.rotation_matrix()
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// Per-object GPU data. Must match `ObjectUniform` in the shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// x = receives shadows
    pub flags: [f32; 4],
}

impl ObjectUniform {
    pub fn from_object(object: &Object) -> Self {
        let model = object.transform.matrix();
        let normal_matrix = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model: model.into(),
            normal_matrix: normal_matrix.into(),
            flags: [if object.receive_shadow { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

pub struct ObjectGpuResources {
    uniform: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

/// A renderable object: meshes, a material reference, transform and shadow flags
pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub material: MaterialId,
    pub transform: Transform,
    pub visible: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(name: &str, geometry: &GeometryData, material: &str) -> Self {
        Self {
            name: name.to_string(),
            meshes: vec![Mesh::from_geometry(geometry)],
            material: material.to_string(),
            transform: Transform::default(),
            visible: true,
            cast_shadow: false,
            receive_shadow: false,
            gpu_resources: None,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn with_cast_shadow(mut self, cast: bool) -> Self {
        self.cast_shadow = cast;
        self
    }

    pub fn with_receive_shadow(mut self, receive: bool) -> Self {
        self.receive_shadow = receive;
        self
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.transform.matrix()
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &BindGroupLayoutWithDesc) {
        for mesh in self.meshes.iter_mut() {
            mesh.init_gpu_resources(device, &self.name);
        }

        let uniform = UniformBuffer::new_with_data(device, &ObjectUniform::from_object(self));
        let bind_group = BindGroupBuilder::new(layout)
            .resource(uniform.binding_resource())
            .create(device, &format!("{} Object Bind Group", self.name));

        log::debug!(
            "uploaded '{}': {} vertices, {} triangles",
            self.name,
            self.meshes.iter().map(|m| m.vertex_count).sum::<u32>(),
            self.meshes.iter().map(|m| m.index_count / 3).sum::<u32>()
        );

        self.gpu_resources = Some(ObjectGpuResources {
            uniform,
            bind_group,
        });
    }

    /// Writes the current transform and flags to the GPU
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        let content = ObjectUniform::from_object(self);
        if let Some(gpu) = self.gpu_resources.as_mut() {
            gpu.uniform.update_content(queue, content);
        }
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|gpu| &gpu.bind_group)
    }
}

pub trait DrawObject {
    fn draw_mesh(&mut self, mesh: &Mesh);
    fn draw_mesh_edges(&mut self, mesh: &Mesh);
    fn draw_object(&mut self, object: &Object);
    fn draw_object_edges(&mut self, object: &Object);
}

impl DrawObject for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, mesh: &Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // not uploaded yet
        };
        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_mesh_edges(&mut self, mesh: &Mesh) {
        let (Some(vertex_buffer), Some(edge_buffer)) = (&mesh.vertex_buffer, &mesh.edge_buffer)
        else {
            return;
        };
        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.edge_index_count, 0, 0..1);
    }

    fn draw_object(&mut self, object: &Object) {
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }

    fn draw_object_edges(&mut self, object: &Object) {
        for mesh in &object.meshes {
            self.draw_mesh_edges(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{generate_box, generate_plane};
    use cgmath::{InnerSpace, Vector4};
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vector4<f32>, b: Vector4<f32>) -> bool {
        (a - b).magnitude() < 1e-5
    }

    #[test]
    fn translation_is_applied_last() {
        let transform = Transform {
            position: Vector3::new(0.0, 1.0, 0.0),
            rotation: Vector3::new(0.0, FRAC_PI_2, 0.0),
            scale: Vector3::new(2.0, 2.0, 2.0),
        };
        // +X scaled to 2, turned to -Z by the Y rotation, then lifted by 1
        let p = transform.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!(close(p, Vector4::new(0.0, 1.0, -2.0, 1.0)));
    }

    #[test]
    fn euler_order_rotates_z_first() {
        let transform = Transform {
            rotation: Vector3::new(FRAC_PI_2, 0.0, FRAC_PI_2),
            ..Transform::default()
        };
        // Rz takes +X to +Y, then Rx takes +Y to +Z
        let p = transform.matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!(close(p, Vector4::new(0.0, 0.0, 1.0, 0.0)));
    }

    #[test]
    fn ground_plane_faces_up() {
        let plane = Object::new("plane", &generate_plane(30.0, 30.0, 1, 1), "plane")
            .with_rotation(-FRAC_PI_2, 0.0, 0.0);
        let normal = plane.model_matrix() * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!(close(normal, Vector4::new(0.0, 1.0, 0.0, 0.0)));
    }

    #[test]
    fn object_uniform_carries_receive_flag() {
        let object = Object::new("box", &generate_box(2.0, 2.0, 2.0), "box")
            .with_position(0.0, 1.0, 0.0)
            .with_receive_shadow(true);
        let uniform = ObjectUniform::from_object(&object);
        assert_eq!(uniform.flags[0], 1.0);
        assert_eq!(uniform.model[3], [0.0, 1.0, 0.0, 1.0]);
        // no rotation or scale: the normal matrix keeps normals unchanged
        assert_eq!(uniform.normal_matrix[1][..3], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn mesh_keeps_triangle_and_edge_lists() {
        let mesh = Mesh::from_geometry(&generate_box(2.0, 2.0, 2.0));
        assert_eq!(mesh.vertex_count, 24);
        assert_eq!(mesh.index_count, 36);
        assert_eq!(mesh.edge_index_count, 60);
        assert!(!mesh.is_uploaded());
    }

    #[test]
    fn new_objects_are_visible_without_shadows() {
        let object = Object::new("box", &generate_box(1.0, 1.0, 1.0), "box");
        assert!(object.visible);
        assert!(!object.cast_shadow && !object.receive_shadow);
        assert!(object.bind_group().is_none());
    }
}
