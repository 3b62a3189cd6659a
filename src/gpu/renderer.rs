//! Instanced cube renderer for the carousel items.
//!
//! Every item is one instance of a shared unit cube. Per frame the
//! placements are turned into instance records, uploaded, and drawn in a
//! single call with depth testing.

use glam::Vec3;
use wgpu::util::DeviceExt;

use super::dynamic_buffer::TypedBuffer;
use super::pipeline_helpers::{create_depth_view, single_uniform_group, DEPTH_FORMAT};
use super::render_context::RenderContext;
use crate::camera::{Camera, CameraUniform};
use crate::carousel::Placement;
use crate::error::CarouselError;
use crate::options::LightingOptions;

/// Cleared pixels stay transparent so the page behind shows through.
const CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;

/// Cube mesh vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    /// Object-space position on the unit cube.
    pub position: [f32; 3],
    /// Outward face normal.
    pub normal: [f32; 3],
}

/// Per-item instance record.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeInstance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Base color.
    pub color: [f32; 3],
    /// Additive brightness (non-zero while hovered).
    pub glow: f32,
}

impl CubeInstance {
    /// Instance record for one placement.
    pub fn from_placement(placement: &Placement, lighting: &LightingOptions) -> Self {
        Self {
            model: placement.model_matrix().to_cols_array_2d(),
            color: lighting.item_color,
            glow: if placement.hovered {
                lighting.hover_glow
            } else {
                0.0
            },
        }
    }
}

/// GPU lighting uniform: ambient term and one directional key light.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Ambient color premultiplied by intensity; `w` unused.
    pub ambient: [f32; 4],
    /// Unit direction toward the light in `xyz`, intensity in `w`.
    pub key: [f32; 4],
}

impl LightingUniform {
    /// Uniform for the given options.
    pub fn from_options(options: &LightingOptions) -> Self {
        let ambient = Vec3::from_array(options.ambient_color) * options.ambient_intensity;
        let direction = Vec3::from_array(options.light_position).normalize_or(Vec3::Y);
        Self {
            ambient: ambient.extend(0.0).to_array(),
            key: direction.extend(options.light_intensity).to_array(),
        }
    }
}

/// Unit cube centered on the origin: 24 vertices (flat normals per face)
/// and 36 counter-clockwise indices.
pub fn cube_mesh() -> (Vec<CubeVertex>, Vec<u16>) {
    // (normal, tangent u, tangent v) with u × v = normal.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = (normal + u * su + v * sv) * 0.5;
            vertices.push(CubeVertex {
                position: position.to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend([0, 1, 2, 0, 2, 3].map(|i| base + i));
    }
    (vertices, indices)
}

/// Draws the ring of cubes into a surface.
pub struct CarouselRenderer {
    context: RenderContext,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instances: TypedBuffer<CubeInstance>,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    camera_uniform: CameraUniform,
    lighting_buffer: wgpu::Buffer,
    lighting_bind_group: wgpu::BindGroup,
    lighting: LightingOptions,
    depth_view: wgpu::TextureView,
}

impl CarouselRenderer {
    /// Create the GPU context for `target` and build the pipeline.
    ///
    /// # Errors
    ///
    /// [`CarouselError::Gpu`] if no usable adapter, device or surface
    /// configuration is available.
    pub async fn create(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        lighting: &LightingOptions,
    ) -> Result<Self, CarouselError> {
        let context = RenderContext::new(target, size).await?;
        Ok(Self::new(context, lighting))
    }

    /// Build the pipeline and buffers on an existing context.
    pub fn new(context: RenderContext, lighting: &LightingOptions) -> Self {
        let device = &context.device;
        let (vertices, indices) = cube_mesh();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instances = TypedBuffer::with_capacity(
            device,
            "Cube Instance Buffer",
            8,
            wgpu::BufferUsages::VERTEX,
        );

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let (camera_layout, camera_bind_group) = single_uniform_group(
            device,
            "Camera",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            &camera_buffer,
        );

        let lighting_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lighting Buffer"),
            contents: bytemuck::cast_slice(&[LightingUniform::from_options(lighting)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let (lighting_layout, lighting_bind_group) = single_uniform_group(
            device,
            "Lighting",
            wgpu::ShaderStages::FRAGMENT,
            &lighting_buffer,
        );

        let pipeline =
            Self::create_pipeline(&context, &camera_layout, &lighting_layout);
        let (width, height) = context.size();
        let depth_view = create_depth_view(device, width, height);
        let index_count = indices.len() as u32;

        Self {
            context,
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count,
            instances,
            camera_buffer,
            camera_bind_group,
            camera_uniform,
            lighting_buffer,
            lighting_bind_group,
            lighting: lighting.clone(),
            depth_view,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let device = &context.device;
        let shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/carousel.wgsl"));

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Carousel Pipeline Layout"),
                bind_group_layouts: &[camera_layout, lighting_layout],
                push_constant_ranges: &[],
            });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3, // position
                1 => Float32x3, // normal
            ],
        };

        // Model matrix as four columns, then color and glow.
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                2 => Float32x4,
                3 => Float32x4,
                4 => Float32x4,
                5 => Float32x4,
                6 => Float32x3,
                7 => Float32,
            ],
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Carousel Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout, instance_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Resize the surface and depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth_view = create_depth_view(&self.context.device, width, height);
    }

    /// Replace the lighting parameters.
    pub fn set_lighting(&mut self, lighting: &LightingOptions) {
        self.lighting = lighting.clone();
        self.context.queue.write_buffer(
            &self.lighting_buffer,
            0,
            bytemuck::cast_slice(&[LightingUniform::from_options(lighting)]),
        );
    }

    /// Current surface size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    /// Draw one frame.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped;
    /// other surface errors are logged and the frame skipped.
    pub fn render(&mut self, camera: &Camera, placements: &[Placement]) {
        let frame = match self.context.get_next_frame() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.context.reconfigure();
                return;
            }
            Err(e) => {
                log::warn!("skipping frame: {e}");
                return;
            }
        };

        self.camera_uniform.update_view_proj(camera);
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        let records: Vec<CubeInstance> = placements
            .iter()
            .map(|p| CubeInstance::from_placement(p, &self.lighting))
            .collect();
        let _ = self
            .instances
            .write(&self.context.device, &self.context.queue, &records);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Carousel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if !self.instances.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.camera_bind_group, &[]);
                pass.set_bind_group(1, &self.lighting_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.instances.buffer().slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.index_count, 0, 0..self.instances.count() as u32);
            }
        }
        self.context.submit(encoder);
        frame.present();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::carousel::ItemId;

    #[test]
    fn cube_is_closed_and_outward_facing() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(vertices[i as usize].position));
            let normal = Vec3::from_array(vertices[tri[0] as usize].normal);
            // Counter-clockwise winding seen from outside.
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
        }
        for v in &vertices {
            assert!(v.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn hovered_instances_glow() {
        let lighting = LightingOptions::default();
        let mut placement = Placement {
            id: ItemId(0),
            slot: 0,
            position: Vec3::new(0.0, 0.0, 5.0),
            rotation: 0.0,
            scale: Vec3::ONE,
            hovered: false,
        };
        assert_eq!(CubeInstance::from_placement(&placement, &lighting).glow, 0.0);
        placement.hovered = true;
        let instance = CubeInstance::from_placement(&placement, &lighting);
        assert_eq!(instance.glow, lighting.hover_glow);
        assert_eq!(instance.model[3], [0.0, 0.0, 5.0, 1.0]);
    }

    #[test]
    fn lighting_uniform_normalizes_direction() {
        let uniform = LightingUniform::from_options(&LightingOptions::default());
        let dir = Vec3::new(uniform.key[0], uniform.key[1], uniform.key[2]);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert_eq!(uniform.key[3], 2.8);
    }

    #[test]
    fn gpu_records_have_shader_layout_sizes() {
        assert_eq!(std::mem::size_of::<CubeVertex>(), 24);
        assert_eq!(std::mem::size_of::<CubeInstance>(), 80);
        assert_eq!(std::mem::size_of::<LightingUniform>(), 32);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }
}
