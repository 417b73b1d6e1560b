/*!
Puts CPU-rendered frames on screen.

Frames are rendered at the window's logical size, uploaded into a texture of
that size and stretched over the surface with a single screen-covering quad. When the surface is sRGB the texture is too, so
the grey levels written by the renderer reach the screen unchanged.
*/

use std::num::NonZeroU32;

use anyhow::Context;
use log::{debug, info, warn};
use winit::window::Window;

use crate::{framebuffer::Framebuffer, screen};

pub struct Presenter {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    bind_group_layout: wgpu::BindGroupLayout,
    render_pipeline: wgpu::RenderPipeline,
    sampler: wgpu::Sampler,
    texture_format: wgpu::TextureFormat,
    frame_texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    surface_size: screen::Size,
    frame_size: screen::Size,
    drawable: bool,
}

impl Presenter {
    pub fn new(window: &Window) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let surface = unsafe { instance.create_surface(window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: Default::default(),
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .context("no graphics adapter can draw to the window")?;
        info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))
        .context("couldn't open the graphics device")?;

        let surface_format = surface
            .get_supported_formats(&adapter)
            .first()
            .copied()
            .context("the window surface supports no texture formats")?;
        let texture_format = if surface_format.describe().srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };
        info!(
            "surface format {:?}, frame texture format {:?}",
            surface_format, texture_format
        );

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: 0,
            height: 0,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("render-shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("render-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("render-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render-pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex_main",
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_configuration.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        // Nearest filtering, so a logical pixel stays a solid block on HiDPI.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

        let empty = screen::Size::new(0, 0);
        let (frame_texture, bind_group) =
            create_frame_texture(&device, &bind_group_layout, &sampler, texture_format, empty);

        let mut presenter = Self {
            surface,
            device,
            queue,
            surface_configuration,
            bind_group_layout,
            render_pipeline,
            sampler,
            texture_format,
            frame_texture,
            bind_group,
            surface_size: empty,
            frame_size: empty,
            drawable: false,
        };
        presenter.resize(
            screen::Size::from(window.inner_size()),
            screen::Size::logical(window.inner_size(), window.scale_factor()),
        );
        Ok(presenter)
    }

    pub fn frame_size(&self) -> screen::Size {
        self.frame_size
    }

    /// Whether the current sizes can be drawn at all. Frames are skipped while
    /// they can't.
    pub fn is_drawable(&self) -> bool {
        self.drawable
    }

    /// Follows the live window size. Does nothing while the sizes are unchanged.
    pub fn resize(&mut self, surface_size: screen::Size, frame_size: screen::Size) {
        if surface_size == self.surface_size && frame_size == self.frame_size {
            return;
        }
        debug!("resizing surface to {:?}, frame to {:?}", surface_size, frame_size);
        self.surface_size = surface_size;
        self.frame_size = frame_size;

        let max_dimension = self.device.limits().max_texture_dimension_2d;
        self.drawable = can_draw(surface_size, frame_size, max_dimension);
        if !self.drawable {
            if !surface_size.is_empty() && !frame_size.is_empty() {
                warn!(
                    "window {:?} is beyond the device's {} pixel limit, not drawing",
                    surface_size, max_dimension
                );
            }
            return;
        }

        self.surface_configuration.width = surface_size.width;
        self.surface_configuration.height = surface_size.height;
        self.surface.configure(&self.device, &self.surface_configuration);

        self.frame_texture.destroy();
        (self.frame_texture, self.bind_group) = create_frame_texture(
            &self.device,
            &self.bind_group_layout,
            &self.sampler,
            self.texture_format,
            frame_size,
        );
    }

    /**
    Uploads `framebuffer` and presents it.

    A lost, outdated or timed-out surface skips the frame; the next one goes
    through once the surface is back. Only running out of memory is an error.
    */
    pub fn present(&mut self, framebuffer: &Framebuffer) -> Result<(), wgpu::SurfaceError> {
        let size = self.frame_size;
        if !self.drawable {
            return Ok(());
        }
        debug_assert_eq!(framebuffer.size(), size);

        let extent = wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        };
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.frame_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            framebuffer.as_bytes(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: NonZeroU32::new(4 * size.width),
                rows_per_image: NonZeroU32::new(size.height),
            },
            extent,
        );

        let surface_texture = match self.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(error @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                debug!("reconfiguring surface: {}", error);
                self.surface.configure(&self.device, &self.surface_configuration);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("timed out waiting for the next surface texture");
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut command_encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());

        command_encoder.push_debug_group("render-pass");
        {
            let mut render_pass = command_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..4, 0..1);
        }
        command_encoder.pop_debug_group();

        self.queue.submit([command_encoder.finish()]);
        surface_texture.present();

        Ok(())
    }
}

fn can_draw(surface_size: screen::Size, frame_size: screen::Size, max_dimension: u32) -> bool {
    !surface_size.is_empty()
        && !frame_size.is_empty()
        && surface_size.fits_within(max_dimension)
        && frame_size.fits_within(max_dimension)
}

fn create_frame_texture(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    format: wgpu::TextureFormat,
    size: screen::Size,
) -> (wgpu::Texture, wgpu::BindGroup) {
    let frame_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("frame-texture"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING,
    });

    let frame_texture_view = frame_texture.create_view(&wgpu::TextureViewDescriptor::default());

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("render-bind-group"),
        layout: bind_group_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&frame_texture_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    (frame_texture, bind_group)
}
