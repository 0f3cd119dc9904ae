use crate::config::AppConfig;
use crate::render::{Mesh, ShaderProgram, ShaderSources};
use anyhow::{anyhow, Context, Result};
use gl::types::GLenum;
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, error, info, warn};
use raw_window_handle::HasRawWindowHandle;
use std::{
    ffi::{c_char, CStr, CString},
    num::NonZeroU32,
};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

/// Window, GL context and the single quad drawn every frame.
///
/// GPU objects are declared ahead of the context and window so they are
/// released while the context is still alive.
pub struct App {
    program: ShaderProgram,
    quad: Mesh,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<(Self, EventLoop<()>)> {
        info!("Initializing application...");

        let event_loop = EventLoopBuilder::new().build()?;
        let window_builder = WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| anyhow!("Failed to create window: {}", e))?;

        let window = window.ok_or_else(|| anyhow!("Display builder did not create a window"))?;
        let raw_window_handle = window.raw_window_handle();

        let (major, minor) = config.rendering.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("Failed to create OpenGL context")?;

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .context("Failed to create GL surface")?;

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        if config.rendering.vsync {
            if let Err(e) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                warn!("Failed to enable vsync: {}", e);
            }
        }

        // Load OpenGL functions
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()),
            Err(_) => std::ptr::null(),
        });

        info!(
            "OpenGL {} ({})",
            gl_string(gl::VERSION).unwrap_or_else(|| "unknown".to_string()),
            gl_string(gl::RENDERER).unwrap_or_else(|| "unknown renderer".to_string())
        );

        let [r, g, b, a] = config.rendering.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
        }

        let shader_path = &config.rendering.shader_path;
        let sources = ShaderSources::from_file(shader_path)
            .with_context(|| format!("Failed to load shader {}", shader_path.display()))?;
        debug!("Fragment shader source:\n{}", sources.fragment);

        let program = ShaderProgram::from_sources(&sources)
            .with_context(|| format!("Failed to build shader {}", shader_path.display()))?;
        program.set_used();

        let quad = Mesh::quad()?;

        Ok((
            Self {
                program,
                quad,
                gl_surface,
                gl_context,
                window,
            },
            event_loop,
        ))
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<()> {
        event_loop.run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down");
                    elwt.exit();
                }
                WindowEvent::Resized(size) => self.resize(size),
                WindowEvent::RedrawRequested => {
                    if let Err(e) = self.render() {
                        error!("Render failed: {:#}", e);
                        elwt.exit();
                    }
                }
                _ => (),
            },
            Event::AboutToWait => {
                self.window.request_redraw();
            }
            _ => (),
        })?;

        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };

        self.gl_surface.resize(&self.gl_context, width, height);
        unsafe {
            gl::Viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    fn render(&mut self) -> Result<()> {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.program.set_used();
        self.quad.draw();

        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("Failed to swap buffers")
    }
}

fn gl_string(name: GLenum) -> Option<String> {
    unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            return None;
        }
        Some(CStr::from_ptr(ptr as *const c_char).to_string_lossy().into_owned())
    }
}
