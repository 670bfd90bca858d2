#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod glow;

use std::time::Instant;

use error_iter::ErrorIter as _;
use log::{error, info};
use pixels::{Error, Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use crate::config::GlowConfig;
use crate::glow::canvas::PixelCanvas;
use crate::glow::Glow;

/// Opens a window and runs the glow until it is closed. Expects the logger to be
/// initialised already.
pub fn run(config: GlowConfig) -> Result<(), Error> {
    let event_loop = EventLoop::new().map_err(|e| Error::UserDefined(Box::new(e)))?;
    let mut input = WinitInputHelper::new();

    let window = {
        let size = LogicalSize::new(config.width, config.height);
        WindowBuilder::new()
            .with_title("Hex Glow")
            .with_inner_size(size)
            .build(&event_loop)
            .map_err(|e| Error::UserDefined(Box::new(e)))?
    };

    let size = window.inner_size();
    let mut pixels = {
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        Pixels::new(size.width, size.height, surface_texture)?
    };

    let clock = Instant::now();
    let now = || clock.elapsed().as_millis() as u64;

    let mut canvas = PixelCanvas::new(size.width, size.height);
    let mut glow = Glow::new(config, size.width, size.height, now());
    info!("started at {}x{}", size.width, size.height);

    let res = event_loop.run(|event, elwt| {
        // one animation tick per frame
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = event
        {
            glow.tick(&mut canvas, now());
            canvas.present(pixels.frame_mut());
            if let Err(err) = pixels.render() {
                log_error("pixels.render", err);
                elwt.exit();
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(KeyCode::Escape) || input.close_requested() {
                info!("close requested; stopping");
                elwt.exit();
                return;
            }

            if let Some(size) = input.window_resized() {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    log_error("pixels.resize_surface", err);
                    elwt.exit();
                    return;
                }
                if let Err(err) = pixels.resize_buffer(size.width, size.height) {
                    log_error("pixels.resize_buffer", err);
                    elwt.exit();
                    return;
                }
                canvas.resize(size.width, size.height);
                glow.resize(size.width, size.height, now());
            }

            // RedrawRequested only fires once unless asked again
            window.request_redraw();
        }
    });
    res.map_err(|e| Error::UserDefined(Box::new(e)))
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
