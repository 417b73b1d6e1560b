mod colour;
mod display;
mod escape;
mod framebuffer;
mod input;
mod pixel;
mod present;
mod render;
mod scale;
mod screen;
mod session;
mod view;

use std::{io, process};

use anyhow::Context;
use log::error;
use winit::{dpi::LogicalSize, event_loop::ControlFlow, window::WindowBuilder};

use crate::{
    framebuffer::Framebuffer,
    pixel::Pixel,
    present::Presenter,
    render::render_frame,
    session::{Session, Step},
};

/// Exit status when the display or the renderer can't be brought up.
const FATAL_EXIT_CODE: i32 = 3;

const INITIAL_WINDOW_SIZE: LogicalSize<u32> = LogicalSize {
    width: 320,
    height: 240,
};

fn fatal<T>(error: anyhow::Error) -> T {
    error!("{:#}", error);
    process::exit(FATAL_EXIT_CODE)
}

fn main() {
    env_logger::init();

    let event_loop = display::create_event_loop().unwrap_or_else(fatal);
    let window = WindowBuilder::new()
        .with_inner_size(INITIAL_WINDOW_SIZE)
        .with_resizable(true)
        .build(&event_loop)
        .context("Couldn't create window")
        .unwrap_or_else(fatal);

    let mut presenter = Presenter::new(&window)
        .context("Couldn't create renderer")
        .unwrap_or_else(fatal);

    let mut framebuffer = Framebuffer::new(presenter.frame_size());
    let mut session = Session::new(io::stdout());

    // To present frames in realtime, *don't* set `control_flow` to `Wait`.
    event_loop.run(move |event, _, control_flow| {
        match session.on_event(&event, window.id()) {
            Step::Continue => {}
            Step::RequestRedraw => window.request_redraw(),
            Step::Render => {
                // Queried every frame, so a resize shows up on the very next one.
                let physical_size = window.inner_size();
                let frame_size = screen::Size::logical(physical_size, window.scale_factor());
                presenter.resize(screen::Size::from(physical_size), frame_size);
                if !presenter.is_drawable() {
                    return;
                }
                framebuffer.resize(frame_size);

                framebuffer.clear(Pixel::BLUE);
                render_frame(&mut framebuffer, frame_size, session.view());

                if let Err(error) = presenter.present(&framebuffer) {
                    error!("Couldn't present frame: {}", error);
                    *control_flow = ControlFlow::ExitWithCode(FATAL_EXIT_CODE);
                }
            }
            Step::Exit => *control_flow = ControlFlow::Exit,
        }
    });
}
