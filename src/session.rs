use std::io::{self, Write};

use log::{debug, warn};
use winit::{
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    window::WindowId,
};

use crate::{input::action_for_key, view::ViewState};

/// What the event loop should do after an event has been handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    RequestRedraw,
    Render,
    Exit,
}

/**
State owned by the event loop between ticks.

Each view update is written to `console` as a `name: value` line. The console
is flushed once per event batch, not per line.

Quitting is deferred: [`Session::request_quit`] only marks the session, and
the loop stops after the frame for the current batch has been drawn.
*/
pub struct Session<W> {
    view: ViewState,
    quit: bool,
    console: W,
}

impl<W: Write> Session<W> {
    pub fn new(console: W) -> Self {
        Self {
            view: ViewState::default(),
            quit: false,
            console,
        }
    }

    /**
    Handles one event from `window`'s loop.

    Input is applied as it arrives. At the end of the batch the console is
    flushed and a redraw requested, the redraw renders, and only after that
    does a pending quit turn into [`Step::Exit`].
    */
    pub fn on_event(&mut self, event: &Event<'_, ()>, window: WindowId) -> Step {
        match event {
            Event::WindowEvent { window_id, event } if *window_id == window => match event {
                WindowEvent::CloseRequested => self.request_quit(),
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state,
                            virtual_keycode,
                            ..
                        },
                    ..
                } => {
                    if let Err(error) = self.keyboard_input(*state, *virtual_keycode) {
                        warn!("couldn't write view update: {}", error);
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                if let Err(error) = self.end_batch() {
                    warn!("couldn't flush stdout: {}", error);
                }
                return Step::RequestRedraw;
            }
            Event::RedrawRequested(window_id) if *window_id == window => return Step::Render,
            Event::RedrawEventsCleared if self.should_quit() => return Step::Exit,
            _ => {}
        }
        Step::Continue
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Applies a key-down's binding, if it has one. Releases are ignored.
    pub fn keyboard_input(
        &mut self,
        state: ElementState,
        key: Option<VirtualKeyCode>,
    ) -> io::Result<()> {
        if state != ElementState::Pressed {
            return Ok(());
        }
        let Some(action) = key.and_then(action_for_key) else {
            return Ok(());
        };

        let update = self.view.apply(action);
        debug!("{:?} -> {}", key, update);
        writeln!(self.console, "{}", update)
    }

    pub fn end_batch(&mut self) -> io::Result<()> {
        self.console.flush()
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[cfg(test)]
    fn console(&self) -> &W {
        &self.console
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn press(session: &mut Session<Vec<u8>>, key: VirtualKeyCode) {
        session
            .keyboard_input(ElementState::Pressed, Some(key))
            .unwrap();
    }

    fn console_text(session: &Session<Vec<u8>>) -> &str {
        std::str::from_utf8(session.console()).unwrap()
    }

    #[test]
    fn zoom_in_twice_quadruples() {
        let mut session = Session::new(Vec::new());
        press(&mut session, VirtualKeyCode::I);
        assert_eq!(session.view().zoom, 2.0);
        press(&mut session, VirtualKeyCode::I);
        assert_eq!(session.view().zoom, 4.0);

        assert_eq!(console_text(&session), "zoom: 2.000000\nzoom: 4.000000\n");
    }

    #[test]
    fn left_then_right_returns_home() {
        let mut session = Session::new(Vec::new());
        let start = session.view().x_mov;
        press(&mut session, VirtualKeyCode::H);
        press(&mut session, VirtualKeyCode::L);

        assert!((session.view().x_mov - start).abs() < 1e-12);
        assert_eq!(console_text(&session), "x_mov: -0.101000\nx_mov: -0.100000\n");
    }

    #[test]
    fn coarse_and_fine_steps() {
        let mut session = Session::new(Vec::new());
        press(&mut session, VirtualKeyCode::S);
        press(&mut session, VirtualKeyCode::Up);
        press(&mut session, VirtualKeyCode::A);

        assert!((session.view().y_mov - 0.009).abs() < 1e-12);
        assert!((session.view().x_mov - -0.11).abs() < 1e-12);
    }

    #[test]
    fn releases_and_unbound_keys_change_nothing() {
        let mut session = Session::new(Vec::new());
        session
            .keyboard_input(ElementState::Released, Some(VirtualKeyCode::I))
            .unwrap();
        session
            .keyboard_input(ElementState::Pressed, Some(VirtualKeyCode::Escape))
            .unwrap();
        session.keyboard_input(ElementState::Pressed, None).unwrap();

        assert_eq!(*session.view(), ViewState::default());
        assert!(session.console().is_empty());
    }

    fn window() -> WindowId {
        unsafe { WindowId::dummy() }
    }

    fn batch(session: &mut Session<Vec<u8>>, events: Vec<Event<'static, ()>>) -> Vec<Step> {
        events
            .iter()
            .map(|event| session.on_event(event, window()))
            .collect()
    }

    fn close() -> Event<'static, ()> {
        Event::WindowEvent {
            window_id: window(),
            event: WindowEvent::CloseRequested,
        }
    }

    #[test]
    fn batch_without_quit_renders_and_keeps_going() {
        let mut session = Session::new(Vec::new());
        let steps = batch(
            &mut session,
            vec![
                Event::NewEvents(winit::event::StartCause::Poll),
                Event::MainEventsCleared,
                Event::RedrawRequested(window()),
                Event::RedrawEventsCleared,
            ],
        );

        assert_eq!(
            steps,
            [Step::Continue, Step::RequestRedraw, Step::Render, Step::Continue]
        );
    }

    #[test]
    fn close_still_renders_the_current_frame_before_exiting() {
        let mut session = Session::new(Vec::new());
        let steps = batch(
            &mut session,
            vec![
                close(),
                Event::MainEventsCleared,
                Event::RedrawRequested(window()),
                Event::RedrawEventsCleared,
            ],
        );

        assert_eq!(
            steps,
            [Step::Continue, Step::RequestRedraw, Step::Render, Step::Exit]
        );
    }

    #[test]
    fn input_after_close_in_the_same_batch_still_applies() {
        let mut session = Session::new(Vec::new());
        assert_eq!(session.on_event(&close(), window()), Step::Continue);
        press(&mut session, VirtualKeyCode::I);

        assert_eq!(session.on_event(&Event::MainEventsCleared, window()), Step::RequestRedraw);
        assert_eq!(session.view().zoom, 2.0);
        assert_eq!(session.on_event(&Event::RedrawEventsCleared, window()), Step::Exit);
    }

    #[test]
    fn quit_is_only_recorded() {
        let mut session = Session::new(Vec::new());
        assert!(!session.should_quit());

        session.request_quit();
        press(&mut session, VirtualKeyCode::O);

        assert!(session.should_quit());
        assert_eq!(session.view().zoom, 0.5);
        session.end_batch().unwrap();
    }
}
