use std::{any::Any, panic};

use anyhow::Context;
use winit::event_loop::EventLoop;

/// Connects to the display.
///
/// winit panics rather than returning an error when no backend comes up, so
/// the panic is caught and turned into one.
pub fn create_event_loop() -> anyhow::Result<EventLoop<()>> {
    quietly_catch_panic(EventLoop::new).context("Couldn't initialize display")
}

/// Runs `function`, reporting a panic as an error without printing it.
fn quietly_catch_panic<T>(function: impl FnOnce() -> T) -> anyhow::Result<T> {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(panic::AssertUnwindSafe(function));
    panic::set_hook(hook);

    result.map_err(|payload| anyhow::Error::msg(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_pass_through() {
        assert_eq!(quietly_catch_panic(|| 7).unwrap(), 7);
    }

    #[test]
    fn static_panic_message_becomes_the_error() {
        let error = quietly_catch_panic(|| -> u32 { panic!("Failed to initialize any backend!") })
            .unwrap_err();
        assert_eq!(error.to_string(), "Failed to initialize any backend!");
    }

    #[test]
    fn formatted_panic_message_becomes_the_error() {
        let error = quietly_catch_panic(|| -> u32 { panic!("backend {} missing", "x11") })
            .context("Couldn't initialize display")
            .unwrap_err();
        assert_eq!(
            format!("{:#}", error),
            "Couldn't initialize display: backend x11 missing"
        );
    }

    #[test]
    fn other_payloads_are_reported_generically() {
        let error = quietly_catch_panic(|| -> u32 { std::panic::panic_any(3_u8) }).unwrap_err();
        assert_eq!(error.to_string(), "unknown panic");
    }
}
