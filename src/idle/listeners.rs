use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use super::{ActivityEvent, ActivitySink};

/// Window activity listeners forwarding to an `ActivitySink`. Removed on drop.
pub struct ActivityListeners {
    target: EventTarget,
    callback: Closure<dyn FnMut(Event)>,
}

impl ActivityListeners {
    /// `None` outside a browser window.
    pub fn attach(sink: Rc<dyn ActivitySink>) -> Option<Self> {
        let window = web_sys::window()?;
        let target: EventTarget = window.into();

        let callback = Closure::wrap(Box::new(move |_event: Event| {
            sink.notify_activity();
        }) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(true);

        for event in ActivityEvent::ALL {
            if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
                event.event_name(),
                callback.as_ref().unchecked_ref(),
                &options,
            ) {
                log::warn!("⚠️ Could not listen to {}: {:?}", event.event_name(), e);
            }
        }

        Some(Self { target, callback })
    }
}

impl Drop for ActivityListeners {
    fn drop(&mut self) {
        for event in ActivityEvent::ALL {
            if let Err(e) = self.target.remove_event_listener_with_callback(
                event.event_name(),
                self.callback.as_ref().unchecked_ref(),
            ) {
                log::warn!("⚠️ Could not remove {} listener: {:?}", event.event_name(), e);
            }
        }
    }
}
