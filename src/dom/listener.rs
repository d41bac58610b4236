//! Owned DOM event listener.
//!
//! A `Listener` keeps its closure alive and detaches it on drop, so
//! dropping the page host removes every handler it installed.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::error::PageError;

/// Whether the handler may call `preventDefault`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passive {
    /// Browser default for the event type.
    Default,
    /// Promise not to cancel the event (lets scrolling start immediately).
    Yes,
    /// The handler needs to cancel the event.
    No,
}

pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attach `handler` for `kind` events on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Js`] if the browser rejects the registration.
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: Passive,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, PageError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let function = callback.as_ref().unchecked_ref();
        match passive {
            Passive::Default => target.add_event_listener_with_callback(kind, function)?,
            Passive::Yes | Passive::No => {
                let options = AddEventListenerOptions::new();
                options.set_passive(passive == Passive::Yes);
                target.add_event_listener_with_callback_and_add_event_listener_options(kind, function, &options)?;
            }
        }
        Ok(Self { target: target.clone(), kind, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::debug!("remove {} listener failed: {err:?}", self.kind);
        }
    }
}
