// Page lifecycle bookkeeping for the mounted view: what a page transition
// means for it, listeners that unregister on drop, and the slot that lets a
// self-rescheduling frame callback be released. No web-sys types here so it
// can be tested on the host.

use std::cell::{Cell, RefCell};

pub const PAGE_TRANSITION_EVENTS: [&str; 2] = ["pagehide", "pageshow"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTransition {
    Hide { persisted: bool },
    Show { persisted: bool },
}

impl PageTransition {
    pub fn from_event(kind: &str, persisted: bool) -> Option<Self> {
        match kind {
            "pagehide" => Some(PageTransition::Hide { persisted }),
            "pageshow" => Some(PageTransition::Show { persisted }),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleAction {
    Keep,
    /// Measure scroll again; the position may have been restored while frozen.
    Remeasure,
    Unmount,
}

/// A page going into the back/forward cache is frozen, not gone: the view
/// stays mounted and picks up again when the page is shown.
pub fn action_for(transition: PageTransition) -> LifecycleAction {
    match transition {
        PageTransition::Hide { persisted: false } => LifecycleAction::Unmount,
        PageTransition::Hide { persisted: true } => LifecycleAction::Keep,
        PageTransition::Show { persisted: true } => LifecycleAction::Remeasure,
        PageTransition::Show { persisted: false } => LifecycleAction::Keep,
    }
}

/// Something callbacks of type `C` can be registered on.
pub trait ListenerTarget<C> {
    fn listen(&self, event: &str, callback: &C) -> Result<(), String>;
    fn unlisten(&self, event: &str, callback: &C);
}

/// A callback registered on `target` for a fixed set of events. Every event
/// is unregistered on drop, including after a partial `attach`.
pub struct OwnedListener<T: ListenerTarget<C>, C> {
    target: T,
    events: &'static [&'static str],
    callback: C,
}

impl<T: ListenerTarget<C>, C> OwnedListener<T, C> {
    pub fn attach(target: T, events: &'static [&'static str], callback: C) -> Result<Self, String> {
        let listener = Self {
            target,
            events,
            callback,
        };
        for event in events {
            listener.target.listen(event, &listener.callback)?;
        }
        Ok(listener)
    }

    #[inline]
    pub fn callback(&self) -> &C {
        &self.callback
    }
}

impl<T: ListenerTarget<C>, C> Drop for OwnedListener<T, C> {
    fn drop(&mut self) {
        for event in self.events {
            self.target.unlisten(event, &self.callback);
        }
    }
}

/// Holds the callback of a loop that reschedules itself.
///
/// The callback owns an `Rc` to this slot, so the pair is a cycle until the
/// slot is emptied. Once stopped, [`LoopSlot::release`] hands the callback
/// out exactly once so the final tick can free it after returning.
pub struct LoopSlot<C> {
    callback: RefCell<Option<C>>,
    running: Cell<bool>,
}

impl<C> Default for LoopSlot<C> {
    fn default() -> Self {
        Self {
            callback: RefCell::new(None),
            running: Cell::new(true),
        }
    }
}

impl<C> LoopSlot<C> {
    pub fn install(&self, callback: C) {
        *self.callback.borrow_mut() = Some(callback);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    /// Run `f` with the installed callback while the loop is running.
    pub fn with_callback<R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
        if !self.running.get() {
            return None;
        }
        self.callback.borrow().as_ref().map(f)
    }

    /// Take the callback out once the loop has stopped.
    pub fn release(&self) -> Option<C> {
        if self.running.get() {
            return None;
        }
        self.callback.borrow_mut().take()
    }
}
