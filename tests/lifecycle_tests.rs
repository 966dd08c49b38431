// Host-side tests for page lifecycle handling and listener ownership.

#![allow(dead_code)]
mod lifecycle {
    include!("../src/lifecycle.rs");
}

use lifecycle::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn bfcache_hide_keeps_the_view_mounted() {
    let hide = PageTransition::from_event("pagehide", true);
    assert_eq!(hide, Some(PageTransition::Hide { persisted: true }));
    assert_eq!(action_for(PageTransition::Hide { persisted: true }), LifecycleAction::Keep);
}

#[test]
fn discarding_hide_unmounts() {
    assert_eq!(
        action_for(PageTransition::Hide { persisted: false }),
        LifecycleAction::Unmount
    );
}

#[test]
fn restored_page_remeasures() {
    let show = PageTransition::from_event("pageshow", true).map(action_for);
    assert_eq!(show, Some(LifecycleAction::Remeasure));
    // first load fires pageshow too; the view already measured on mount
    let first = PageTransition::from_event("pageshow", false).map(action_for);
    assert_eq!(first, Some(LifecycleAction::Keep));
}

#[test]
fn unrelated_events_are_ignored() {
    assert_eq!(PageTransition::from_event("scroll", true), None);
    for event in PAGE_TRANSITION_EVENTS {
        assert!(PageTransition::from_event(event, false).is_some(), "{event}");
    }
}

#[derive(Clone, Default)]
struct Recorder {
    live: Rc<RefCell<Vec<String>>>,
    fail_on: Option<&'static str>,
}

impl ListenerTarget<u32> for Recorder {
    fn listen(&self, event: &str, _callback: &u32) -> Result<(), String> {
        if self.fail_on == Some(event) {
            return Err(format!("rejected {event}"));
        }
        self.live.borrow_mut().push(event.to_string());
        Ok(())
    }

    fn unlisten(&self, event: &str, _callback: &u32) {
        self.live.borrow_mut().retain(|e| e != event);
    }
}

const EVENTS: [&str; 2] = ["scroll", "resize"];

#[test]
fn listener_registers_every_event_and_unregisters_on_drop() {
    let target = Recorder::default();
    let live = target.live.clone();
    let listener = OwnedListener::attach(target, &EVENTS, 7).unwrap();
    assert_eq!(*listener.callback(), 7);
    assert_eq!(*live.borrow(), vec!["scroll", "resize"]);
    drop(listener);
    assert!(live.borrow().is_empty());
}

#[test]
fn failed_attach_leaves_nothing_registered() {
    let target = Recorder {
        fail_on: Some("resize"),
        ..Recorder::default()
    };
    let live = target.live.clone();
    let err = OwnedListener::attach(target, &EVENTS, 1).err();
    assert_eq!(err.as_deref(), Some("rejected resize"));
    assert!(live.borrow().is_empty());
}

#[test]
fn running_loop_keeps_its_callback() {
    let slot = LoopSlot::default();
    slot.install(3u32);
    assert!(slot.is_running());
    assert_eq!(slot.with_callback(|cb| *cb), Some(3));
    assert_eq!(slot.release(), None);
}

#[test]
fn stopped_loop_releases_its_callback_once() {
    let slot = LoopSlot::default();
    slot.install(3u32);
    slot.stop();
    assert_eq!(slot.with_callback(|cb| *cb), None);
    assert_eq!(slot.release(), Some(3));
    assert_eq!(slot.release(), None);
}

#[test]
fn final_tick_breaks_the_self_reference() {
    // the callback holds the slot, as the frame loop's tick does
    struct Tick {
        slot: Rc<LoopSlot<Tick>>,
    }
    let slot: Rc<LoopSlot<Tick>> = Rc::new(LoopSlot::default());
    slot.install(Tick { slot: slot.clone() });
    assert_eq!(Rc::strong_count(&slot), 2);

    slot.stop();
    let released = slot.release().map(|tick| tick.slot);
    assert!(released.is_some());
    drop(released);
    assert_eq!(Rc::strong_count(&slot), 1);
}
