//! Leptos DragDrop Utilities
//!
//! Mouse-event drag gestures for the kanban board.
//! A card only starts dragging once the pointer moves past a small
//! threshold, so plain clicks still open the task.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub use planify_board::DropTarget;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Card under mousedown that has not moved far enough yet
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Mousedown position
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

/// Activation distance in pixels
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// How long clicks are swallowed after a drop
const CLICK_SUPPRESS_MS: u32 = 100;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_read, start_write) = signal((0i32, 0i32));
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
    }
}

pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    (now.0 - start.0).abs() > DRAG_THRESHOLD_PX || (now.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

/// Reset drag state and briefly swallow the click that follows mouseup
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    let clear = dnd.drag_just_ended_write;
    gloo_timers::callback::Timeout::new(CLICK_SUPPRESS_MS, move || {
        let _ = clear.try_set(false);
    })
    .forget();
}

/// Mousedown on a card: remember it as pending
pub fn make_on_mousedown(dnd: DndSignals, task_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Form controls inside a card keep their own mouse handling
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
            {
                return;
            }
        }
        dnd.pending_id_write.set(Some(task_id));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Pointer entered a card
pub fn make_on_task_mouseenter(dnd: DndSignals, task_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        match dnd.dragging_id_read.get_untracked() {
            // Don't target self
            Some(dragging) if dragging != task_id => {
                dnd.drop_target_write.set(Some(DropTarget::Task(task_id)));
            }
            _ => {}
        }
    }
}

/// Pointer left a card; it is still inside the owning column
pub fn make_on_task_mouseleave(dnd: DndSignals, column_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Column(column_id)));
        }
    }
}

pub fn make_on_column_mouseenter(dnd: DndSignals, column_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Column(column_id)));
        }
    }
}

pub fn make_on_column_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Document listeners of one board mount. Dropping this unregisters them.
struct GlobalListeners {
    doc: web_sys::Document,
    mousemove: Closure<dyn FnMut(web_sys::MouseEvent)>,
    mouseup: Closure<dyn FnMut(web_sys::MouseEvent)>,
    keydown: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

impl GlobalListeners {
    fn callbacks(&self) -> [(&'static str, &js_sys::Function); 3] {
        [
            ("mousemove", self.mousemove.as_ref().unchecked_ref()),
            ("mouseup", self.mouseup.as_ref().unchecked_ref()),
            ("keydown", self.keydown.as_ref().unchecked_ref()),
        ]
    }

    fn register(&self) {
        for (event, callback) in self.callbacks() {
            if self.doc.add_event_listener_with_callback(event, callback).is_err() {
                log::warn!("[DND] could not bind document {}", event);
            }
        }
    }
}

impl Drop for GlobalListeners {
    fn drop(&mut self) {
        for (event, callback) in self.callbacks() {
            let _ = self.doc.remove_event_listener_with_callback(event, callback);
        }
        log::debug!("[DND] document handlers released");
    }
}

/// Keep `value` alive until the current reactive owner is cleaned up.
fn hold_until_cleanup<T: 'static>(value: T) {
    let held = StoredValue::new_local(Some(value));
    on_cleanup(move || {
        let _ = held.try_update_value(|v| drop(v.take()));
    });
}

/// Bind document-level mousemove, mouseup and Escape handling.
///
/// * `on_start(id)` fires once the pointer passes the threshold.
/// * `on_drop(id, target)` fires on mouseup while dragging; `target` is
///   `None` when released outside every column.
/// * `on_cancel(id)` fires on Escape.
///
/// The listeners belong to the calling component and are removed when it
/// unmounts, which also cancels a gesture in progress.
pub fn bind_global_handlers<S, D, C>(dnd: DndSignals, on_start: S, on_drop: D, on_cancel: C)
where
    S: Fn(u32) + 'static,
    D: Fn(u32, Option<DropTarget>) + 'static,
    C: Fn(u32) + 'static,
{
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("[DND] no document, drag handlers not bound");
        return;
    };

    let mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let (Some(pending), Some(dragging)) = (dnd.pending_id_read.try_get_untracked(), dnd.dragging_id_read.try_get_untracked()) else {
            return;
        };
        if let (Some(id), None) = (pending, dragging) {
            if exceeds_threshold(dnd.start_read.get_untracked(), (ev.client_x(), ev.client_y())) {
                dnd.dragging_id_write.set(Some(id));
                on_start(id);
            }
        }
    });

    let mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let Some(dragging) = dnd.dragging_id_read.try_get_untracked() else {
            return;
        };
        match dragging {
            Some(id) => {
                let target = dnd.drop_target_read.get_untracked();
                end_drag(&dnd);
                on_drop(id, target);
            }
            // A plain click: the card's click handler runs on its own
            None => dnd.pending_id_write.set(None),
        }
    });

    let keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        if let Some(Some(id)) = dnd.dragging_id_read.try_get_untracked() {
            end_drag(&dnd);
            on_cancel(id);
        }
    });

    let listeners = GlobalListeners { doc, mousemove, mouseup, keydown };
    listeners.register();
    hold_until_cleanup(listeners);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (10, 10)));
        assert!(!exceeds_threshold((10, 10), (15, 5)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }

    struct DropFlag(Rc<Cell<bool>>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    #[test]
    fn test_held_value_released_on_cleanup() {
        let released = Rc::new(Cell::new(false));
        let owner = Owner::new();
        owner.with(|| hold_until_cleanup(DropFlag(released.clone())));
        assert!(!released.get());

        owner.cleanup();
        assert!(released.get());
    }
}
