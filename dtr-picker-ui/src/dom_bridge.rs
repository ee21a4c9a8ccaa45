//! Typed wrappers around the DOM pieces the picker needs outside of RSX:
//! document-level listeners and element containment.
//!
//! Popups are located by element id (`{id}`, `{id}-calendar`, `{id}-clock`)
//! at event time, so a popup that is not mounted simply drops out of the
//! region set.

use dtr_core::regions::{resolve_target, ListenedEvent, ListenerHost, Region, RegionKind, RegionSet};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// A DOM element used as an outside-interaction region.
pub struct DomRegion(web_sys::Element);

impl Region for DomRegion {
    type Target = web_sys::Node;

    fn contains(&self, target: &web_sys::Node) -> bool {
        self.0.contains(Some(target))
    }
}

/// Element id of the wrapper or one of the popups.
pub fn region_id(picker_id: &str, kind: RegionKind) -> String {
    match kind {
        RegionKind::Wrapper => picker_id.to_string(),
        RegionKind::Calendar => format!("{}-calendar", picker_id),
        RegionKind::Clock => format!("{}-clock", picker_id),
    }
}

fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

/// The wrapper's element id, shared between renders and the document
/// listener so region lookups follow a renamed picker.
#[derive(Clone, Default)]
pub struct PickerId(Rc<RefCell<String>>);

impl PickerId {
    pub fn new(id: &str) -> Self {
        Self(Rc::new(RefCell::new(id.to_string())))
    }

    /// Returns whether the id changed.
    pub fn set(&self, id: &str) -> bool {
        let mut current = self.0.borrow_mut();
        if current.as_str() == id {
            return false;
        }
        *current = id.to_string();
        true
    }

    pub fn region_id(&self, kind: RegionKind) -> String {
        region_id(&self.0.borrow(), kind)
    }

    pub fn regions(&self) -> RegionSet<DomRegion> {
        dom_regions(&self.0.borrow())
    }
}

/// Collect whichever of the picker's regions are currently in the document.
pub fn dom_regions(picker_id: &str) -> RegionSet<DomRegion> {
    let mut regions = RegionSet::default();
    let Some(document) = document() else {
        return regions;
    };
    for kind in [RegionKind::Wrapper, RegionKind::Calendar, RegionKind::Clock] {
        if let Some(element) = document.get_element_by_id(&region_id(picker_id, kind)) {
            regions.mount(kind, DomRegion(element));
        }
    }
    regions
}

/// The node an event happened on. The first entry of the composed path
/// reaches into shadow roots where `target` stops at the host.
pub fn event_target(event: &web_sys::Event) -> Option<web_sys::Node> {
    let composed = event.composed_path().get(0).dyn_into::<web_sys::Node>().ok();
    let direct = event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok());
    resolve_target(composed, direct)
}

/// The `key` of a keyboard event, empty for anything else.
pub fn event_key(event: &web_sys::Event) -> String {
    event
        .dyn_ref::<web_sys::KeyboardEvent>()
        .map(|keyboard| keyboard.key())
        .unwrap_or_default()
}

/// Today's date in the browser's local time zone.
pub fn today() -> Option<chrono::NaiveDate> {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
}

/// Attaches one Rust callback to `document` for each listened event.
pub struct DomListenerHost {
    document: Option<web_sys::Document>,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl DomListenerHost {
    pub fn new(handler: impl FnMut(web_sys::Event) + 'static) -> Self {
        Self {
            document: document(),
            callback: Closure::<dyn FnMut(web_sys::Event)>::new(handler),
        }
    }
}

impl ListenerHost for DomListenerHost {
    fn add_listener(&mut self, event: ListenedEvent) {
        let Some(document) = &self.document else {
            return;
        };
        let result =
            document.add_event_listener_with_callback(event.dom_name(), self.callback.as_ref().unchecked_ref());
        if let Err(e) = result {
            warn!("Failed to add {} listener: {:?}", event.dom_name(), e);
        }
    }

    fn remove_listener(&mut self, event: ListenedEvent) {
        let Some(document) = &self.document else {
            return;
        };
        let result =
            document.remove_event_listener_with_callback(event.dom_name(), self.callback.as_ref().unchecked_ref());
        if let Err(e) = result {
            warn!("Failed to remove {} listener: {:?}", event.dom_name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_ids() {
        assert_eq!(region_id("trip", RegionKind::Wrapper), "trip");
        assert_eq!(region_id("trip", RegionKind::Calendar), "trip-calendar");
        assert_eq!(region_id("trip", RegionKind::Clock), "trip-clock");
    }

    #[test]
    fn test_renamed_picker_id_is_shared() {
        let id = PickerId::new("trip");
        let listener_copy = id.clone();
        assert!(!id.set("trip"));
        assert!(id.set("return-trip"));
        assert_eq!(listener_copy.region_id(RegionKind::Wrapper), "return-trip");
        assert_eq!(listener_copy.region_id(RegionKind::Calendar), "return-trip-calendar");
    }
}
