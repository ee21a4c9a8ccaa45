//! Outside-interaction detection and the document listeners that feed it.
//!
//! The picker spans up to three disjoint containers: its own wrapper and,
//! when mounted, the calendar and clock popups (which may be portalled
//! elsewhere in the document). An event is "outside" when none of the
//! mounted containers holds its target.

use log::debug;

/// A container that can tell whether an event target lies inside it.
/// The host supplies the implementation (DOM nodes, test paths, ...).
pub trait Region {
    type Target;

    fn contains(&self, target: &Self::Target) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Wrapper,
    Calendar,
    Clock,
}

/// The containers that are live right now.
#[derive(Debug, Clone)]
pub struct RegionSet<R> {
    wrapper: Option<R>,
    calendar: Option<R>,
    clock: Option<R>,
}

impl<R> Default for RegionSet<R> {
    fn default() -> Self {
        Self {
            wrapper: None,
            calendar: None,
            clock: None,
        }
    }
}

impl<R: Region> RegionSet<R> {
    pub fn new(wrapper: R) -> Self {
        Self {
            wrapper: Some(wrapper),
            ..Self::default()
        }
    }

    pub fn with(mut self, kind: RegionKind, region: R) -> Self {
        self.mount(kind, region);
        self
    }

    pub fn mount(&mut self, kind: RegionKind, region: R) {
        *self.slot(kind) = Some(region);
    }

    pub fn unmount(&mut self, kind: RegionKind) -> Option<R> {
        self.slot(kind).take()
    }

    pub fn is_mounted(&self, kind: RegionKind) -> bool {
        match kind {
            RegionKind::Wrapper => self.wrapper.is_some(),
            RegionKind::Calendar => self.calendar.is_some(),
            RegionKind::Clock => self.clock.is_some(),
        }
    }

    /// True iff there is a target, the wrapper is mounted, and no mounted
    /// region contains the target. Without a wrapper nothing counts as
    /// outside, since the picker itself is not in the document.
    pub fn is_outside(&self, target: Option<&R::Target>) -> bool {
        let (Some(target), Some(wrapper)) = (target, self.wrapper.as_ref()) else {
            return false;
        };
        let inside = |region: &Option<R>| region.as_ref().is_some_and(|r| r.contains(target));
        !wrapper.contains(target) && !inside(&self.calendar) && !inside(&self.clock)
    }

    fn slot(&mut self, kind: RegionKind) -> &mut Option<R> {
        match kind {
            RegionKind::Wrapper => &mut self.wrapper,
            RegionKind::Calendar => &mut self.calendar,
            RegionKind::Clock => &mut self.clock,
        }
    }
}

/// Prefer the first entry of the event's composed path (which sees through
/// shadow roots) and fall back to the plain target.
pub fn resolve_target<T>(composed_first: Option<T>, direct: Option<T>) -> Option<T> {
    composed_first.or(direct)
}

/// Key that dismisses both popups.
pub const CANCEL_KEY: &str = "Escape";

pub fn is_cancel_key(key: &str) -> bool {
    key == CANCEL_KEY
}

/// Document-level events the picker listens to while a popup is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenedEvent {
    MouseDown,
    FocusIn,
    TouchStart,
    KeyDown,
}

impl ListenedEvent {
    pub const ALL: [ListenedEvent; 4] = [
        ListenedEvent::MouseDown,
        ListenedEvent::FocusIn,
        ListenedEvent::TouchStart,
        ListenedEvent::KeyDown,
    ];

    pub fn dom_name(&self) -> &'static str {
        match self {
            ListenedEvent::MouseDown => "mousedown",
            ListenedEvent::FocusIn => "focusin",
            ListenedEvent::TouchStart => "touchstart",
            ListenedEvent::KeyDown => "keydown",
        }
    }

    pub fn from_dom_name(name: &str) -> Option<ListenedEvent> {
        ListenedEvent::ALL.into_iter().find(|event| event.dom_name() == name)
    }

    /// Pointer, focus and touch events go through the containment check;
    /// key events only look at the key.
    pub fn is_outside_action(&self) -> bool {
        *self != ListenedEvent::KeyDown
    }
}

/// Where listeners physically get attached. The DOM shell registers real
/// callbacks on `document`; tests count calls.
pub trait ListenerHost {
    fn add_listener(&mut self, event: ListenedEvent);
    fn remove_listener(&mut self, event: ListenedEvent);
}

/// Scoped registration of all [`ListenedEvent`]s on a host.
///
/// `sync` attaches while any popup is open and detaches once both close.
/// Both directions are idempotent, and dropping the guard detaches.
pub struct DocumentListeners<H: ListenerHost> {
    host: H,
    active: bool,
}

impl<H: ListenerHost> DocumentListeners<H> {
    pub fn new(host: H) -> Self {
        Self { host, active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn sync(&mut self, should_listen: bool) {
        if should_listen {
            self.acquire();
        } else {
            self.release();
        }
    }

    pub fn acquire(&mut self) {
        if self.active {
            return;
        }
        for event in ListenedEvent::ALL {
            self.host.add_listener(event);
        }
        self.active = true;
        debug!("document listeners attached");
    }

    pub fn release(&mut self) {
        if !self.active {
            return;
        }
        for event in ListenedEvent::ALL {
            self.host.remove_listener(event);
        }
        self.active = false;
        debug!("document listeners detached");
    }
}

impl<H: ListenerHost> Drop for DocumentListeners<H> {
    fn drop(&mut self) {
        self.release();
    }
}
