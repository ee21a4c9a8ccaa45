//! Open/close state of the calendar and clock popups.
//!
//! Each flag is tri-state: `None` means the popup was never mounted and no
//! external prop forces it, `Some(false)` closed, `Some(true)` open. At most
//! one flag is `Some(true)` at any time.

use log::debug;
use serde::{Deserialize, Serialize};

/// One of the two popups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Calendar,
    Clock,
}

/// A transition that actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WidgetEvent {
    CalendarOpened,
    CalendarClosed,
    ClockOpened,
    ClockClosed,
}

impl WidgetEvent {
    fn opened(widget: Widget) -> WidgetEvent {
        match widget {
            Widget::Calendar => WidgetEvent::CalendarOpened,
            Widget::Clock => WidgetEvent::ClockOpened,
        }
    }

    fn closed(widget: Widget) -> WidgetEvent {
        match widget {
            Widget::Calendar => WidgetEvent::CalendarClosed,
            Widget::Clock => WidgetEvent::ClockClosed,
        }
    }
}

/// Externally controlled open flags. `None` leaves the popup uncontrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenProps {
    #[serde(rename = "isCalendarOpen")]
    pub calendar: Option<bool>,
    #[serde(rename = "isClockOpen")]
    pub clock: Option<bool>,
}

/// The three reachable states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Closed,
    CalendarOpen,
    ClockOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityState {
    calendar: Option<bool>,
    clock: Option<bool>,
    /// Last prop values seen, kept apart from the internal flags.
    observed: OpenProps,
}

impl VisibilityState {
    pub fn new(props: OpenProps) -> Self {
        let mut state = Self {
            calendar: None,
            clock: None,
            observed: OpenProps::default(),
        };
        state.reconcile(props);
        state
    }

    pub fn calendar(&self) -> Option<bool> {
        self.calendar
    }

    /// Prop values from the last reconcile.
    pub fn observed(&self) -> OpenProps {
        self.observed
    }

    pub fn clock(&self) -> Option<bool> {
        self.clock
    }

    pub fn is_open(&self, widget: Widget) -> bool {
        self.flag(widget) == Some(true)
    }

    pub fn any_open(&self) -> bool {
        self.is_open(Widget::Calendar) || self.is_open(Widget::Clock)
    }

    pub fn visibility(&self) -> Visibility {
        if self.is_open(Widget::Calendar) {
            Visibility::CalendarOpen
        } else if self.is_open(Widget::Clock) {
            Visibility::ClockOpen
        } else {
            Visibility::Closed
        }
    }

    /// Whether the popup has been mounted at all (open or closed).
    pub fn is_mounted(&self, widget: Widget) -> bool {
        self.flag(widget).is_some()
    }

    /// Open `widget`, closing the other one first. No-op when already open.
    pub fn open(&mut self, widget: Widget) -> Vec<WidgetEvent> {
        if self.is_open(widget) {
            return Vec::new();
        }
        let mut events = self.close(other(widget));
        *self.flag_mut(widget) = Some(true);
        debug!("{:?} opened", widget);
        events.push(WidgetEvent::opened(widget));
        events
    }

    /// Close `widget`. No-op unless it is open.
    pub fn close(&mut self, widget: Widget) -> Vec<WidgetEvent> {
        if !self.is_open(widget) {
            return Vec::new();
        }
        *self.flag_mut(widget) = Some(false);
        debug!("{:?} closed", widget);
        vec![WidgetEvent::closed(widget)]
    }

    pub fn open_calendar(&mut self) -> Vec<WidgetEvent> {
        self.open(Widget::Calendar)
    }

    pub fn open_clock(&mut self) -> Vec<WidgetEvent> {
        self.open(Widget::Clock)
    }

    pub fn toggle_calendar(&mut self) -> Vec<WidgetEvent> {
        if self.is_open(Widget::Calendar) {
            self.close(Widget::Calendar)
        } else {
            self.open(Widget::Calendar)
        }
    }

    pub fn close_widgets(&mut self) -> Vec<WidgetEvent> {
        let mut events = self.close(Widget::Calendar);
        events.extend(self.close(Widget::Clock));
        events
    }

    /// Snap internal flags to any prop that changed since the last call.
    /// Props that did not change leave internal transitions alone. When both
    /// props turn `true` in one update the calendar wins.
    ///
    /// Returns whether anything was overwritten.
    pub fn reconcile(&mut self, props: OpenProps) -> bool {
        let calendar_changed = props.calendar != self.observed.calendar;
        let clock_changed = props.clock != self.observed.clock;
        self.observed = props;

        if calendar_changed {
            debug!("isCalendarOpen prop changed to {:?}", props.calendar);
            self.calendar = props.calendar;
            if self.calendar == Some(true) && self.clock == Some(true) {
                self.clock = Some(false);
            }
        }
        if clock_changed {
            debug!("isClockOpen prop changed to {:?}", props.clock);
            self.clock = props.clock;
            if self.clock == Some(true) && self.calendar == Some(true) {
                if calendar_changed {
                    self.clock = Some(false);
                } else {
                    self.calendar = Some(false);
                }
            }
        }
        calendar_changed || clock_changed
    }

    fn flag(&self, widget: Widget) -> Option<bool> {
        match widget {
            Widget::Calendar => self.calendar,
            Widget::Clock => self.clock,
        }
    }

    fn flag_mut(&mut self, widget: Widget) -> &mut Option<bool> {
        match widget {
            Widget::Calendar => &mut self.calendar,
            Widget::Clock => &mut self.clock,
        }
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new(OpenProps::default())
    }
}

fn other(widget: Widget) -> Widget {
    match widget {
        Widget::Calendar => Widget::Clock,
        Widget::Clock => Widget::Calendar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use WidgetEvent::*;

    #[derive(Clone, Copy, Debug)]
    enum Op {
        OpenCalendar,
        OpenClock,
        Toggle,
        CloseAll,
        CalendarProp(Option<bool>),
        ClockProp(Option<bool>),
    }

    const OPS: [Op; 8] = [
        Op::OpenCalendar,
        Op::OpenClock,
        Op::Toggle,
        Op::CloseAll,
        Op::CalendarProp(Some(true)),
        Op::CalendarProp(None),
        Op::ClockProp(Some(true)),
        Op::ClockProp(Some(false)),
    ];

    fn run(state: &mut VisibilityState, props: &mut OpenProps, op: Op) {
        match op {
            Op::OpenCalendar => drop(state.open_calendar()),
            Op::OpenClock => drop(state.open_clock()),
            Op::Toggle => drop(state.toggle_calendar()),
            Op::CloseAll => drop(state.close_widgets()),
            Op::CalendarProp(flag) => {
                props.calendar = flag;
                state.reconcile(*props);
            }
            Op::ClockProp(flag) => {
                props.clock = flag;
                state.reconcile(*props);
            }
        }
    }

    #[test]
    fn never_both_open() {
        for a in OPS {
            for b in OPS {
                for c in OPS {
                    for d in OPS {
                        let mut state = VisibilityState::default();
                        let mut props = OpenProps::default();
                        for op in [a, b, c, d] {
                            run(&mut state, &mut props, op);
                            assert!(
                                !(state.is_open(Widget::Calendar) && state.is_open(Widget::Clock)),
                                "both open after {:?}",
                                [a, b, c, d]
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn open_is_idempotent() {
        let mut state = VisibilityState::default();
        assert_eq!(state.open_calendar(), vec![CalendarOpened]);
        assert!(state.open_calendar().is_empty());
        assert_eq!(state.visibility(), Visibility::CalendarOpen);
    }

    #[test]
    fn opening_one_closes_the_other() {
        let mut state = VisibilityState::default();
        state.open_clock();
        assert_eq!(state.open_calendar(), vec![ClockClosed, CalendarOpened]);
        assert_eq!(state.clock(), Some(false));
        assert_eq!(state.open_clock(), vec![CalendarClosed, ClockOpened]);
    }

    #[test]
    fn toggle_calendar_round_trip() {
        let mut state = VisibilityState::default();
        state.open_clock();
        assert_eq!(state.toggle_calendar(), vec![ClockClosed, CalendarOpened]);
        assert_eq!(state.toggle_calendar(), vec![CalendarClosed]);
        assert_eq!(state.visibility(), Visibility::Closed);
    }

    #[test]
    fn close_widgets_reports_only_what_was_open() {
        let mut state = VisibilityState::default();
        assert!(state.close_widgets().is_empty());
        assert!(!state.is_mounted(Widget::Calendar));

        state.open_clock();
        assert_eq!(state.close_widgets(), vec![ClockClosed]);
        assert!(state.close_widgets().is_empty());
    }

    #[test]
    fn prop_change_overwrites_internal_state() {
        let mut state = VisibilityState::new(OpenProps { calendar: Some(true), clock: None });
        assert!(state.is_open(Widget::Calendar));

        // An internal close sticks while the prop stays the same.
        state.close_widgets();
        assert!(!state.reconcile(OpenProps { calendar: Some(true), clock: None }));
        assert!(!state.is_open(Widget::Calendar));

        // A changed prop snaps, including back to uncontrolled.
        assert!(state.reconcile(OpenProps { calendar: Some(false), clock: None }));
        assert_eq!(state.calendar(), Some(false));
        assert!(state.reconcile(OpenProps { calendar: None, clock: None }));
        assert_eq!(state.calendar(), None);
    }

    #[test]
    fn clock_prop_closes_open_calendar() {
        let mut state = VisibilityState::default();
        state.open_calendar();
        state.reconcile(OpenProps { calendar: None, clock: Some(true) });
        assert_eq!(state.visibility(), Visibility::ClockOpen);
        assert_eq!(state.calendar(), Some(false));
    }

    #[test]
    fn calendar_wins_when_both_props_open() {
        let state = VisibilityState::new(OpenProps { calendar: Some(true), clock: Some(true) });
        assert_eq!(state.visibility(), Visibility::CalendarOpen);
        assert_eq!(state.clock(), Some(false));
    }
}
