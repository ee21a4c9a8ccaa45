//! `RangePicker`: the change dispatcher and popup controller.
//!
//! The picker never owns the range value. Each edit method takes the value
//! the host currently holds and returns the [`Notifications`] the host should
//! emit, in order: popup transitions first, then the new value.

use crate::config::PickerConfig;
use crate::fields::FieldName;
use crate::focus::{route_focus, FieldFocus};
use crate::regions::{is_cancel_key, Region, RegionSet};
use crate::value::{Instant, RangeValue, Side};
use crate::visibility::{OpenProps, VisibilityState, Widget, WidgetEvent};
use log::debug;
use serde::Serialize;

/// Root class of the picker's wrapper element.
pub const BASE_CLASS: &str = "datetimerange-picker";

/// Something the host should report to its listeners.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Notification {
    Change(RangeValue),
    CalendarOpen,
    CalendarClose,
    ClockOpen,
    ClockClose,
    InvalidChange,
}

impl From<WidgetEvent> for Notification {
    fn from(event: WidgetEvent) -> Self {
        match event {
            WidgetEvent::CalendarOpened => Notification::CalendarOpen,
            WidgetEvent::CalendarClosed => Notification::CalendarClose,
            WidgetEvent::ClockOpened => Notification::ClockOpen,
            WidgetEvent::ClockClosed => Notification::ClockClose,
        }
    }
}

/// Ordered notifications produced by one picker call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Notifications(Vec<Notification>);

impl Notifications {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.0.iter()
    }

    pub fn contains(&self, notification: &Notification) -> bool {
        self.0.contains(notification)
    }

    /// The value carried by the last `Change`, if any.
    pub fn changed_value(&self) -> Option<&RangeValue> {
        self.0.iter().rev().find_map(|n| match n {
            Notification::Change(value) => Some(value),
            _ => None,
        })
    }

    fn push(&mut self, notification: Notification) {
        self.0.push(notification);
    }

    fn extend_events(&mut self, events: Vec<WidgetEvent>) {
        self.0.extend(events.into_iter().map(Notification::from));
    }
}

impl IntoIterator for Notifications {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<WidgetEvent>> for Notifications {
    fn from(events: Vec<WidgetEvent>) -> Self {
        let mut notifications = Notifications::default();
        notifications.extend_events(events);
        notifications
    }
}

/// Why a popup is about to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OpenReason {
    ButtonClick,
    Focus,
}

/// Why the popups are about to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CloseReason {
    ButtonClick,
    Escape,
    OutsideAction,
    Select,
}

/// What the calendar reports: one day, or a from/to pair from a range
/// gesture. Either way only the date part is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    Single(Instant),
    Range(Option<Instant>, Option<Instant>),
}

impl DateSelection {
    fn pair(self) -> (Option<Instant>, Option<Instant>) {
        match self {
            DateSelection::Single(date) => (Some(date), None),
            DateSelection::Range(from, to) => (from, to),
        }
    }
}

type OpenGuard = Box<dyn Fn(OpenReason, Widget) -> bool>;
type CloseGuard = Box<dyn Fn(CloseReason, Widget) -> bool>;

pub struct RangePicker {
    config: PickerConfig,
    visibility: VisibilityState,
    active_side: Side,
    should_open: Option<OpenGuard>,
    should_close: Option<CloseGuard>,
}

impl RangePicker {
    pub fn new(config: PickerConfig, props: OpenProps) -> Self {
        Self {
            config,
            visibility: VisibilityState::new(props),
            active_side: Side::From,
            should_open: None,
            should_close: None,
        }
    }

    /// Veto individual openings; returning `false` keeps the popup shut.
    pub fn with_open_guard(mut self, guard: impl Fn(OpenReason, Widget) -> bool + 'static) -> Self {
        self.should_open = Some(Box::new(guard));
        self
    }

    /// Veto individual closings; returning `false` keeps the popup open.
    pub fn with_close_guard(mut self, guard: impl Fn(CloseReason, Widget) -> bool + 'static) -> Self {
        self.should_close = Some(Box::new(guard));
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn is_calendar_open(&self) -> bool {
        self.visibility.is_open(Widget::Calendar)
    }

    pub fn is_clock_open(&self) -> bool {
        self.visibility.is_open(Widget::Clock)
    }

    /// The side whose input group last received focus.
    pub fn active_side(&self) -> Side {
        self.active_side
    }

    /// Document listeners are only needed while a popup is open.
    pub fn listeners_wanted(&self) -> bool {
        self.visibility.any_open()
    }

    /// Feed the latest `isCalendarOpen`/`isClockOpen` props.
    pub fn update_props(&mut self, props: OpenProps) -> bool {
        self.visibility.reconcile(props)
    }

    /// Whether the host's current props differ from what the picker last saw.
    pub fn host_props_changed(&self, props: OpenProps, config: &PickerConfig) -> bool {
        self.visibility.observed() != props || &self.config != config
    }

    /// Take over the host's open flags and config. Returns whether anything
    /// changed; never produces notifications.
    pub fn apply_host_props(&mut self, props: OpenProps, config: PickerConfig) -> bool {
        let snapped = self.visibility.reconcile(props);
        let reconfigured = self.config != config;
        if reconfigured {
            self.config = config;
        }
        snapped || reconfigured
    }

    pub fn on_field_focus(&mut self, side: Side, focus: FieldFocus<'_>) -> Notifications {
        self.active_side = side;
        match route_focus(focus, &self.config) {
            Some(widget) => self.open(widget, OpenReason::Focus),
            None => Notifications::default(),
        }
    }

    /// The calendar button.
    pub fn toggle_calendar(&mut self) -> Notifications {
        if self.config.disabled || self.config.disable_calendar {
            return Notifications::default();
        }
        if self.is_calendar_open() {
            let mut notifications = Notifications::default();
            if self.allows_close(CloseReason::ButtonClick, Widget::Calendar) {
                notifications.extend_events(self.visibility.close(Widget::Calendar));
            }
            notifications
        } else {
            self.open(Widget::Calendar, OpenReason::ButtonClick)
        }
    }

    /// A complete instant typed into one side's sub-fields. Typing never
    /// closes the popups.
    pub fn on_side_change(&mut self, value: &RangeValue, side: Side, next: Option<Instant>) -> Notifications {
        let mut notifications = Notifications::default();
        notifications.push(Notification::Change(value.apply_range_edit(side, next)));
        notifications
    }

    /// A single sub-field edit. Emptying a field empties its side. Unknown
    /// fields, and sides that do not hold an instant yet, are ignored.
    /// Impossible or out-of-bounds results produce `InvalidChange` instead of
    /// a value.
    pub fn on_field_edit(&mut self, value: &RangeValue, side: Side, field: &str, raw: &str) -> Notifications {
        if FieldName::parse(field).is_some() && raw.trim().is_empty() {
            return self.on_side_change(value, side, None);
        }
        let (Some(field), Some(base)) = (FieldName::parse(field), value.side(side)) else {
            debug!("ignoring edit of {} on the {} side", field, side.as_str());
            return Notifications::default();
        };
        match field.apply(base, raw) {
            Some(next) if self.config.allows(&next) => self.on_side_change(value, side, Some(next)),
            _ => self.on_invalid_change(),
        }
    }

    /// A day or a range picked on the calendar.
    pub fn on_date_change(&mut self, value: &RangeValue, selection: DateSelection) -> Notifications {
        let next = value.apply_dual_edit(selection.pair());
        self.commit(next, CloseReason::Select)
    }

    /// The clear button.
    pub fn clear(&mut self, value: &RangeValue) -> Notifications {
        if self.config.disabled {
            return Notifications::default();
        }
        self.commit(value.clear(), CloseReason::Select)
    }

    pub fn on_invalid_change(&mut self) -> Notifications {
        let mut notifications = Notifications::default();
        notifications.push(Notification::InvalidChange);
        notifications
    }

    pub fn on_key_down(&mut self, key: &str) -> Notifications {
        if is_cancel_key(key) {
            self.close_widgets(CloseReason::Escape)
        } else {
            Notifications::default()
        }
    }

    /// A pointer, focus or touch event somewhere in the document.
    pub fn on_outside_action<R: Region>(&mut self, target: Option<&R::Target>, regions: &RegionSet<R>) -> Notifications {
        if regions.is_outside(target) {
            self.close_widgets(CloseReason::OutsideAction)
        } else {
            Notifications::default()
        }
    }

    /// The instant the clock face shows: the side that last had focus.
    pub fn clock_value(&self, value: &RangeValue) -> Option<Instant> {
        value.side(self.active_side)
    }

    /// Class list for the wrapper element.
    pub fn wrapper_class(&self) -> String {
        let open = if self.visibility.any_open() { "open" } else { "closed" };
        let enabled = if self.config.disabled { "disabled" } else { "enabled" };
        format!("{BASE_CLASS} {BASE_CLASS}--{open} {BASE_CLASS}--{enabled}")
    }

    fn commit(&mut self, next: RangeValue, reason: CloseReason) -> Notifications {
        let mut notifications = if self.config.close_widgets_on_select {
            self.close_widgets(reason)
        } else {
            Notifications::default()
        };
        debug!("value committed: {}", next);
        notifications.push(Notification::Change(next));
        notifications
    }

    fn open(&mut self, widget: Widget, reason: OpenReason) -> Notifications {
        let allowed = self.should_open.as_ref().map_or(true, |guard| guard(reason, widget));
        if !allowed {
            debug!("opening {:?} vetoed ({:?})", widget, reason);
            return Notifications::default();
        }
        self.visibility.open(widget).into()
    }

    fn close_widgets(&mut self, reason: CloseReason) -> Notifications {
        let mut notifications = Notifications::default();
        for widget in [Widget::Calendar, Widget::Clock] {
            if self.visibility.is_open(widget) && self.allows_close(reason, widget) {
                notifications.extend_events(self.visibility.close(widget));
            }
        }
        notifications
    }

    fn allows_close(&self, reason: CloseReason, widget: Widget) -> bool {
        self.should_close.as_ref().map_or(true, |guard| guard(reason, widget))
    }
}

impl Default for RangePicker {
    fn default() -> Self {
        Self::new(PickerConfig::default(), OpenProps::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::RegionKind;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> Instant {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    struct Node(&'static str);

    impl Region for Node {
        type Target = String;

        fn contains(&self, target: &String) -> bool {
            target == self.0 || target.starts_with(&format!("{}/", self.0))
        }
    }

    #[test]
    fn focusing_day_opens_calendar() {
        let mut picker = RangePicker::default();
        let notifications = picker.on_field_focus(Side::From, FieldFocus::input("day"));
        assert!(picker.is_calendar_open());
        assert!(!picker.is_clock_open());
        assert_eq!(notifications.into_iter().collect::<Vec<_>>(), vec![Notification::CalendarOpen]);
        assert!(picker.listeners_wanted());
    }

    #[test]
    fn focus_moves_from_calendar_to_clock() {
        let mut picker = RangePicker::default();
        picker.on_field_focus(Side::From, FieldFocus::input("month"));
        let notifications = picker.on_field_focus(Side::From, FieldFocus::input("minute"));
        assert!(picker.is_clock_open());
        assert!(!picker.is_calendar_open());
        assert_eq!(
            notifications.into_iter().collect::<Vec<_>>(),
            vec![Notification::CalendarClose, Notification::ClockOpen]
        );
        // Moving within the time fields keeps things as they are.
        assert!(picker.on_field_focus(Side::From, FieldFocus::input("second")).is_empty());
    }

    #[test]
    fn calendar_range_keeps_previous_time() {
        let mut picker = RangePicker::new(PickerConfig::default(), OpenProps { calendar: Some(true), clock: None });
        let value = RangeValue::Range(Some(at(2018, 7, 17, 21, 40, 11, 458)), Some(at(2019, 7, 17, 0, 0, 0, 0)));
        let notifications = picker.on_date_change(
            &value,
            DateSelection::Range(Some(at(2019, 1, 1, 0, 0, 0, 0)), Some(at(2019, 7, 17, 0, 0, 0, 0))),
        );
        assert_eq!(
            notifications.changed_value(),
            Some(&RangeValue::Range(Some(at(2019, 1, 1, 21, 40, 11, 458)), Some(at(2019, 7, 17, 0, 0, 0, 0))))
        );
        // Closes by default, close reported before the value.
        assert_eq!(
            notifications.iter().next(),
            Some(&Notification::CalendarClose)
        );
        assert!(!picker.is_calendar_open());
    }

    #[test]
    fn day_field_edit_on_single_value() {
        let mut picker = RangePicker::default();
        let value = RangeValue::Single(at(2019, 1, 31, 21, 40, 11, 0));
        let notifications = picker.on_field_edit(&value, Side::From, "day", "1");
        assert_eq!(
            notifications.into_iter().collect::<Vec<_>>(),
            vec![Notification::Change(RangeValue::Range(Some(at(2019, 1, 1, 21, 40, 11, 0)), None))]
        );
    }

    #[test]
    fn invalid_and_ignored_field_edits() {
        let mut picker = RangePicker::default();
        let value = RangeValue::Single(at(2023, 1, 31, 21, 40, 11, 0));
        let invalid = picker.on_field_edit(&value, Side::From, "day", "32");
        assert_eq!(invalid.into_iter().collect::<Vec<_>>(), vec![Notification::InvalidChange]);

        assert!(picker.on_field_edit(&value, Side::From, "weekday", "3").is_empty());
        assert!(picker.on_field_edit(&value, Side::To, "day", "3").is_empty());

        let bounded = PickerConfig {
            max_date: Some(at(2023, 12, 31, 0, 0, 0, 0)),
            ..PickerConfig::default()
        };
        let mut picker = RangePicker::new(bounded, OpenProps::default());
        let late = picker.on_field_edit(&value, Side::From, "year", "2024");
        assert!(late.contains(&Notification::InvalidChange));
    }

    #[test]
    fn emptied_field_empties_its_side() {
        let mut picker = RangePicker::default();
        let value = RangeValue::Range(Some(at(2019, 1, 31, 21, 40, 11, 0)), None);
        let notifications = picker.on_field_edit(&value, Side::From, "day", "");
        assert_eq!(
            notifications.into_iter().collect::<Vec<_>>(),
            vec![Notification::Change(RangeValue::Range(None, None))]
        );

        let value = RangeValue::Range(Some(at(2019, 1, 1, 8, 0, 0, 0)), Some(at(2019, 1, 7, 17, 0, 0, 0)));
        let notifications = picker.on_field_edit(&value, Side::To, "minute", "  ");
        assert_eq!(notifications.changed_value(), Some(&RangeValue::Range(Some(at(2019, 1, 1, 8, 0, 0, 0)), None)));
        assert!(picker.on_field_edit(&value, Side::To, "weekday", "").is_empty());
    }

    #[test]
    fn host_props_apply_once() {
        let mut picker = RangePicker::default();
        let props = OpenProps { calendar: Some(true), clock: None };
        let config = PickerConfig {
            disabled: true,
            ..PickerConfig::default()
        };
        assert!(picker.host_props_changed(props, &config));
        assert!(picker.apply_host_props(props, config.clone()));
        assert!(picker.is_calendar_open());
        assert!(picker.config().disabled);

        assert!(!picker.host_props_changed(props, &config));
        assert!(!picker.apply_host_props(props, config));
    }

    #[test]
    fn typing_does_not_close_popups() {
        let mut picker = RangePicker::new(PickerConfig::default(), OpenProps { calendar: Some(true), clock: None });
        let value = RangeValue::Single(at(2023, 1, 31, 21, 40, 11, 0));
        picker.on_field_edit(&value, Side::From, "day", "1");
        assert!(picker.is_calendar_open());
    }

    #[test]
    fn pointer_down_on_body_closes() {
        let mut picker = RangePicker::new(PickerConfig::default(), OpenProps::default());
        picker.toggle_calendar();
        let regions = RegionSet::new(Node("body/picker")).with(RegionKind::Calendar, Node("body/portal/calendar"));

        let inside = picker.on_outside_action(Some(&"body/portal/calendar/tile".to_string()), &regions);
        assert!(inside.is_empty());
        assert!(picker.is_calendar_open());

        let outside = picker.on_outside_action(Some(&"body".to_string()), &regions);
        assert_eq!(outside.into_iter().collect::<Vec<_>>(), vec![Notification::CalendarClose]);
        assert!(!picker.is_calendar_open());
        assert!(!picker.is_clock_open());
        assert!(!picker.listeners_wanted());
    }

    #[test]
    fn escape_closes_everything() {
        let mut picker = RangePicker::default();
        picker.on_field_focus(Side::To, FieldFocus::input("hour24"));
        assert!(picker.on_key_down("Enter").is_empty());
        assert_eq!(
            picker.on_key_down("Escape").into_iter().collect::<Vec<_>>(),
            vec![Notification::ClockClose]
        );
        assert!(picker.on_key_down("Escape").is_empty());
    }

    #[test]
    fn select_without_auto_close_keeps_calendar_open() {
        let config = PickerConfig {
            close_widgets_on_select: false,
            ..PickerConfig::default()
        };
        let mut picker = RangePicker::new(config, OpenProps { calendar: Some(true), clock: None });
        let notifications = picker.on_date_change(&RangeValue::Empty, DateSelection::Single(at(2020, 2, 2, 0, 0, 0, 0)));
        assert!(picker.is_calendar_open());
        assert_eq!(
            notifications.into_iter().collect::<Vec<_>>(),
            vec![Notification::Change(RangeValue::Range(Some(at(2020, 2, 2, 0, 0, 0, 0)), None))]
        );
    }

    #[test]
    fn clear_always_empties() {
        let instant = at(2019, 1, 1, 10, 0, 0, 0);
        for value in [RangeValue::Empty, RangeValue::Single(instant), RangeValue::Range(None, Some(instant))] {
            let mut picker = RangePicker::default();
            assert_eq!(picker.clear(&value).changed_value(), Some(&RangeValue::Empty));
        }
    }

    #[test]
    fn guards_can_veto() {
        let mut picker = RangePicker::default().with_open_guard(|reason, _| reason != OpenReason::Focus);
        assert!(picker.on_field_focus(Side::From, FieldFocus::input("day")).is_empty());
        assert!(!picker.is_calendar_open());
        picker.toggle_calendar();
        assert!(picker.is_calendar_open());

        let mut picker = RangePicker::default().with_close_guard(|reason, _| reason != CloseReason::Select);
        picker.toggle_calendar();
        let notifications = picker.on_date_change(&RangeValue::Empty, DateSelection::Single(at(2020, 2, 2, 0, 0, 0, 0)));
        assert!(picker.is_calendar_open());
        assert_eq!(notifications.len(), 1);
        picker.on_key_down("Escape");
        assert!(!picker.is_calendar_open());
    }

    #[test]
    fn disabled_picker_ignores_buttons_and_focus() {
        let config = PickerConfig {
            disabled: true,
            ..PickerConfig::default()
        };
        let mut picker = RangePicker::new(config, OpenProps::default());
        assert!(picker.toggle_calendar().is_empty());
        assert!(picker.on_field_focus(Side::From, FieldFocus::input("day")).is_empty());
        assert!(picker.clear(&RangeValue::Empty).is_empty());
        assert_eq!(picker.wrapper_class(), "datetimerange-picker datetimerange-picker--closed datetimerange-picker--disabled");
    }

    #[test]
    fn clock_follows_focused_side() {
        let mut picker = RangePicker::default();
        let value = RangeValue::Range(Some(at(2019, 1, 1, 9, 0, 0, 0)), Some(at(2019, 1, 1, 10, 30, 0, 0)));
        picker.on_field_focus(Side::To, FieldFocus::input("hour12"));
        assert_eq!(picker.clock_value(&value), Some(at(2019, 1, 1, 10, 30, 0, 0)));
        assert_eq!(picker.wrapper_class(), "datetimerange-picker datetimerange-picker--open datetimerange-picker--enabled");
    }

    #[test]
    fn props_snap_state() {
        let mut picker = RangePicker::default();
        assert!(picker.update_props(OpenProps { calendar: Some(true), clock: None }));
        assert!(picker.is_calendar_open());
        picker.on_key_down("Escape");
        assert!(!picker.update_props(OpenProps { calendar: Some(true), clock: None }));
        assert!(!picker.is_calendar_open());
    }
}
