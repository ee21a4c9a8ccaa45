//! Decides which popup a focused sub-field should open.

use crate::config::PickerConfig;
use crate::fields::FieldName;
use crate::visibility::Widget;

/// A focus landing on one of the input group's sub-fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFocus<'a> {
    /// The sub-field's `name` attribute
    pub name: &'a str,
    /// Set on `<select>`-style controls (a month drop-down, say) which
    /// handle their own choice and must not pop the calendar over it
    pub select_only: bool,
}

impl<'a> FieldFocus<'a> {
    pub fn input(name: &'a str) -> Self {
        Self { name, select_only: false }
    }

    pub fn select(name: &'a str) -> Self {
        Self { name, select_only: true }
    }
}

/// Map a focused sub-field to the popup it should open.
///
/// Date fields open the calendar and time fields open the clock; the am/pm
/// selector and unknown names open nothing. Routing is suppressed while the
/// picker is disabled, when opening on focus is turned off, for select-only
/// controls, and for a disabled popup.
pub fn route_focus(focus: FieldFocus<'_>, config: &PickerConfig) -> Option<Widget> {
    if config.disabled || !config.open_widgets_on_focus || focus.select_only {
        return None;
    }
    let widget = FieldName::parse(focus.name)?.widget()?;
    let widget_disabled = match widget {
        Widget::Calendar => config.disable_calendar,
        Widget::Clock => config.disable_clock,
    };
    if widget_disabled {
        None
    } else {
        Some(widget)
    }
}
