//! Scripted replay of a picker session.
//!
//! A script is headerless CSV, one UI event per row:
//!
//! | row                              | meaning                                   |
//! |----------------------------------|-------------------------------------------|
//! | `focus,<side>,<field>`           | focus a sub-field of an input group       |
//! | `focus-select,<side>,<field>`    | focus a select-only control               |
//! | `field,<side>,<field>,<text>`    | type into one sub-field                   |
//! | `edit,<side>,<instant>`          | commit a whole instant (blank clears)     |
//! | `pick,<date>[,<date>]`           | calendar selection, one day or a range    |
//! | `toggle`                         | calendar button                           |
//! | `clear`                          | clear button                              |
//! | `key,<key>`                      | document keydown                          |
//! | `mousedown|focusin|touchstart,<path>` | document event on a node path        |
//! | `props,<calendar>,<clock>`       | new `isCalendarOpen`/`isClockOpen` props  |
//!
//! Node paths are slash separated from `body`. The picker lives at
//! `body/picker` and its popups are portalled to `body/portal/calendar` and
//! `body/portal/clock`. The value is controlled: every `Change` is fed back
//! as the value for the next row.

use dtr_core::focus::FieldFocus;
use dtr_core::regions::{DocumentListeners, ListenedEvent, ListenerHost, Region, RegionKind, RegionSet};
use dtr_core::{DateSelection, Notifications, OpenProps, PickerConfig, RangePicker, RangeValue, Side, Widget};
use dtr_utils::dates::parse_instant;
use log::{info, warn};
use serde::Serialize;

pub const WRAPPER_PATH: &str = "body/picker";
pub const CALENDAR_PATH: &str = "body/portal/calendar";
pub const CLOCK_PATH: &str = "body/portal/clock";

/// A node addressed by its path from the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRegion(pub String);

impl Region for PathRegion {
    type Target = String;

    fn contains(&self, target: &String) -> bool {
        target == &self.0 || target.starts_with(&format!("{}/", self.0))
    }
}

/// Records which document listeners are attached.
#[derive(Debug, Default)]
pub struct TraceHost {
    attached: Vec<ListenedEvent>,
}

impl ListenerHost for TraceHost {
    fn add_listener(&mut self, event: ListenedEvent) {
        self.attached.push(event);
    }

    fn remove_listener(&mut self, event: ListenedEvent) {
        self.attached.retain(|attached| *attached != event);
    }
}

/// One row of a script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub event: String,
    pub args: Vec<String>,
}

impl ScriptStep {
    fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Parse a script body into steps.
pub fn parse_script(script: &str) -> anyhow::Result<Vec<ScriptStep>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(script.as_bytes());

    let mut steps = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let event = record.get(0).unwrap_or("").to_string();
        if event.is_empty() {
            continue;
        }
        let args = record.iter().skip(1).map(str::to_string).collect();
        steps.push(ScriptStep { event, args });
    }
    Ok(steps)
}

/// What one step did, printed as a JSON line.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub step: usize,
    pub event: String,
    pub value: RangeValue,
    pub calendar_open: Option<bool>,
    pub clock_open: Option<bool>,
    pub listening: bool,
    pub notifications: Notifications,
}

/// A picker plus the value and document listeners its host would hold.
pub struct Session {
    picker: RangePicker,
    value: RangeValue,
    props: OpenProps,
    listeners: DocumentListeners<TraceHost>,
    steps: usize,
}

impl Session {
    pub fn new(config: PickerConfig, value: RangeValue) -> Self {
        Self {
            picker: RangePicker::new(config, OpenProps::default()),
            value,
            props: OpenProps::default(),
            listeners: DocumentListeners::new(TraceHost::default()),
            steps: 0,
        }
    }

    pub fn value(&self) -> &RangeValue {
        &self.value
    }

    pub fn picker(&self) -> &RangePicker {
        &self.picker
    }

    /// Apply one step. Unknown events and unparseable arguments are logged
    /// and skipped, the way the picker itself ignores unknown UI events.
    pub fn apply(&mut self, step: &ScriptStep) -> StepReport {
        self.steps += 1;
        let notifications = match self.dispatch(step) {
            Ok(notifications) => notifications,
            Err(e) => {
                warn!("Skipping step {} ({}): {}", self.steps, step.event, e);
                Notifications::default()
            }
        };
        if let Some(next) = notifications.changed_value() {
            self.value = *next;
        }
        self.listeners.sync(self.picker.listeners_wanted());

        let visibility = self.picker.visibility();
        StepReport {
            step: self.steps,
            event: step.event.clone(),
            value: self.value,
            calendar_open: visibility.calendar(),
            clock_open: visibility.clock(),
            listening: self.listeners.is_active(),
            notifications,
        }
    }

    fn dispatch(&mut self, step: &ScriptStep) -> anyhow::Result<Notifications> {
        let notifications = match step.event.as_str() {
            "focus" | "focus-select" => {
                let side: Side = step.arg(0).parse()?;
                let focus = if step.event == "focus" {
                    FieldFocus::input(step.arg(1))
                } else {
                    FieldFocus::select(step.arg(1))
                };
                self.picker.on_field_focus(side, focus)
            }
            "field" => {
                let side: Side = step.arg(0).parse()?;
                self.picker.on_field_edit(&self.value, side, step.arg(1), step.arg(2))
            }
            "edit" => {
                let side: Side = step.arg(0).parse()?;
                let next = optional_instant(step.arg(1))?;
                self.picker.on_side_change(&self.value, side, next)
            }
            "pick" => {
                let selection = if step.args.len() < 2 {
                    DateSelection::Single(parse_instant(step.arg(0))?)
                } else {
                    DateSelection::Range(optional_instant(step.arg(0))?, optional_instant(step.arg(1))?)
                };
                self.picker.on_date_change(&self.value, selection)
            }
            "toggle" => self.picker.toggle_calendar(),
            "clear" => self.picker.clear(&self.value),
            "key" => {
                if self.listeners.is_active() {
                    self.picker.on_key_down(step.arg(0))
                } else {
                    Notifications::default()
                }
            }
            "props" => {
                self.props = OpenProps {
                    calendar: optional_flag(step.arg(0))?,
                    clock: optional_flag(step.arg(1))?,
                };
                self.picker.update_props(self.props);
                Notifications::default()
            }
            other => match ListenedEvent::from_dom_name(other) {
                Some(event) if event.is_outside_action() => {
                    if !self.listeners.is_active() {
                        return Ok(Notifications::default());
                    }
                    let target = step.arg(0).to_string();
                    self.picker.on_outside_action(Some(&target), &self.regions())
                }
                _ => anyhow::bail!("unknown event '{}'", other),
            },
        };
        Ok(notifications)
    }

    fn regions(&self) -> RegionSet<PathRegion> {
        let visibility = self.picker.visibility();
        let mut regions = RegionSet::new(PathRegion(WRAPPER_PATH.to_string()));
        if visibility.is_mounted(Widget::Calendar) {
            regions.mount(RegionKind::Calendar, PathRegion(CALENDAR_PATH.to_string()));
        }
        if visibility.is_mounted(Widget::Clock) {
            regions.mount(RegionKind::Clock, PathRegion(CLOCK_PATH.to_string()));
        }
        regions
    }
}

fn optional_instant(s: &str) -> anyhow::Result<Option<dtr_core::Instant>> {
    if s.is_empty() {
        Ok(None)
    } else {
        Ok(Some(parse_instant(s)?))
    }
}

fn optional_flag(s: &str) -> anyhow::Result<Option<bool>> {
    match s {
        "" => Ok(None),
        "true" => Ok(Some(true)),
        "false" => Ok(Some(false)),
        other => anyhow::bail!("expected true, false or blank, got '{}'", other),
    }
}

/// Run a replay script file and print one JSON report per step.
pub fn run_replay(script_path: &str, config_path: Option<&str>, value: &str) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => PickerConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => PickerConfig::default(),
    };
    let value: RangeValue = value.parse()?;
    let steps = parse_script(&std::fs::read_to_string(script_path)?)?;

    info!("Replaying {} steps from {} starting at '{}'", steps.len(), script_path, value);

    let mut session = Session::new(config, value);
    for step in &steps {
        let report = session.apply(step);
        println!("{}", serde_json::to_string(&report)?);
    }

    info!("Replay complete. Final value: '{}'", session.value());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtr_core::Notification;

    fn replay(config: PickerConfig, value: &str, script: &str) -> (Session, Vec<StepReport>) {
        let mut session = Session::new(config, value.parse().unwrap());
        let reports = parse_script(script)
            .unwrap()
            .iter()
            .map(|step| session.apply(step))
            .collect();
        (session, reports)
    }

    #[test]
    fn test_parse_script_skips_comments_and_blanks() {
        let steps = parse_script("# open it\nfocus, from, day\n\ntoggle\n").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].event, "focus");
        assert_eq!(steps[0].args, vec!["from", "day"]);
        assert!(steps[1].args.is_empty());
    }

    #[test]
    fn test_focus_then_click_outside() {
        let script = "focus,from,day\nmousedown,body/picker/to/hour24\nmousedown,body/portal/calendar/tile\nmousedown,body\n";
        let (session, reports) = replay(PickerConfig::default(), "", script);

        assert_eq!(reports[0].calendar_open, Some(true));
        assert!(reports[0].listening);
        assert!(reports[1].notifications.is_empty());
        assert!(reports[2].notifications.is_empty());
        assert!(reports[3].notifications.contains(&Notification::CalendarClose));
        assert!(!reports[3].listening);
        assert!(!session.picker().listeners_wanted());
    }

    #[test]
    fn test_calendar_range_then_field_edit() {
        let script = "toggle\npick,2019-01-01,2019-07-17\nfield,from,day,15\n";
        let (session, reports) = replay(
            PickerConfig::default(),
            "2018-07-17T21:40:11.458,2019-07-17",
            script,
        );
        assert_eq!(reports[1].calendar_open, Some(false));
        assert_eq!(
            session.value().to_string(),
            "2019-01-15T21:40:11.458,2019-07-17T00:00:00"
        );
    }

    #[test]
    fn test_escape_only_counts_while_listening() {
        let (_, reports) = replay(PickerConfig::default(), "", "key,Escape\nfocus,to,minute\nkey,Escape\n");
        assert!(reports[0].notifications.is_empty());
        assert!(reports[2].notifications.contains(&Notification::ClockClose));
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let (session, reports) = replay(PickerConfig::default(), "", "wave,hello\nfocus,middle,day\nclear\n");
        assert!(reports[0].notifications.is_empty());
        assert!(reports[1].notifications.is_empty());
        assert_eq!(reports[2].value, RangeValue::Empty);
        assert_eq!(session.value(), &RangeValue::Empty);
    }

    #[test]
    fn test_props_drive_visibility() {
        let (_, reports) = replay(PickerConfig::default(), "", "props,true,\nprops,true,\nprops,,true\n");
        assert_eq!(reports[0].calendar_open, Some(true));
        assert_eq!(reports[2].calendar_open, None);
        assert_eq!(reports[2].clock_open, Some(true));
    }
}
