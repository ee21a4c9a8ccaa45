//! Analog clock hand angles, in degrees clockwise from twelve.

use chrono::Timelike;
use dtr_core::Detail;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: Option<f64>,
    pub second: Option<f64>,
}

/// Angles for `time`; hands finer than `detail` are left out.
pub fn hand_angles<T: Timelike>(time: &T, detail: Detail) -> HandAngles {
    let hour = f64::from(time.hour() % 12) * 30.0 + f64::from(time.minute()) / 2.0;
    HandAngles {
        hour,
        minute: detail.renders_minute_hand().then(|| f64::from(time.minute()) * 6.0),
        second: detail.renders_second_hand().then(|| f64::from(time.second()) * 6.0),
    }
}
