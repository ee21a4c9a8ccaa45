//! One-off date merge.

use dtr_core::value::merge_date_only;
use dtr_utils::dates::{format_instant, parse_instant};
use log::info;

/// Print `next`'s date combined with `previous`'s time of day.
pub fn run_merge(previous: Option<&str>, next: &str) -> anyhow::Result<()> {
    let merged = merge(previous, next)?;
    info!("Merged {:?} with {}", previous, next);
    println!("{}", merged);
    Ok(())
}

fn merge(previous: Option<&str>, next: &str) -> anyhow::Result<String> {
    let previous = previous.map(parse_instant).transpose()?;
    let next = parse_instant(next)?;
    Ok(format_instant(&merge_date_only(previous, next)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_time() {
        let merged = merge(Some("2018-07-17T21:40:11.458"), "2019-01-01").unwrap();
        assert_eq!(merged, "2019-01-01T21:40:11.458");
    }

    #[test]
    fn test_merge_keeps_microseconds() {
        let merged = merge(Some("2018-07-17T21:40:11.458123"), "2019-01-01").unwrap();
        assert_eq!(merged, "2019-01-01T21:40:11.458123");
    }

    #[test]
    fn test_merge_without_previous() {
        assert_eq!(merge(None, "2019-01-01T08:00").unwrap(), "2019-01-01T08:00:00");
        assert!(merge(Some("not a date"), "2019-01-01").is_err());
    }
}
