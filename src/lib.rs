use log::debug;
use serde::Serialize;
use std::fmt;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod utils;

use config::{
    CHART_END_MIN, CHART_START_MIN, CHART_STEP_MIN, DISTANCE_TOLERANCE_KM, HALF_MARATHON_KM,
    KEY_MARKERS_KM, MARATHON_KM, MAX_HOURS, MAX_MINUTES, MAX_SECONDS, RACE_DAY_CHECKPOINTS_KM,
};
use utils::{clamp_int, js_number};

/// Finish time entered in the form, after sanitization.
///
/// Hours stay within 0..=99, minutes and seconds within 0..=59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeInput {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl TimeInput {
    /// Out-of-range components are clamped.
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours: hours.min(MAX_HOURS as u32),
            minutes: minutes.min(MAX_MINUTES as u32),
            seconds: seconds.min(MAX_SECONDS as u32),
        }
    }

    /// Coerce raw field values into range. Anything that is not a finite
    /// number becomes 0, fractions are floored.
    pub fn sanitize(hours: &str, minutes: &str, seconds: &str) -> Self {
        let clamp = |raw: &str, max: i64| clamp_int(js_number(raw), 0, max, 0) as u32;
        Self {
            hours: clamp(hours, MAX_HOURS),
            minutes: clamp(minutes, MAX_MINUTES),
            seconds: clamp(seconds, MAX_SECONDS),
        }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// A goal time split into form values.
///
/// Hours are not capped; the calculation that follows clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalTime {
    pub hours: u64,
    pub minutes: u32,
    pub seconds: u32,
}

impl GoalTime {
    pub fn from_seconds(total: f64) -> Self {
        Self {
            hours: (total / 3600.0).floor() as u64,
            minutes: ((total % 3600.0) / 60.0).floor() as u32,
            seconds: (total % 60.0).floor() as u32,
        }
    }
}

/// Validation failures shown to the user in place of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalcError {
    InvalidDistance,
    NonPositiveTime,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidDistance => {
                write!(f, "Distance is invalid. Please select a distance.")
            }
            CalcError::NonPositiveTime => write!(f, "Enter a finish time above 0."),
        }
    }
}

impl std::error::Error for CalcError {}

/// Round to the nearest second and format as `M:SS min/km`.
///
/// Rounding happens before the split so 299.6 reads "5:00", never "4:60".
pub fn seconds_to_pace(sec_per_km: f64) -> String {
    let total = sec_per_km.round() as u64;
    format!("{}:{:02} min/km", total / 60, total % 60)
}

/// Round to the nearest second and format as `H:MM:SS`.
pub fn seconds_to_hms(total_seconds: f64) -> String {
    let t = total_seconds.round() as u64;
    format!("{}:{:02}:{:02}", t / 3600, (t % 3600) / 60, t % 60)
}

#[inline]
fn near(km: f64, reference: f64) -> bool {
    (km - reference).abs() < DISTANCE_TOLERANCE_KM
}

/// Whether `distance_km` is the marathon distance (within 1 m).
pub fn is_marathon_distance(distance_km: f64) -> bool {
    near(distance_km, MARATHON_KM)
}

/// Display label for a checkpoint marker.
///
/// Numbers use Rust's `f64` formatting, which never switches to exponent
/// notation: a 1e21 km distance prints all its digits and 1e-7 prints as
/// "0.0000001", unlike a browser's `String(number)`.
pub fn label_for_km(km: f64) -> String {
    if near(km, HALF_MARATHON_KM) {
        "Half (21.1)".to_string()
    } else {
        format!("{} km", km)
    }
}

/// How a row is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowKind {
    Plain,
    /// Finish rows, shown in bold.
    Emphasized,
    /// A single muted cell spanning both columns; `value` is empty.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
    pub kind: RowKind,
}

impl Row {
    pub fn plain(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            kind: RowKind::Plain,
        }
    }

    pub fn emphasized(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            kind: RowKind::Emphasized,
        }
    }

    pub fn placeholder(message: impl Into<String>) -> Self {
        Self {
            label: message.into(),
            value: String::new(),
            kind: RowKind::Placeholder,
        }
    }
}

/// Two-column table, computed separately from its markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: [&'static str; 2],
    pub rows: Vec<Row>,
}

impl Table {
    fn new(first: &'static str, second: &'static str, rows: Vec<Row>) -> Self {
        Self {
            headers: [first, second],
            rows,
        }
    }
}

/// Everything shown after a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceReport {
    pub time: TimeInput,
    pub distance_km: f64,
    pub total_seconds: u32,
    pub seconds_per_km: f64,
    pub pace: String,
    pub finish_time: String,
    pub race_day: Table,
    pub markers: Table,
    pub splits: Table,
}

impl PaceReport {
    /// Distance as typed into the summary and the generic finish labels.
    pub fn distance_label(&self) -> String {
        self.distance_km.to_string()
    }
}

/// Rows for every marker strictly before the finish.
fn checkpoint_rows(markers: &[f64], distance_km: f64, sec_per_km: f64) -> Vec<Row> {
    markers
        .iter()
        .filter(|&&km| km < distance_km)
        .map(|&km| Row::plain(label_for_km(km), seconds_to_hms(sec_per_km * km)))
        .collect()
}

fn race_day_table(distance_km: f64, sec_per_km: f64, finish_time: &str) -> Table {
    let mut rows = checkpoint_rows(&RACE_DAY_CHECKPOINTS_KM, distance_km, sec_per_km);
    if rows.is_empty() {
        rows.push(Row::placeholder("No checkpoints for this distance."));
    }
    let finish_label = if is_marathon_distance(distance_km) {
        "Finish (42.2)".to_string()
    } else {
        format!("Finish ({} km)", distance_km)
    };
    rows.push(Row::emphasized(finish_label, finish_time));
    Table::new("Checkpoint", "Cumulative time", rows)
}

fn markers_table(distance_km: f64, sec_per_km: f64) -> Table {
    let mut rows = checkpoint_rows(&KEY_MARKERS_KM, distance_km, sec_per_km);
    if rows.is_empty() {
        rows.push(Row::placeholder("No markers for this distance."));
    }
    Table::new("Marker", "Time", rows)
}

/// One row per whole kilometre, so the row count grows with the distance.
/// There is no upper bound; absurd distances ("1e12") allocate accordingly.
fn splits_table(distance_km: f64, sec_per_km: f64, finish_time: &str) -> Table {
    let whole_km = distance_km.floor() as u64;
    let mut rows: Vec<Row> = (1..=whole_km)
        .map(|km| Row::plain(km.to_string(), seconds_to_hms(sec_per_km * km as f64)))
        .collect();

    let finish_label = if is_marathon_distance(distance_km) {
        "42.2 (Finish)".to_string()
    } else {
        format!("{} (Finish)", distance_km)
    };
    rows.push(Row::emphasized(finish_label, finish_time));
    Table::new("KM", "Cumulative time", rows)
}

/// Compute pace, checkpoints and splits for a finish time over a distance.
///
/// The distance is checked before the time, so a form with both problems
/// reports the distance.
pub fn pace_report(time: TimeInput, distance_km: f64) -> Result<PaceReport, CalcError> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(CalcError::InvalidDistance);
    }

    let total_seconds = time.total_seconds();
    if total_seconds == 0 {
        return Err(CalcError::NonPositiveTime);
    }

    let seconds_per_km = total_seconds as f64 / distance_km;
    let pace = seconds_to_pace(seconds_per_km);
    let finish_time = seconds_to_hms(total_seconds as f64);
    debug!(
        "{}s over {} km: {:.3}s/km ({})",
        total_seconds, distance_km, seconds_per_km, pace
    );

    Ok(PaceReport {
        time,
        distance_km,
        total_seconds,
        seconds_per_km,
        race_day: race_day_table(distance_km, seconds_per_km, &finish_time),
        markers: markers_table(distance_km, seconds_per_km),
        splits: splits_table(distance_km, seconds_per_km, &finish_time),
        pace,
        finish_time,
    })
}

/// Static marathon chart of common finish times and their average pace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceChart {
    pub table: Table,
}

pub fn build_reference_chart() -> ReferenceChart {
    let rows = (CHART_START_MIN..=CHART_END_MIN)
        .step_by(CHART_STEP_MIN as usize)
        .map(|min| {
            let pace = (min * 60) as f64 / MARATHON_KM;
            Row::plain(
                format!("{}:{:02}:00", min / 60, min % 60),
                seconds_to_pace(pace),
            )
        })
        .collect();
    ReferenceChart {
        table: Table::new("Finish time", "Avg pace (min/km)", rows),
    }
}

/// Result of [`pace_report_js`]: the report, or `{ "error": "<notice>" }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportOutcome {
    Report(PaceReport),
    Error { error: String },
}

/// Sanitize raw field values and compute the report, as the form does.
pub fn report_outcome(hours: &str, minutes: &str, seconds: &str, distance: &str) -> ReportOutcome {
    let time = TimeInput::sanitize(hours, minutes, seconds);
    match pace_report(time, js_number(distance)) {
        Ok(report) => ReportOutcome::Report(report),
        Err(e) => ReportOutcome::Error {
            error: e.to_string(),
        },
    }
}

/// Page-script entry point for computing a report without the form.
///
/// # Returns
/// The serialized `PaceReport`, or an object with an `error` message
#[wasm_bindgen(js_name = paceReport)]
pub fn pace_report_js(hours: &str, minutes: &str, seconds: &str, distance: &str) -> JsValue {
    serde_wasm_bindgen::to_value(&report_outcome(hours, minutes, seconds, distance))
        .unwrap_or(JsValue::NULL)
}

pub mod page;

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(table: &Table) -> Vec<&str> {
        table.rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_seconds_to_pace() {
        assert_eq!(seconds_to_pace(300.0), "5:00 min/km");
        assert_eq!(seconds_to_pace(298.613), "4:59 min/km");
        assert_eq!(seconds_to_pace(299.6), "5:00 min/km");
        assert_eq!(seconds_to_pace(59.5), "1:00 min/km");
        assert_eq!(seconds_to_pace(3725.0), "62:05 min/km");
    }

    #[test]
    fn test_seconds_to_hms() {
        assert_eq!(seconds_to_hms(12600.0), "3:30:00");
        assert_eq!(seconds_to_hms(0.4), "0:00:00");
        assert_eq!(seconds_to_hms(3599.5), "1:00:00");
        assert_eq!(seconds_to_hms(360_000.0), "100:00:00");
    }

    #[test]
    fn test_seconds_to_hms_stable_for_rounded_input() {
        for secs in [0.0, 59.0, 3661.0, 12600.0, 86399.0] {
            assert_eq!(seconds_to_hms(secs), seconds_to_hms(secs.round()));
        }
    }

    #[test]
    fn test_label_for_km() {
        assert_eq!(label_for_km(5.0), "5 km");
        assert_eq!(label_for_km(21.0975), "Half (21.1)");
        assert_eq!(label_for_km(21.0979), "Half (21.1)");
        assert_eq!(label_for_km(7.5), "7.5 km");
        assert_eq!(label_for_km(1e-7), "0.0000001 km");
        assert_eq!(label_for_km(1e21), "1000000000000000000000 km");
    }

    #[test]
    fn test_time_input_sanitize() {
        assert_eq!(TimeInput::sanitize("-5", "70", "abc"), TimeInput::new(0, 59, 0));
        assert_eq!(TimeInput::sanitize("3.9", "", " 12 "), TimeInput::new(3, 0, 12));
        assert_eq!(TimeInput::sanitize("150", "59.99", "1e1"), TimeInput::new(99, 59, 10));
    }

    #[test]
    fn test_time_input_new_clamps() {
        let time = TimeInput::new(150, 70, 99);
        assert_eq!(time, TimeInput::new(99, 59, 59));
        assert_eq!(time.total_seconds(), 99 * 3600 + 59 * 60 + 59);
        assert!(pace_report(TimeInput::new(u32::MAX, u32::MAX, u32::MAX), MARATHON_KM).is_ok());
    }

    #[test]
    fn test_goal_time_from_seconds() {
        let goal = GoalTime::from_seconds(13800.0);
        assert_eq!((goal.hours, goal.minutes, goal.seconds), (3, 50, 0));
        let goal = GoalTime::from_seconds(3661.7);
        assert_eq!((goal.hours, goal.minutes, goal.seconds), (1, 1, 1));
    }

    #[test]
    fn test_goal_time_extreme_value() {
        let goal = GoalTime::from_seconds(1e10);
        assert_eq!((goal.hours, goal.minutes, goal.seconds), (2_777_777, 46, 40));
    }

    #[test]
    fn test_report_outcome_tags_errors() {
        let json = serde_json::to_value(report_outcome("0", "0", "0", "42.195")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Enter a finish time above 0." }));

        let json = serde_json::to_value(report_outcome("3", "30", "0", "0")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "error": "Distance is invalid. Please select a distance." })
        );
    }

    #[test]
    fn test_report_outcome_report() {
        let outcome = report_outcome("3", "30", "0", "42.195");
        let ReportOutcome::Report(report) = &outcome else {
            panic!("expected a report, got {:?}", outcome);
        };
        assert_eq!(report.pace, "4:59 min/km");

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["pace"], "4:59 min/km");
        assert_eq!(json["finish_time"], "3:30:00");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_marathon_end_to_end() {
        let report = pace_report(TimeInput::new(3, 30, 0), MARATHON_KM).unwrap();
        assert_eq!(report.total_seconds, 12600);
        assert!((report.seconds_per_km - 12600.0 / MARATHON_KM).abs() < 1e-9);
        assert_eq!(report.pace, "4:59 min/km");
        assert_eq!(report.finish_time, "3:30:00");

        assert_eq!(
            labels(&report.race_day),
            ["5 km", "10 km", "Half (21.1)", "30 km", "40 km", "Finish (42.2)"]
        );
        let half = &report.race_day.rows[2];
        assert_eq!(half.value, "1:45:00");
        let finish = report.race_day.rows.last().unwrap();
        assert_eq!(finish.kind, RowKind::Emphasized);
        assert_eq!(finish.value, "3:30:00");

        assert_eq!(report.markers.rows.len(), 9);
        assert!(report.markers.rows.iter().all(|r| r.kind == RowKind::Plain));

        assert_eq!(report.splits.rows.len(), 43);
        assert_eq!(report.splits.rows[0], Row::plain("1", "0:04:59"));
        assert_eq!(
            report.splits.rows.last().unwrap(),
            &Row::emphasized("42.2 (Finish)", "3:30:00")
        );
    }

    #[test]
    fn test_ten_km_checkpoints() {
        let report = pace_report(TimeInput::new(0, 50, 0), 10.0).unwrap();
        assert_eq!(report.pace, "5:00 min/km");
        assert_eq!(
            report.race_day.rows,
            vec![
                Row::plain("5 km", "0:25:00"),
                Row::emphasized("Finish (10 km)", "0:50:00"),
            ]
        );
        assert_eq!(report.markers.rows, vec![Row::plain("5 km", "0:25:00")]);
        assert_eq!(report.splits.rows.len(), 11);
        assert_eq!(report.splits.rows[9], Row::plain("10", "0:50:00"));
        assert_eq!(
            report.splits.rows[10],
            Row::emphasized("10 (Finish)", "0:50:00")
        );
    }

    #[test]
    fn test_short_distance_uses_placeholders() {
        let report = pace_report(TimeInput::new(0, 2, 30), 0.5).unwrap();
        assert_eq!(report.pace, "5:00 min/km");
        assert_eq!(
            report.race_day.rows,
            vec![
                Row::placeholder("No checkpoints for this distance."),
                Row::emphasized("Finish (0.5 km)", "0:02:30"),
            ]
        );
        assert_eq!(
            report.markers.rows,
            vec![Row::placeholder("No markers for this distance.")]
        );
        assert_eq!(
            report.splits.rows,
            vec![Row::emphasized("0.5 (Finish)", "0:02:30")]
        );
    }

    #[test]
    fn test_half_marathon_distance() {
        let report = pace_report(TimeInput::new(1, 45, 0), HALF_MARATHON_KM).unwrap();
        assert_eq!(
            labels(&report.race_day),
            ["5 km", "10 km", "Finish (21.0975 km)"]
        );
        assert_eq!(
            labels(&report.markers),
            ["5 km", "10 km", "15 km", "20 km"]
        );
        assert_eq!(report.splits.rows.last().unwrap().label, "21.0975 (Finish)");
        assert_eq!(report.distance_label(), "21.0975");
    }

    #[test]
    fn test_splits_grow_with_distance() {
        let report = pace_report(TimeInput::new(99, 0, 0), 1000.0).unwrap();
        assert_eq!(report.splits.rows.len(), 1001);
        assert_eq!(report.splits.rows[999].label, "1000");
    }

    #[test]
    fn test_invalid_distance() {
        let time = TimeInput::new(3, 0, 0);
        assert_eq!(pace_report(time, 0.0), Err(CalcError::InvalidDistance));
        assert_eq!(pace_report(time, -10.0), Err(CalcError::InvalidDistance));
        assert_eq!(pace_report(time, f64::NAN), Err(CalcError::InvalidDistance));
        assert_eq!(
            pace_report(time, f64::INFINITY),
            Err(CalcError::InvalidDistance)
        );
        assert_eq!(
            pace_report(TimeInput::new(0, 0, 0), 0.0),
            Err(CalcError::InvalidDistance)
        );
    }

    #[test]
    fn test_zero_time() {
        assert_eq!(
            pace_report(TimeInput::new(0, 0, 0), MARATHON_KM),
            Err(CalcError::NonPositiveTime)
        );
        assert_eq!(
            CalcError::NonPositiveTime.to_string(),
            "Enter a finish time above 0."
        );
        assert_eq!(
            CalcError::InvalidDistance.to_string(),
            "Distance is invalid. Please select a distance."
        );
    }

    #[test]
    fn test_reference_chart() {
        let chart = build_reference_chart();
        let rows = &chart.table.rows;
        assert_eq!(chart.table.headers, ["Finish time", "Avg pace (min/km)"]);
        assert_eq!(rows.len(), 43);
        assert_eq!(rows[0], Row::plain("2:30:00", "3:33 min/km"));
        assert_eq!(rows[6], Row::plain("3:00:00", "4:16 min/km"));
        assert_eq!(rows[42], Row::plain("6:00:00", "8:32 min/km"));
    }
}
