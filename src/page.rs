//! Form controller for the calculator page.
//!
//! The page owns its inputs and output containers. `PaceCalculator` only
//! reaches them through [`PageFields`], so the browser binary can plug in the
//! real document while tests use an in-memory page.

use crate::config::{
    GoalPageConfig, CALCULATE_BUTTON_ID, CHART_ID, DEFAULT_DISTANCE, DEFAULT_HOURS,
    DEFAULT_MINUTES, DEFAULT_SECONDS, DISTANCE_ID, HOURS_ID, MINUTES_ID, RESET_BUTTON_ID,
    RESULTS_ID, SECONDS_ID,
};
use crate::utils::js_number;
use crate::{
    build_reference_chart, pace_report, CalcError, GoalTime, PaceReport, ReferenceChart, TimeInput,
};
use log::{debug, info};

/// Input fields read and written by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
    Distance,
}

impl Field {
    pub fn id(self) -> &'static str {
        match self {
            Field::Hours => HOURS_ID,
            Field::Minutes => MINUTES_ID,
            Field::Seconds => SECONDS_ID,
            Field::Distance => DISTANCE_ID,
        }
    }
}

/// Containers the calculator renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Output {
    Results,
    Chart,
}

impl Output {
    pub fn id(self) -> &'static str {
        match self {
            Output::Results => RESULTS_ID,
            Output::Chart => CHART_ID,
        }
    }
}

/// Buttons that trigger calculator actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Calculate,
    Reset,
}

impl Trigger {
    pub fn id(self) -> &'static str {
        match self {
            Trigger::Calculate => CALCULATE_BUTTON_ID,
            Trigger::Reset => RESET_BUTTON_ID,
        }
    }
}

/// What an output container shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Empty,
    Notice(CalcError),
    Report(PaceReport),
    Chart(ReferenceChart),
}

/// Access to the fields and containers owned by the page.
///
/// Implementations must treat a missing element as a no-op.
pub trait PageFields {
    /// Current value of `field`, or `None` if the page has no such field.
    fn value(&self, field: Field) -> Option<String>;
    fn set_value(&mut self, field: Field, value: &str);
    /// Hide the wrapper that contains `field`.
    fn hide(&mut self, field: Field);
    fn has_output(&self, output: Output) -> bool;
    fn render(&mut self, output: Output, content: Content);
}

/// Calculate, reset and goal page behaviour over a set of page fields.
pub struct PaceCalculator<F: PageFields> {
    fields: F,
    goal: Option<GoalPageConfig>,
}

impl<F: PageFields> PaceCalculator<F> {
    /// `goal` is `Some` on goal landing pages, even if its settings are unusable.
    pub fn new(fields: F, goal: Option<GoalPageConfig>) -> Self {
        Self { fields, goal }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn is_goal_page(&self) -> bool {
        self.goal.is_some()
    }

    /// Page load: draw the reference chart, then apply goal defaults.
    pub fn init(&mut self) {
        self.build_chart();
        self.apply_goal_defaults();
    }

    pub fn build_chart(&mut self) {
        if !self.fields.has_output(Output::Chart) {
            debug!("No chart container, skipping reference chart");
            return;
        }
        self.fields
            .render(Output::Chart, Content::Chart(build_reference_chart()));
    }

    /// Read the form, write back the sanitized time and render the results.
    pub fn calculate(&mut self) {
        let (Some(h), Some(m), Some(s), Some(dist)) = (
            self.fields.value(Field::Hours),
            self.fields.value(Field::Minutes),
            self.fields.value(Field::Seconds),
            self.fields.value(Field::Distance),
        ) else {
            debug!("Form fields missing, skipping calculation");
            return;
        };
        if !self.fields.has_output(Output::Results) {
            debug!("No results container, skipping calculation");
            return;
        }

        let time = TimeInput::sanitize(&h, &m, &s);
        self.write_time(time);

        let content = match pace_report(time, js_number(&dist)) {
            Ok(report) => Content::Report(report),
            Err(e) => {
                debug!("Calculation rejected: {}", e);
                Content::Notice(e)
            }
        };
        self.fields.render(Output::Results, content);
    }

    /// Goal pages go back to their goal; other pages to 4:00:00 over a marathon.
    pub fn reset(&mut self) {
        if self.is_goal_page() {
            self.apply_goal_defaults();
            return;
        }

        self.write_time(TimeInput::new(DEFAULT_HOURS, DEFAULT_MINUTES, DEFAULT_SECONDS));
        self.fields.set_value(Field::Distance, DEFAULT_DISTANCE);
        if self.fields.has_output(Output::Results) {
            self.fields.render(Output::Results, Content::Empty);
        }
    }

    /// Fill the form from the goal settings and calculate straight away.
    pub fn apply_goal_defaults(&mut self) {
        let Some(config) = self.goal else {
            return;
        };
        let Some(goal_seconds) = config.goal() else {
            debug!("Goal page without a usable goal time");
            return;
        };

        let goal = GoalTime::from_seconds(goal_seconds);
        info!(
            "Applying goal {}:{:02}:{:02}",
            goal.hours, goal.minutes, goal.seconds
        );
        self.fields.set_value(Field::Hours, &goal.hours.to_string());
        self.fields.set_value(Field::Minutes, &goal.minutes.to_string());
        self.fields.set_value(Field::Seconds, &goal.seconds.to_string());

        if let Some(distance) = config.locked_distance() {
            if self.fields.value(Field::Distance).is_some() {
                self.fields
                    .set_value(Field::Distance, &distance.to_string());
                self.fields.hide(Field::Distance);
            }
        }

        self.calculate();
    }

    fn write_time(&mut self, time: TimeInput) {
        self.fields.set_value(Field::Hours, &time.hours().to_string());
        self.fields.set_value(Field::Minutes, &time.minutes().to_string());
        self.fields.set_value(Field::Seconds, &time.seconds().to_string());
    }
}
