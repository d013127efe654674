//! Pure Yew view components for the calculator output.
//!
//! These render the tables computed by the library; they hold no state.

use marathon_pace::page::Content;
use marathon_pace::{PaceReport, Row, RowKind, Table};
use std::rc::Rc;
use yew::prelude::*;

/// Props for a mounted output container.
#[derive(Properties, PartialEq)]
pub struct OutputViewProps {
    pub content: Rc<Content>,
}

#[function_component(OutputView)]
pub fn output_view(props: &OutputViewProps) -> Html {
    match props.content.as_ref() {
        Content::Empty => html! {},
        Content::Notice(err) => html! {
            <p class="muted">{ err.to_string() }</p>
        },
        Content::Report(report) => render_report(report),
        Content::Chart(chart) => render_table(&chart.table),
    }
}

/// Summary, race-day checkpoints, collapsible markers and per-km splits.
fn render_report(report: &PaceReport) -> Html {
    html! {
        <>
            <p><b>{ "Average pace:" }</b>{ " " }{ &report.pace }</p>
            <p class="muted">
                <b>{ "Finish time:" }</b>{ format!(" {} \u{a0}|\u{a0} ", report.finish_time) }
                <b>{ "Distance:" }</b>{ format!(" {} km", report.distance_label()) }
            </p>

            <h3>{ "Race-day checkpoints" }</h3>
            <p class="muted">
                { "The most useful splits for staying on target (5k/10k/half/30k/40k + finish)." }
            </p>
            { render_table(&report.race_day) }

            <details style="margin-top:10px;">
                <summary><b>{ "More key markers (15k/20k/25k/35k)" }</b></summary>
                <div style="margin-top:8px;">
                    { render_table(&report.markers) }
                </div>
            </details>

            <h3 style="margin-top:14px;">{ "Per-kilometre splits" }</h3>
            { render_table(&report.splits) }
        </>
    }
}

fn render_table(table: &Table) -> Html {
    html! {
        <table>
            <thead>
                <tr>
                    { table.headers.iter().map(|h| html!{ <th>{ *h }</th> }).collect::<Html>() }
                </tr>
            </thead>
            <tbody>
                { table.rows.iter().map(render_row).collect::<Html>() }
            </tbody>
        </table>
    }
}

fn render_row(row: &Row) -> Html {
    match row.kind {
        RowKind::Plain => html! {
            <tr><td>{ &row.label }</td><td>{ &row.value }</td></tr>
        },
        RowKind::Emphasized => html! {
            <tr><td><b>{ &row.label }</b></td><td><b>{ &row.value }</b></td></tr>
        },
        RowKind::Placeholder => html! {
            <tr><td colspan="2" class="muted">{ &row.label }</td></tr>
        },
    }
}
