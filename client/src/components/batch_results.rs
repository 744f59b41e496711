//! Preview table for batch predictions.

use contract::{Classification, PredictionResult};
use leptos::prelude::*;

use crate::util::format::percent;

#[component]
pub fn BatchResults(total: usize, rows: Vec<(usize, PredictionResult)>, overflow: usize) -> impl IntoView {
    let confirmed = rows
        .iter()
        .filter(|(_, r)| r.prediction == Classification::Confirmed)
        .count();
    let shown = rows.len();

    view! {
        <section class="panel batch-results">
            <h3 class="panel__title">"Batch Predictions (" {total} " rows)"</h3>
            <p class="batch-results__summary">{confirmed} " of the first " {shown} " predicted confirmed"</p>
            <table class="batch-results__table">
                <thead>
                    <tr>
                        <th>"Row"</th>
                        <th>"Prediction"</th>
                        <th>"Confidence"</th>
                        <th>"P(confirmed)"</th>
                    </tr>
                </thead>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|(index, row)| {
                            view! {
                                <tr>
                                    <td>{index}</td>
                                    <td>{row.prediction.as_str()}</td>
                                    <td>{percent(row.confidence, 1)}</td>
                                    <td>{percent(row.probability_confirmed, 1)}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
            {(overflow > 0).then(|| view! { <p class="batch-results__more">"... and " {overflow} " more"</p> })}
        </section>
    }
}
