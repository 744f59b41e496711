//! 2x2 confusion matrix grid.

use contract::ConfusionMatrix;
use leptos::prelude::*;

use crate::util::charts::confusion_cells;
use crate::util::format::{count, percent};

#[component]
pub fn ConfusionChart(#[prop(into)] matrix: Signal<Option<ConfusionMatrix>>) -> impl IntoView {
    let cells = move || {
        matrix
            .get()
            .map(|m| confusion_cells(&m).to_vec())
            .unwrap_or_default()
    };

    view! {
        <section class="panel confusion-chart">
            <h3 class="panel__title">"Confusion Matrix"</h3>
            <div class="confusion-chart__grid">
                {move || {
                    cells()
                        .into_iter()
                        .map(|cell| {
                            let class = if cell.correct {
                                "confusion-chart__cell confusion-chart__cell--correct"
                            } else {
                                "confusion-chart__cell confusion-chart__cell--wrong"
                            };
                            view! {
                                <div class=class>
                                    <span class="confusion-chart__count">{count(cell.count)}</span>
                                    <span class="confusion-chart__label">{cell.label}</span>
                                    <span class="confusion-chart__share">{percent(cell.share, 1)}</span>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        </section>
    }
}
