//! Single prediction outcome with class probabilities.

use contract::{Classification, PredictionResult};
use leptos::prelude::*;

use crate::util::format::percent;

fn verdict_class(prediction: Classification) -> &'static str {
    match prediction {
        Classification::Confirmed => "prediction-card prediction-card--confirmed",
        Classification::NotConfirmed => "prediction-card prediction-card--rejected",
    }
}

#[component]
pub fn PredictionCard(result: PredictionResult) -> impl IntoView {
    let confirmed_width = format!("width: {:.1}%", result.probability_confirmed * 100.0);
    let rejected_width = format!("width: {:.1}%", result.probability_not_confirmed * 100.0);

    view! {
        <section class=verdict_class(result.prediction)>
            <h3 class="prediction-card__verdict">{result.prediction.as_str()}</h3>
            <p class="prediction-card__confidence">"Confidence: " {percent(result.confidence, 2)}</p>
            <div class="prediction-card__probabilities">
                <div class="probability">
                    <span class="probability__label">"Confirmed"</span>
                    <span class="probability__track">
                        <span class="probability__bar probability__bar--confirmed" style=confirmed_width></span>
                    </span>
                    <span class="probability__value">{percent(result.probability_confirmed, 2)}</span>
                </div>
                <div class="probability">
                    <span class="probability__label">"Not Confirmed"</span>
                    <span class="probability__track">
                        <span class="probability__bar probability__bar--rejected" style=rejected_width></span>
                    </span>
                    <span class="probability__value">{percent(result.probability_not_confirmed, 2)}</span>
                </div>
            </div>
        </section>
    }
}
