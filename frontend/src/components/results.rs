use super::super::App;
use yew::prelude::*;

/// The one-line status message under the form. Stays as an empty box until a
/// diagnosis for the current flow arrives.
pub fn render_results(app: &App) -> Html {
    match &app.diagnosis {
        Some(response) if response.disease == app.selected => html! {
            <div
                class={classes!("status-message", if response.positive { "status-warning" } else { "status-success" })}
                role="status"
            >
                { &response.diagnosis }
            </div>
        },
        _ => html! { <div class="status-message" role="status"></div> },
    }
}
