use super::super::{App, Msg};
use shared::Disease;
use yew::html::Scope;
use yew::prelude::*;

/// Renders the page header and the horizontal flow selector
pub fn render_header(selected: Disease, link: &Scope<App>) -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-hospital"></i> {" Disease Prediction System"}</h1>
            <nav class="nav-menu">
                { for Disease::all().map(|disease| html! {
                    <button
                        class={classes!("nav-item", (disease == selected).then_some("active"))}
                        onclick={link.callback(move |_| Msg::SelectDisease(disease))}
                    >
                        <i class={disease.icon()}></i>{ format!(" {}", disease.menu_label()) }
                    </button>
                }) }
            </nav>
        </header>
    }
}
