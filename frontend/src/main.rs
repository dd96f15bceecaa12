mod api;
mod components;

use components::theme_toggle::{self, Theme};
use components::{handlers, header, heart_form, results, text_form, utils};
use shared::{DiabetesInput, Disease, HeartInput, ParkinsonsInput, PredictionResponse};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Navigation
    SelectDisease(Disease),

    // Form edits
    DiabetesField(&'static str, String),
    ParkinsonsField(&'static str, String),
    HeartField(&'static str, f64),

    // Prediction
    Submit,
    PredictionReceived(PredictionResponse),

    // UI states
    SetError(Option<String>),
    ToggleTheme,
}

// Main component
pub struct App {
    selected: Disease,
    diabetes: DiabetesInput,
    heart: HeartInput,
    parkinsons: ParkinsonsInput,
    diagnosis: Option<PredictionResponse>,
    loading: bool,
    error: Option<String>,
    theme: Theme,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let theme = Theme::load();
        theme.apply();

        Self {
            selected: Disease::Diabetes,
            diabetes: DiabetesInput::default(),
            heart: HeartInput::default(),
            parkinsons: ParkinsonsInput::default(),
            diagnosis: None,
            loading: false,
            error: None,
            theme,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectDisease(disease) => handlers::handle_select_disease(self, disease),

            Msg::DiabetesField(key, value) => handlers::handle_text_field(&mut self.diabetes, key, value),
            Msg::ParkinsonsField(key, value) => handlers::handle_text_field(&mut self.parkinsons, key, value),
            Msg::HeartField(key, value) => handlers::handle_heart_field(self, key, value),

            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::PredictionReceived(response) => handlers::handle_prediction_received(self, response),

            Msg::SetError(error) => {
                self.error = error;
                self.loading = false;
                true
            }
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <div class="container">
                { header::render_header(self.selected, link) }
                { theme_toggle::render_theme_toggle(self.theme, link) }

                <main class="main-content">
                    <h2 class="flow-title">{ self.selected.title() }</h2>
                    { self.render_form(ctx) }
                    { self.render_submit_button(ctx) }
                    { utils::render_error_message(self) }
                    { results::render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{"Disease Prediction System | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

impl App {
    fn render_form(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        match self.selected {
            Disease::Diabetes => text_form::render_text_form(&self.diabetes, link, Msg::DiabetesField),
            Disease::Heart => heart_form::render_heart_form(&self.heart, link),
            Disease::Parkinsons => text_form::render_text_form(&self.parkinsons, link, Msg::ParkinsonsField),
        }
    }

    fn render_submit_button(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link().clone();
        html! {
            <button
                class="submit-btn"
                disabled={self.loading}
                onclick={utils::click_once_per(500, move || link.send_message(Msg::Submit))}
            >
                {
                    if self.loading {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Predicting..."}</> }
                    } else {
                        html! { { self.selected.button_label() } }
                    }
                }
            </button>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<App>::new().render();
}
