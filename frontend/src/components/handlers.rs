use super::super::{App, Msg};
use crate::api::request_prediction;
use shared::{Disease, PredictionRequest, PredictionResponse, TextForm};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub fn handle_select_disease(app: &mut App, disease: Disease) -> bool {
    if app.selected == disease {
        return false;
    }
    app.selected = disease;
    app.diagnosis = None;
    app.error = None;
    true
}

pub fn handle_text_field<F: TextForm>(form: &mut F, key: &str, value: String) -> bool {
    match form.field_mut(key) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => {
            log::warn!("Unknown form field: {}", key);
            false
        }
    }
}

pub fn handle_heart_field(app: &mut App, key: &str, value: f64) -> bool {
    if !app.heart.set(key, value) {
        log::warn!("Unknown heart field: {}", key);
        return false;
    }
    app.error = None;
    true
}

pub fn handle_submit(app: &mut App, ctx: &Context<App>) -> bool {
    if app.loading {
        return false;
    }

    let request: PredictionRequest = match app.selected {
        Disease::Diabetes => app.diabetes.clone().into(),
        Disease::Heart => app.heart.clone().into(),
        Disease::Parkinsons => app.parkinsons.clone().into(),
    };

    app.loading = true;
    app.error = None;
    app.diagnosis = None;

    let link = ctx.link().clone();
    spawn_local(async move {
        match request_prediction(&request).await {
            Ok(response) => link.send_message(Msg::PredictionReceived(response)),
            Err(e) => {
                gloo_console::error!(e.clone());
                link.send_message(Msg::SetError(Some(e)));
            }
        }
    });

    true
}

pub fn handle_prediction_received(app: &mut App, response: PredictionResponse) -> bool {
    app.loading = false;
    if response.disease != app.selected {
        log::info!("Discarding {} result after switching flows", response.disease);
        return true;
    }
    log::info!("Prediction {} received for {}", response.request_id, response.disease);
    app.diagnosis = Some(response);
    true
}

pub fn handle_toggle_theme(app: &mut App) -> bool {
    app.theme = app.theme.toggled();
    app.theme.apply();
    app.theme.persist();
    true
}
