use super::super::App;
use gloo_timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

/// Runs `action` on the first click, then ignores clicks for `cooldown_ms`.
pub fn click_once_per<F>(cooldown_ms: u32, action: F) -> Callback<MouseEvent>
where
    F: Fn() + 'static,
{
    let cooling = Rc::new(Cell::new(false));

    Callback::from(move |_: MouseEvent| {
        if cooling.replace(true) {
            return;
        }
        action();

        let cooling = Rc::clone(&cooling);
        Timeout::new(cooldown_ms, move || cooling.set(false)).forget();
    })
}

pub fn render_error_message(app: &App) -> Html {
    match &app.error {
        Some(error_msg) => html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        },
        None => html! {},
    }
}
