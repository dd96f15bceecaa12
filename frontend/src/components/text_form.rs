use super::super::{App, Msg};
use shared::TextForm;
use shared::forms::TextField;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

/// Renders a free-text form in three columns. Values are sent back unparsed.
pub fn render_text_form<F: TextForm>(
    form: &F,
    link: &Scope<App>,
    to_msg: fn(&'static str, String) -> Msg,
) -> Html {
    html! {
        <div class="form-columns">
            { for (1..=3u8).map(|column| html! {
                <div class="form-column">
                    { for F::fields()
                        .iter()
                        .filter(|field| field.column == column)
                        .map(|field| render_text_input(form, field, link, to_msg)) }
                </div>
            }) }
        </div>
    }
}

fn render_text_input<F: TextForm>(
    form: &F,
    field: &TextField,
    link: &Scope<App>,
    to_msg: fn(&'static str, String) -> Msg,
) -> Html {
    let key = field.key;
    let oninput = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        to_msg(key, input.value())
    });

    html! {
        <label class="field">
            <span class="field-label">{ field.label }</span>
            <input
                type="text"
                name={key}
                value={form.field(key).unwrap_or_default().to_string()}
                {oninput}
            />
        </label>
    }
}
