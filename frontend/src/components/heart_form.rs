use super::super::{App, Msg};
use shared::HeartInput;
use shared::forms::{HEART_FIELDS, HeartField, Widget, clamp_to_widget};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

pub fn render_heart_form(input: &HeartInput, link: &Scope<App>) -> Html {
    html! {
        <>
            <div class="form-columns">
                { for (1..=3u8).map(|column| html! {
                    <div class="form-column">
                        { for HEART_FIELDS
                            .iter()
                            .filter(|field| field.column == column)
                            .map(|field| render_heart_field(input, field, link)) }
                    </div>
                }) }
            </div>
            <div class="full-width">
                { for HEART_FIELDS
                    .iter()
                    .filter(|field| field.column == 0)
                    .map(|field| render_heart_field(input, field, link)) }
            </div>
        </>
    }
}

fn format_number(value: f64, step: f64) -> String {
    if step < 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value.round() as i64)
    }
}

fn render_heart_field(input: &HeartInput, field: &HeartField, link: &Scope<App>) -> Html {
    let key = field.key;
    let label = field.label;
    let value = input.get(key).unwrap_or_default();

    match field.widget {
        Widget::Number { min, max, step } => {
            let widget = field.widget;
            // Out-of-range entries snap back into range like the widget would.
            let onchange = link.callback(move |e: Event| {
                let element: HtmlInputElement = e.target_unchecked_into();
                match clamp_to_widget(&widget, &element.value()) {
                    Some(clamped) => {
                        element.set_value(&format_number(clamped, step));
                        Msg::HeartField(key, clamped)
                    }
                    None => Msg::SetError(Some(format!("{} must be a number", label))),
                }
            });

            html! {
                <label class="field">
                    <span class="field-label">{ label }</span>
                    <input
                        type="number"
                        name={key}
                        min={min.to_string()}
                        max={max.to_string()}
                        step={step.to_string()}
                        value={format_number(value, step)}
                        {onchange}
                    />
                </label>
            }
        }
        Widget::Radio(options) => html! {
            <fieldset class="field radio-group">
                <legend class="field-label">{ label }</legend>
                { for options.iter().map(|&(option, text)| html! {
                    <label class="radio-option">
                        <input
                            type="radio"
                            name={key}
                            checked={value == option as f64}
                            onchange={link.callback(move |_| Msg::HeartField(key, option as f64))}
                        />
                        { format!(" {}", text) }
                    </label>
                }) }
            </fieldset>
        },
        Widget::Select(options) => {
            let onchange = link.callback(move |e: Event| {
                let element: HtmlSelectElement = e.target_unchecked_into();
                match element.value().parse::<f64>() {
                    Ok(selected) => Msg::HeartField(key, selected),
                    Err(_) => Msg::SetError(Some(format!("Invalid choice for {}", label))),
                }
            });

            html! {
                <label class="field">
                    <span class="field-label">{ label }</span>
                    <select name={key} {onchange}>
                        { for options.iter().map(|&option| html! {
                            <option value={option.to_string()} selected={value == option as f64}>
                                { option.to_string() }
                            </option>
                        }) }
                    </select>
                </label>
            }
        }
    }
}
