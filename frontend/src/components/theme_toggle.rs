use super::super::{App, Msg};
use gloo_storage::{LocalStorage, Storage};
use yew::html::Scope;
use yew::prelude::*;

const THEME_KEY: &str = "theme";
const DARK_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than a stored `"dark"` falls back to light.
    pub fn parse(stored: &str) -> Self {
        match stored {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn load() -> Self {
        LocalStorage::get::<String>(THEME_KEY)
            .map(|stored| Theme::parse(&stored))
            .unwrap_or_default()
    }

    pub fn persist(self) {
        if let Err(e) = LocalStorage::set(THEME_KEY, self.as_str()) {
            log::warn!("Failed to persist theme: {:?}", e);
        }
    }

    /// Syncs the `dark-mode` class on `<body>`, skipping the DOM write when it already matches.
    pub fn apply(self) {
        let Some(body) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
        else {
            log::warn!("No document body to apply theme to");
            return;
        };

        let class_list = body.class_list();
        let want_dark = self == Theme::Dark;
        if class_list.contains(DARK_CLASS) == want_dark {
            return;
        }
        let result = if want_dark {
            class_list.add_1(DARK_CLASS)
        } else {
            class_list.remove_1(DARK_CLASS)
        };
        if let Err(e) = result {
            log::warn!("Failed to apply theme: {:?}", e);
        }
    }

    // Icon and hint describe the theme the button switches to.
    fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "fa-solid fa-moon",
            Theme::Dark => "fa-solid fa-sun",
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Theme::Light => "Switch to dark mode",
            Theme::Dark => "Switch to light mode",
        }
    }
}

pub fn render_theme_toggle(theme: Theme, link: &Scope<App>) -> Html {
    html! {
        <button
            class="theme-toggle"
            aria-label={theme.hint()}
            title={theme.hint()}
            onclick={link.callback(|_| Msg::ToggleTheme)}
        >
            <i class={classes!(theme.icon_class(), "toggle-icon")}></i>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_stored_values_fall_back_to_light() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("solarized"), Theme::Light);
        assert_eq!(Theme::parse(""), Theme::Light);
    }

    #[test]
    fn toggling_twice_restores_the_theme() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Theme::Dark);
    }

    #[test]
    fn toggle_icon_shows_the_other_theme() {
        assert_eq!(Theme::Light.icon_class(), "fa-solid fa-moon");
        assert_eq!(Theme::Dark.icon_class(), "fa-solid fa-sun");
        assert!(Theme::Dark.hint().contains("light"));
    }
}
