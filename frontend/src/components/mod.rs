pub mod handlers;
pub mod header;
pub mod heart_form;
pub mod results;
pub mod text_form;
pub mod theme_toggle;
pub mod utils;
