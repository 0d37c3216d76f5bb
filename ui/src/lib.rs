//! Leptos binding for miniform
//!
//! Provides the `use_form_data` hook and `with_form_data` wrapper on top of
//! the framework-agnostic `miniform` crate, plus a small demo app.

use leptos::prelude::*;

pub mod components;
pub mod dom;
pub mod form;

pub use dom::{event_value, DomDocument, DomInput};
pub use form::{use_form_data, with_form_data, FieldData, FormData, FormProps};

use components::newsletter::{newsletter, NewsletterProps};
use components::signup::SignupForm;

#[component]
pub fn App() -> impl IntoView {
    let render_newsletter = newsletter();

    view! {
        <div class="min-h-screen bg-gray-100 flex flex-col items-center py-10 gap-6">
            <div class="bg-white rounded-lg shadow">
                <SignupForm min_age=18.0 />
            </div>
            <div class="bg-white rounded-lg shadow">
                {render_newsletter(NewsletterProps { heading: "Stay in touch" })}
            </div>
        </div>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(App);
}
