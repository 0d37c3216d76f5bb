use leptos::prelude::*;
use miniform::{create_form_scheme, FieldScheme, FieldValue, FormScheme};

use crate::form::{with_form_data, FormProps};

pub struct NewsletterProps {
    pub heading: &'static str,
}

/// Newsletter signup built with the `with_form_data` wrapper.
pub fn newsletter() -> impl Fn(NewsletterProps) -> AnyView {
    let scheme: FormScheme = create_form_scheme(
        FormScheme::new().field(
            "email",
            FieldScheme::new("")
                .rule("Enter your email", |v: &FieldValue| !v.is_truthy())
                .rule("That does not look like an email", |v: &FieldValue| {
                    v.as_str().map_or(true, |s| !s.contains('@'))
                }),
        ),
    );

    with_form_data(scheme, |FormProps { props, data }: FormProps<NewsletterProps>| {
        let email = data.field("email");
        view! {
            <div class="p-6 max-w-md">
                <h3 class="text-lg font-semibold mb-2">{props.heading}</h3>
                {email.map(|field| {
                    let value = field.value;
                    let error = field.error;
                    let on_change = field.on_change;
                    view! {
                        <input
                            type="email"
                            name="email"
                            class="w-full px-3 py-2 text-sm border border-gray-300 rounded-md"
                            prop:value=move || value.get().to_string()
                            on:input=move |ev| on_change.run(ev)
                        />
                        {move || error.get().map(|e| view! { <p class="text-xs text-red-600 mt-1">{e}</p> })}
                    }
                })}
            </div>
        }
    })
}
