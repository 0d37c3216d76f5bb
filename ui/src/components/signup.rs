use leptos::prelude::*;
use miniform::driver::{signup_scheme, SignupProps, SIGNUP_COLORS, SIGNUP_SIZES};
use miniform::FieldValue;

use crate::form::{use_form_data, FieldData};

const INPUT_CLASS: &str =
    "w-full px-3 py-2 text-sm border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-green-500";

/// Demo signup form bound to the signup scheme.
#[component]
pub fn SignupForm(#[prop(default = 18.0)] min_age: f64) -> impl IntoView {
    let data = use_form_data(&signup_scheme(), &SignupProps { min_age });
    let is_valid = data.is_valid();
    let (submitted, set_submitted) = signal(Option::<String>::None);

    let on_submit = {
        let data = data.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let json = serde_json::to_string_pretty(&data.snapshot()).unwrap_or_default();
            log::info!("Submitted signup form");
            set_submitted.set(Some(json));
        }
    };

    view! {
        <form class="p-6 space-y-4 max-w-md" on:submit=on_submit>
            <h2 class="text-2xl font-bold">"Sign up"</h2>
            {data.field("name").map(|field| view! { <TextField label="Name" input_type="text" field=field /> })}
            {data.field("age").map(|field| view! { <TextField label="Age" input_type="number" field=field /> })}
            {data.field("colors").map(|field| view! {
                <CheckboxGroup label="Favourite colors" options=SIGNUP_COLORS.to_vec() field=field />
            })}
            {data.field("size").map(|field| view! {
                <RadioGroup label="Size" options=SIGNUP_SIZES.to_vec() field=field />
            })}
            {data.field("terms").map(|field| view! { <Toggle label="I accept the terms" field=field /> })}
            <button
                type="submit"
                class="bg-green-500 hover:bg-green-600 text-white px-4 py-2 rounded disabled:opacity-50"
                disabled=move || !is_valid.get()
            >
                "Create account"
            </button>
            {move || submitted.get().map(|json| view! {
                <pre class="text-xs bg-gray-100 p-3 rounded font-mono">{json}</pre>
            })}
        </form>
    }
}

#[component]
fn FieldError(field: FieldData) -> impl IntoView {
    let error = field.error;
    move || error.get().map(|e| view! { <p class="text-xs text-red-600 mt-1">{e}</p> })
}

#[component]
fn TextField(label: &'static str, input_type: &'static str, field: FieldData) -> impl IntoView {
    let name = field.name.clone();
    let value = field.value;
    let on_change = field.on_change;

    view! {
        <label class="block">
            <span class="block text-sm font-medium text-gray-700 mb-1">{label}</span>
            <input
                type=input_type
                name=name
                class=INPUT_CLASS
                prop:value=move || value.get().to_string()
                on:input=move |ev| on_change.run(ev)
            />
            <FieldError field=field />
        </label>
    }
}

#[component]
fn CheckboxGroup(label: &'static str, options: Vec<&'static str>, field: FieldData) -> impl IntoView {
    let name = field.name.clone();
    let value = field.value;
    let on_change = field.on_change;

    view! {
        <fieldset>
            <legend class="text-sm font-medium text-gray-700 mb-1">{label}</legend>
            <div class="flex flex-wrap gap-2">
                {options.into_iter().map(|option| {
                    let is_checked = move || value.with(|v| {
                        v.as_list().map_or(false, |items| items.iter().any(|item| item == option))
                    });
                    view! {
                        <label class="inline-flex items-center px-2 py-1 rounded border border-gray-300 cursor-pointer">
                            <input
                                type="checkbox"
                                class="mr-1.5"
                                name=name.clone()
                                value=option
                                prop:checked=is_checked
                                on:change=move |ev| on_change.run(ev)
                            />
                            <span class="text-sm">{option}</span>
                        </label>
                    }
                }).collect_view()}
            </div>
            <FieldError field=field />
        </fieldset>
    }
}

#[component]
fn RadioGroup(label: &'static str, options: Vec<&'static str>, field: FieldData) -> impl IntoView {
    let name = field.name.clone();
    let value = field.value;
    let on_change = field.on_change;

    view! {
        <fieldset>
            <legend class="text-sm font-medium text-gray-700 mb-1">{label}</legend>
            <div class="flex gap-3">
                {options.into_iter().map(|option| {
                    let is_checked = move || value.with(|v| v.as_str() == Some(option));
                    view! {
                        <label class="inline-flex items-center">
                            <input
                                type="radio"
                                class="mr-1"
                                name=name.clone()
                                value=option
                                prop:checked=is_checked
                                on:change=move |ev| on_change.run(ev)
                            />
                            <span class="text-sm">{option}</span>
                        </label>
                    }
                }).collect_view()}
            </div>
            <FieldError field=field />
        </fieldset>
    }
}

/// A lone checkbox. It has no `name`, so it reports a boolean.
#[component]
fn Toggle(label: &'static str, field: FieldData) -> impl IntoView {
    let value = field.value;
    let on_change = field.on_change;

    view! {
        <label class="block">
            <input
                type="checkbox"
                class="mr-2"
                prop:checked=move || value.with(FieldValue::is_truthy)
                on:change=move |ev| on_change.run(ev)
            />
            <span class="text-sm">{label}</span>
            <FieldError field=field />
        </label>
    }
}
