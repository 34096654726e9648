use super::*;

#[component]
/// Text button with optional leading icon.
pub fn Button(
    #[prop(default = ButtonVariant::Standard)] variant: ButtonVariant,
    #[prop(default = ButtonSize::Md)] size: ButtonSize,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] role: Option<String>,
    #[prop(optional, into)] aria_label: MaybeSignal<String>,
    #[prop(optional, into)] aria_expanded: Option<MaybeSignal<bool>>,
    #[prop(optional)] aria_haspopup: Option<&'static str>,
    #[prop(optional, into)] title: MaybeSignal<String>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional)] leading_icon: Option<IconName>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=merge_layout_class("ui-button", layout_class)
            role=role
            aria-label=move || {
                let label = aria_label.get();
                (!label.is_empty()).then_some(label)
            }
            aria-expanded=move || aria_expanded.map(|expanded| expanded.get().to_string())
            aria-haspopup=aria_haspopup
            title=move || {
                let title = title.get();
                (!title.is_empty()).then_some(title)
            }
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="button"
            data-ui-slot=ui_slot
            data-ui-variant=variant.token()
            data-ui-size=size.token()
            data-ui-selected=move || bool_token(selected.get())
            data-ui-disabled=move || bool_token(disabled.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            {leading_icon.map(|icon| view! { <Icon icon size=IconSize::Sm /> })}
            <span data-ui-slot="label">{children()}</span>
        </button>
    }
}

#[component]
/// Square icon-only button. `aria_label` is required because the glyph is decorative.
pub fn IconButton(
    icon: IconName,
    #[prop(into)] aria_label: MaybeSignal<String>,
    #[prop(default = ButtonVariant::Quiet)] variant: ButtonVariant,
    #[prop(default = ButtonSize::Md)] size: ButtonSize,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] title: Option<MaybeSignal<String>>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] pressed: Option<MaybeSignal<bool>>,
    #[prop(optional, into)] aria_expanded: Option<MaybeSignal<bool>>,
    #[prop(optional)] aria_haspopup: Option<&'static str>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
) -> impl IntoView {
    let title = title.unwrap_or_else(|| aria_label.clone());
    let icon_size = match size {
        ButtonSize::Sm => IconSize::Xs,
        ButtonSize::Md => IconSize::Sm,
        ButtonSize::Lg => IconSize::Md,
    };

    view! {
        <button
            type="button"
            class=merge_layout_class("ui-icon-button", layout_class)
            aria-label=move || aria_label.get()
            title=move || title.get()
            aria-pressed=move || pressed.map(|pressed| pressed.get().to_string())
            aria-expanded=move || aria_expanded.map(|expanded| expanded.get().to_string())
            aria-haspopup=aria_haspopup
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="icon-button"
            data-ui-slot=ui_slot
            data-ui-variant=variant.token()
            data-ui-size=size.token()
            data-ui-disabled=move || bool_token(disabled.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            <Icon icon size=icon_size />
        </button>
    }
}

#[component]
/// Single-line text input.
pub fn TextField(
    #[prop(default = FieldVariant::Standard)] variant: FieldVariant,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] aria_invalid: MaybeSignal<bool>,
    #[prop(optional)] node_ref: NodeRef<html::Input>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional)] autofocus: bool,
    #[prop(optional, into)] value: MaybeSignal<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] on_input: Option<Callback<String>>,
    #[prop(optional)] on_keydown: Option<Callback<KeyboardEvent>>,
    #[prop(optional)] on_blur: Option<Callback<FocusEvent>>,
) -> impl IntoView {
    if autofocus {
        node_ref.on_load(|input| {
            let _ = input.focus();
        });
    }

    view! {
        <input
            class=merge_layout_class("ui-field", layout_class)
            placeholder=placeholder
            aria-label=aria_label
            aria-invalid=move || aria_invalid.get().to_string()
            node_ref=node_ref
            autocomplete="off"
            spellcheck="false"
            type=input_type.unwrap_or("text")
            prop:value=move || value.get()
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="text-field"
            data-ui-slot=ui_slot
            data-ui-variant=variant.token()
            data-ui-invalid=move || bool_token(aria_invalid.get())
            on:input=move |ev| {
                if let Some(on_input) = on_input.as_ref() {
                    on_input.call(event_target_value(&ev));
                }
            }
            on:keydown=move |ev| {
                if let Some(on_keydown) = on_keydown.as_ref() {
                    on_keydown.call(ev);
                }
            }
            on:blur=move |ev| {
                if let Some(on_blur) = on_blur.as_ref() {
                    on_blur.call(ev);
                }
            }
            on:click=|ev| ev.stop_propagation()
            on:dblclick=|ev| ev.stop_propagation()
        />
    }
}

#[component]
/// Native select built from `(value, label)` options.
pub fn SelectField(
    options: Vec<(String, String)>,
    #[prop(default = FieldVariant::Standard)] variant: FieldVariant,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional, into)] value: MaybeSignal<String>,
    #[prop(optional)] on_change: Option<Callback<String>>,
) -> impl IntoView {
    let options = options
        .into_iter()
        .map(|(option_value, label)| {
            let selected_value = option_value.clone();
            let value = value.clone();
            view! {
                <option value=option_value selected=move || value.get() == selected_value>
                    {label}
                </option>
            }
        })
        .collect_view();

    view! {
        <select
            class=merge_layout_class("ui-field", layout_class)
            aria-label=aria_label
            prop:value=move || value.get()
            data-ui-primitive="true"
            data-ui-kind="select"
            data-ui-slot=ui_slot
            data-ui-variant=variant.token()
            on:change=move |ev| {
                if let Some(on_change) = on_change.as_ref() {
                    on_change.call(event_target_value(&ev));
                }
            }
        >
            {options}
        </select>
    }
}

#[component]
/// Checkbox with tri-state support for header "select all" controls.
pub fn CheckboxField(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: MaybeSignal<String>,
    #[prop(optional, into)] checked: MaybeSignal<bool>,
    #[prop(optional, into)] indeterminate: MaybeSignal<bool>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] on_toggle: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <input
            class=merge_layout_class("ui-checkbox", layout_class)
            type="checkbox"
            aria-label=move || aria_label.get()
            prop:checked=move || checked.get()
            prop:indeterminate=move || indeterminate.get() && !checked.get()
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="checkbox"
            data-ui-selected=move || bool_token(checked.get())
            on:click=|ev| ev.stop_propagation()
            on:change=move |_| {
                if let Some(on_toggle) = on_toggle.as_ref() {
                    on_toggle.call(());
                }
            }
        />
    }
}

#[component]
/// Linear progress bar driven by a pre-clamped percentage.
pub fn ProgressBar(
    percent: f64,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView {
    let percent = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };

    view! {
        <div
            class=merge_layout_class("ui-progress", layout_class)
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow=format!("{percent:.0}")
            data-ui-primitive="true"
            data-ui-kind="progress"
            data-ui-slot=ui_slot
            data-ui-value=format!("{percent:.2}")
        >
            <span data-ui-slot="track">
                <span data-ui-slot="fill" style=format!("width: {percent:.2}%")></span>
            </span>
            {label.map(|label| view! { <span data-ui-slot="label">{label}</span> })}
        </div>
    }
}
