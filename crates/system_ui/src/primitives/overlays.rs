use super::*;

#[component]
/// Floating menu surface anchored by its parent. Hidden while `open` is false.
pub fn MenuSurface(
    #[prop(into)] open: MaybeSignal<bool>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-surface", layout_class)
            role="menu"
            aria-label=aria_label
            hidden=move || !open.get()
            data-ui-primitive="true"
            data-ui-kind="menu-surface"
            data-ui-elevation=Elevation::Overlay.token()
            data-ui-open=move || bool_token(open.get())
            on:click=|ev| ev.stop_propagation()
            on:keydown=move |ev: KeyboardEvent| {
                if ev.key() == "Escape" {
                    if let Some(on_dismiss) = on_dismiss.as_ref() {
                        on_dismiss.call(());
                    }
                }
            }
        >
            {children()}
        </div>
    }
}

#[component]
/// Menu entry with an optional leading icon.
pub fn MenuItem(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(default = ButtonVariant::Quiet)] variant: ButtonVariant,
    #[prop(optional)] icon: Option<IconName>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] selected: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <Button
            layout_class=layout_class.unwrap_or("")
            role="menuitem"
            variant=variant
            size=ButtonSize::Sm
            disabled=disabled
            selected=selected
            ui_slot="menu-item"
            on_click=Callback::new(move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            })
        >
            {icon.map(|icon| view! { <Icon icon size=IconSize::Sm /> })}
            {children()}
        </Button>
    }
}

#[component]
/// Menu separator.
pub fn MenuSeparator(#[prop(optional)] layout_class: Option<&'static str>) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-menu-separator", layout_class)
            role="separator"
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="menu-separator"
        ></div>
    }
}
