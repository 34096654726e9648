use super::*;

#[component]
/// Horizontal toolbar. `emphasized` switches to the selection treatment used while rows are
/// selected.
pub fn ToolBar(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(default = LayoutGap::Sm)] gap: LayoutGap,
    #[prop(default = LayoutPadding::Sm)] padding: LayoutPadding,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] emphasized: MaybeSignal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-toolbar", layout_class)
            role="toolbar"
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="toolbar"
            data-ui-variant=move || if emphasized.get() { "selection" } else { "standard" }
            data-ui-gap=gap.token()
            data-ui-padding=padding.token()
        >
            {children()}
        </div>
    }
}
