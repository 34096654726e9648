use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use ui_showcase::UiShowcaseApp;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Data Grid Showcase" />
        <Meta name="description" content="Design-system primitives and the interactive data grid." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=ShowcaseEntry />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn ShowcaseEntry() -> impl IntoView {
    view! { <UiShowcaseApp /> }
}

#[component]
fn NotFound() -> impl IntoView {
    let location = use_location();

    view! {
        <section class="canonical-content">
            <h1>"Not found"</h1>
            <p>{move || format!("No page at {}", location.pathname.get())}</p>
            <A href="/">"Back to the showcase"</A>
        </section>
    }
}
