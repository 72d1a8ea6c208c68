use leptos::*;

use crate::state::store::AppStore;

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

/// Renders `view` with a fresh [`AppStore`] in context, after `prepare` has
/// had a chance to seed it.
pub fn render_with_store<P, F, N>(prepare: P, view: F) -> String
where
    P: FnOnce(AppStore),
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| {
        let store = AppStore::new();
        provide_context(store);
        prepare(store);
        view().into_view().render_to_string().to_string()
    });
    leptos_reactive::suppress_resource_load(false);
    html
}
