use crate::api::{ApiError, ErrorCode};
use leptos::*;

/// Validation bodies may carry a list of per-field messages next to the
/// summary.
fn detail_lines(error: &ApiError) -> Vec<String> {
    let Some(details) = error.details.as_ref() else {
        return Vec::new();
    };
    let Some(entries) = details
        .get("detail")
        .and_then(|v| v.as_array())
        .or_else(|| details.get("errors").and_then(|v| v.as_array()))
    else {
        return Vec::new();
    };
    if entries.len() < 2 {
        return Vec::new();
    }
    entries
        .iter()
        .filter_map(|entry| {
            entry
                .as_str()
                .or_else(|| entry.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
        })
        .collect()
}

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(|e| e.is_some()) fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    let lines = detail_lines(&e);
                    if !lines.is_empty() {
                        view! {
                            <ul class="list-disc list-inside text-sm">
                                {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                            </ul>
                        }
                        .into_view()
                    } else if e.code == ErrorCode::Server {
                        let status = e.status.map(|s| s.to_string()).unwrap_or_default();
                        view! { <div class="text-xs opacity-75">{"Status: "}{status}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}
