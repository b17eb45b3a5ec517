//! Pagination Component

use leptos::prelude::*;

const PAGE_SIZES: &[usize] = &[10, 25, 50, 100];

/// The standard sizes plus the configured default, ascending
fn page_size_options(configured: usize) -> Vec<usize> {
    let mut sizes = PAGE_SIZES.to_vec();
    if !sizes.contains(&configured) {
        sizes.push(configured);
        sizes.sort_unstable();
    }
    sizes
}

/// Previous/next controls with a "page X of Y" label and a page size select
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] page_count: Signal<usize>,
    #[prop(into)] page_size: Signal<usize>,
    /// Configured default, always offered as a choice
    default_page_size: usize,
    /// Records matching the current search and filters
    #[prop(into)] matched: Signal<usize>,
    #[prop(into)] on_previous: Callback<()>,
    #[prop(into)] on_next: Callback<()>,
    #[prop(into)] on_page_size: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <span class="result-count">{move || format!("{} results", matched.get())}</span>
            <button
                type="button"
                disabled=move || page.get() <= 1
                on:click=move |_| on_previous.run(())
            >
                "‹ Prev"
            </button>
            <span class="page-label">{move || format!("Page {} of {}", page.get(), page_count.get())}</span>
            <button
                type="button"
                disabled=move || page.get() >= page_count.get()
                on:click=move |_| on_next.run(())
            >
                "Next ›"
            </button>
            <select on:change=move |ev| {
                if let Ok(size) = event_target_value(&ev).parse() {
                    on_page_size.run(size);
                }
            }>
                {page_size_options(default_page_size).into_iter().map(|size| {
                    view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {format!("{} / page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_size_is_offered() {
        assert_eq!(page_size_options(25), vec![10, 25, 50, 100]);
        assert_eq!(page_size_options(20), vec![10, 20, 25, 50, 100]);
        assert_eq!(page_size_options(500), vec![10, 25, 50, 100, 500]);
    }
}
