//! Management Page
//!
//! The list/search/CRUD screen shared by every entity. Each page module
//! only supplies columns, filters and how deletes are confirmed.
//!
//! Requests are issued from `begin_*` / `finish_*` pairs on the
//! `AdminPage` so no signal borrow is held across an await.

use leptos::prelude::*;
use leptos::task::spawn_local;
use roomdesk_core::form::SubmitRequest;
use roomdesk_core::{
    delete_each, AdminPage, ConfirmPrompt, Confirmer, FormMode, ListParams, PagePhase, RecordApi, SubmitOutcome,
};

use crate::components::{data_table, form_modal, ConfirmModal, ErrorBanner, FilterSelect, Pagination, RowActions, SearchBar};
use crate::context::use_app_context;
use crate::models::{Column, Entity, FilterSpec};
use crate::routes::Route;
use crate::store::{navigate, use_app_store};

/// How a delete is confirmed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmStyle {
    /// Blocking `window.confirm`
    Native,
    /// In-page `ConfirmModal`
    Modal,
}

/// `window.confirm`; a missing window counts as "no"
pub struct BrowserConfirm;

impl Confirmer for BrowserConfirm {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(&prompt.message).ok())
            .unwrap_or(false)
    }
}

pub struct PageConfig<T> {
    /// Singular lowercase name used in prompts ("room")
    pub noun: &'static str,
    pub title: &'static str,
    pub columns: Vec<Column<T>>,
    pub filters: &'static [FilterSpec],
    pub confirm: ConfirmStyle,
    /// Detail route for a row, if the entity has one
    pub detail: Option<fn(u32) -> Route>,
}

pub fn management_page<T: Entity>(config: PageConfig<T>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let page = RwSignal::new(AdminPage::<T>::new(config.noun, ctx.page_size()));
    let confirm_style = config.confirm;

    // ========================
    // Load
    // ========================

    let reload = move || {
        let ticket = match page.try_update(|p| p.begin_load()) {
            Some(Ok(begun)) => begun,
            Some(Err(e)) => {
                log::debug!("{} reload skipped: {}", T::RESOURCE, e);
                return;
            }
            None => return,
        };
        let api = ctx.records::<T>();
        spawn_local(async move {
            let result = api.list(&ListParams::default()).await;
            ctx.check(&result);
            if let Err(e) = &result {
                log::warn!("loading {} failed: {}", T::RESOURCE, e);
            }
            // the page may have been left while the request was in flight
            page.try_update(|p| p.finish_load(ticket, result));
        });
    };

    Effect::new(move |_| reload());

    // a search or filter change drops the fetch in flight; start another
    let refetch_if_superseded = move || {
        if page.with_untracked(|p| p.list().load_superseded()) {
            reload();
        }
    };
    on_cleanup(move || {
        page.try_update(|p| p.unmount());
    });

    // ========================
    // Create / edit
    // ========================

    let submit = move || {
        let request: SubmitRequest<u32> = match page.try_update(|p| p.begin_submit()) {
            Some(Ok(request)) => request,
            Some(Err(e)) => {
                log::debug!("{} submit blocked: {}", T::RESOURCE, e);
                return;
            }
            None => return,
        };
        let api = ctx.records::<T>();
        spawn_local(async move {
            let result = match &request.mode {
                FormMode::Create => api.create(&request.body).await,
                FormMode::Edit(id) => api.update(id, &request.body).await,
            };
            ctx.check(&result);
            match page.try_update(|p| p.finish_submit(result)) {
                Some(Ok(SubmitOutcome::NeedsReload(message))) => {
                    if let Some(message) = message {
                        log::info!("{}: {}", T::RESOURCE, message);
                    }
                    reload();
                }
                Some(Err(e)) => log::debug!("{} submit failed: {}", T::RESOURCE, e),
                _ => {}
            }
        });
    };

    let open_create = move |_| {
        if let Some(Err(e)) = page.try_update(|p| p.open_create()) {
            log::debug!("{}", e);
        }
    };

    let open_edit = move |id: u32| {
        if let Some(Err(e)) = page.try_update(|p| p.open_edit(&id)) {
            log::debug!("{}", e);
        }
    };

    let cancel_form = move || {
        if let Some(Err(e)) = page.try_update(|p| p.cancel_form()) {
            log::debug!("{}", e);
        }
    };

    // ========================
    // Delete
    // ========================

    let run_delete = move |ids: Vec<u32>| {
        let api = ctx.records::<T>();
        spawn_local(async move {
            let (removed, error) = delete_each::<T, _>(&api, &ids).await;
            if let Some(e) = &error {
                ctx.check_error(e);
            }
            log::info!("deleted {} of {} {}", removed.len(), ids.len(), T::RESOURCE);
            page.try_update(|p| p.finish_delete(&removed, error));
        });
    };

    // once a delete is pending, resolve it natively or leave it to the modal
    let after_request = move |requested: bool| {
        if !requested || confirm_style != ConfirmStyle::Native {
            return;
        }
        match page.try_update(|p| p.confirm_with(&BrowserConfirm)) {
            Some(Ok(Some(ids))) => run_delete(ids),
            Some(Ok(None)) => log::debug!("{} delete declined", T::RESOURCE),
            Some(Err(e)) => log::debug!("{}", e),
            None => {}
        }
    };

    let request_delete = move |id: u32| {
        let requested = page.try_update(|p| p.request_delete(id).is_ok()).unwrap_or(false);
        after_request(requested);
    };

    let request_delete_selected = move |_| {
        let requested = page.try_update(|p| p.request_delete_selected().is_ok()).unwrap_or(false);
        after_request(requested);
    };

    let affirm_modal = move || match page.try_update(|p| p.affirm_delete()) {
        Some(Ok(ids)) => run_delete(ids),
        Some(Err(e)) => log::debug!("{}", e),
        None => {}
    };

    let reject_modal = move || {
        page.try_update(|p| p.reject_delete().is_ok());
    };

    // ========================
    // View
    // ========================

    let filters = config
        .filters
        .iter()
        .map(|filter| {
            let field = filter.field;
            let options = Signal::derive(move || page.with(|p| filter.choices(p.list().records())));
            let value = Signal::derive(move || page.with(|p| p.list().query().filters.get(field).cloned().unwrap_or_default()));
            view! {
                <FilterSelect
                    label=filter.label
                    options=options
                    value=value
                    on_change=move |v: String| {
                        page.update(|p| {
                            p.set_filter(field, v);
                        });
                        refetch_if_superseded();
                    }
                />
            }
        })
        .collect_view();

    let actions = RowActions {
        on_edit: Callback::new(open_edit),
        on_delete: Callback::new(request_delete),
        on_open: config.detail.map(|detail| Callback::new(move |id: u32| navigate(&store, detail(id)))),
    };

    let phase = move || page.with(|p| p.phase());
    let selected_count = move || page.with(|p| p.list().selection().len());
    let loading = move || phase() == PagePhase::Loading;
    let busy = move || matches!(phase(), PagePhase::Deleting | PagePhase::Submitting);

    view! {
        <section class="management-page">
            <header class="page-header">
                <h2>{config.title}</h2>
                <button type="button" class="primary-btn" disabled=move || phase() != PagePhase::Loaded on:click=open_create>
                    {format!("New {}", config.noun)}
                </button>
            </header>

            <ErrorBanner
                message=Signal::derive(move || page.with(|p| p.banner()))
                on_dismiss=move |_: ()| page.update(|p| p.dismiss_banner())
                on_retry=Callback::new(move |_: ()| reload())
            />

            <div class="toolbar">
                <SearchBar
                    placeholder=format!("Search {}s…", config.noun)
                    value=Signal::derive(move || page.with(|p| p.list().query().search_term.clone()))
                    on_search=move |term: String| {
                        page.update(|p| {
                            p.set_search(term);
                        });
                        refetch_if_superseded();
                    }
                />
                {filters}
                <button
                    type="button"
                    class="clear-filters-btn"
                    disabled=move || page.with(|p| {
                        let query = p.list().query();
                        query.filters.is_empty() && query.search_term.is_empty()
                    })
                    on:click=move |_| {
                        page.update(|p| {
                            p.clear_filters();
                        });
                        refetch_if_superseded();
                    }
                >
                    "Clear filters"
                </button>
                <Show when=move || { selected_count() > 0 }>
                    <button
                        type="button"
                        class="danger-btn"
                        disabled=move || phase() != PagePhase::Loaded
                        on:click=request_delete_selected
                    >
                        {move || format!("Delete selected ({})", selected_count())}
                    </button>
                </Show>
                <Show when=busy>
                    <span class="busy">"Working…"</span>
                </Show>
            </div>

            <Show when=loading>
                <div class="loading">"Loading…"</div>
            </Show>

            {data_table(page, config.columns, actions)}

            <Pagination
                page=Signal::derive(move || page.with(|p| p.list().query().page))
                page_count=Signal::derive(move || page.with(|p| p.list().view().page_count()))
                page_size=Signal::derive(move || page.with(|p| p.list().query().page_size))
                default_page_size=ctx.page_size()
                matched=Signal::derive(move || page.with(|p| p.list().view().matched))
                on_previous=move |_: ()| page.update(|p| p.previous_page())
                on_next=move |_: ()| page.update(|p| p.next_page())
                on_page_size=move |size: usize| page.update(|p| p.set_page_size(size))
            />

            <Show when=move || page.with(|p| p.form().is_open())>
                {form_modal(page, Callback::new(move |_: ()| submit()), Callback::new(move |_: ()| cancel_form()))}
            </Show>

            <ConfirmModal
                prompt=Signal::derive(move || {
                    if confirm_style == ConfirmStyle::Modal {
                        page.with(|p| p.gate().prompt().cloned())
                    } else {
                        None
                    }
                })
                on_confirm=move |_: ()| affirm_modal()
                on_cancel=move |_: ()| reject_modal()
            />
        </section>
    }
}
