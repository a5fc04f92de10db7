//! Catalog listing with category filter and pagination.

use leptos::prelude::*;

use crate::components::product_card::ProductCard;
use crate::state::catalog::CatalogState;
use crate::state::session::AppSession;

const LOAD_FAILED: &str = "Failed to load products.";

#[component]
pub fn ProductsPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let catalog = RwSignal::new(CatalogState::default());

    Effect::new(move || {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.api().list_products().await {
                Ok(resp) => catalog.update(|c| c.load(resp)),
                Err(e) => {
                    leptos::logging::warn!("product list failed: {e}");
                    catalog.update(|c| c.fail(e.user_message(LOAD_FAILED)));
                }
            }
        });
    });

    let category_buttons = move || {
        let (categories, active) = catalog.with(|c| (c.categories.clone(), c.active_category.clone()));
        let all_active = active.is_none();
        let mut buttons = vec![view! {
            <button
                class="catalog__category"
                class:catalog__category--active=all_active
                on:click=move |_| catalog.update(|c| c.set_category(None))
            >
                "All"
            </button>
        }
            .into_any()];
        buttons.extend(categories.into_iter().map(|category| {
            let is_active = active.as_deref() == Some(category.category_name.as_str());
            let name = category.category_name;
            let label = name.clone();
            view! {
                <button
                    class="catalog__category"
                    class:catalog__category--active=is_active
                    on:click=move |_| catalog.update(|c| c.set_category(Some(name.clone())))
                >
                    {label}
                </button>
            }
                .into_any()
        }));
        buttons
    };

    let pagination = move || {
        let (page, total) = catalog.with(|c| (c.page, c.total_pages()));
        let at_first = page <= 1;
        let at_last = page >= total;
        (total > 1).then(|| {
            view! {
                <div class="catalog__pagination">
                    <button disabled=at_first on:click=move |_| { catalog.update(|c| { c.go_to(page - 1); }); }>
                        "Previous"
                    </button>
                    <span>{format!("Page {page} of {total}")}</span>
                    <button disabled=at_last on:click=move |_| { catalog.update(|c| { c.go_to(page + 1); }); }>
                        "Next"
                    </button>
                </div>
            }
        })
    };

    view! {
        <div class="catalog">
            <h1>"Products"</h1>
            <div class="catalog__categories">{category_buttons}</div>
            {move || {
                catalog.with(|c| {
                    if c.loading {
                        return view! { <p class="catalog__status">"Loading products..."</p> }.into_any();
                    }
                    if let Some(err) = &c.error {
                        return view! { <p class="catalog__status catalog__status--error">{err.clone()}</p> }.into_any();
                    }
                    let items = c.page_items();
                    if items.is_empty() {
                        return view! { <p class="catalog__status">"No products found."</p> }.into_any();
                    }
                    view! {
                        <div class="product-grid">
                            {items.into_iter().map(|product| view! { <ProductCard product/> }).collect_view()}
                        </div>
                    }
                        .into_any()
                })
            }}
            {pagination}
        </div>
    }
}
