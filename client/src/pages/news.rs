//! News listing: paged posts with a category sidebar.

#[cfg(test)]
#[path = "news_test.rs"]
mod news_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::config::NEWS_PER_PAGE;
use crate::net::types::{NewsCategory, NewsSummary};
use crate::state::news::{NewsState, page_from_query, page_href};
use crate::state::session::AppSession;
use crate::util::format::{format_date, news_image_url};

const LOAD_FAILED: &str = "Failed to load news. Please try again later.";

fn post_card(base_url: &str, post: NewsSummary) -> impl IntoView {
    let href = format!("/news/{}", post.news_id);
    let image = news_image_url(base_url, post.image.as_deref());
    let title = post.title_or_default().to_owned();
    let author = post.author_or_default().to_owned();
    let date = format_date(post.publication_date.as_deref());
    let snippet = post
        .content_snippet
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "No summary available.".to_owned());
    view! {
        <article class="news-card">
            <a class="news-card__media" href=href.clone()>
                <img src=image alt=title.clone()/>
            </a>
            <div class="news-card__info">
                <p class="news-card__meta">{format!("{date} · By {author}")}</p>
                <h2 class="news-card__title"><a href=href.clone()>{title}</a></h2>
                <p>{snippet}</p>
                <a class="news-card__more" href=href>"Read More"</a>
            </div>
        </article>
    }
}

fn category_list(categories: Vec<NewsCategory>) -> impl IntoView {
    if categories.is_empty() {
        return view! { <li class="news__category">"No categories found."</li> }.into_any();
    }
    categories
        .into_iter()
        .map(|c| view! { <li class="news__category">{format!("{} ({})", c.category_name, c.post_count)}</li> })
        .collect_view()
        .into_any()
}

#[component]
pub fn NewsPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let query = use_query_map();
    let base_url = session.api().config().base_url.clone();
    let news = RwSignal::new(NewsState::default());

    let page = Memo::new(move |_| page_from_query(query.read().get("page").as_deref()));

    Effect::new(move || {
        let page = page.get();
        news.update(|n| n.begin(page));
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let result = session.api().list_news(page, NEWS_PER_PAGE).await;
            // A newer page request owns the listing now.
            if news.with_untracked(|n| n.page != page) {
                return;
            }
            match result {
                Ok(resp) => news.update(|n| n.load(resp)),
                Err(e) => {
                    leptos::logging::warn!("news page {page} failed: {e}");
                    news.update(|n| n.fail(e.user_message(LOAD_FAILED)));
                }
            }
        });
    });

    let pagination = move || {
        news.with(|n| {
            n.has_pagination().then(|| {
                let step = |target: Option<usize>, label: &'static str| match target {
                    Some(p) => view! { <a class="news__page" href=page_href(p)>{label}</a> }.into_any(),
                    None => view! { <span class="news__page news__page--disabled">{label}</span> }.into_any(),
                };
                let prev = step(n.target_page(n.page.saturating_sub(1)), "Previous");
                let next = step(n.target_page(n.page + 1), "Next");
                let current = n.page;
                let numbers = n
                    .page_numbers()
                    .into_iter()
                    .map(|p| {
                        let active = p == current;
                        view! {
                            <a class="news__page" class:news__page--active=active href=page_href(p)>
                                {p}
                            </a>
                        }
                    })
                    .collect_view();
                view! { <nav class="news__pagination">{prev}{numbers}{next}</nav> }
            })
        })
    };

    view! {
        <div class="news">
            <h1>"Latest News"</h1>
            <div class="news__layout">
                <section class="news__posts">
                    {move || {
                        news.with(|n| {
                            if let Some(err) = &n.error {
                                return view! { <p class="news__status news__status--error">{err.clone()}</p> }.into_any();
                            }
                            if n.loading && n.posts.is_empty() {
                                return view! { <p class="news__status">"Loading news..."</p> }.into_any();
                            }
                            if n.posts.is_empty() {
                                return view! { <p class="news__status">"No news posts found."</p> }.into_any();
                            }
                            let base_url = base_url.clone();
                            n.posts
                                .iter()
                                .cloned()
                                .map(|post| post_card(&base_url, post))
                                .collect_view()
                                .into_any()
                        })
                    }}
                    {pagination}
                </section>
                <aside class="news__sidebar">
                    <h2>"Categories"</h2>
                    <ul>{move || category_list(news.with(|n| n.categories.clone()))}</ul>
                </aside>
            </div>
        </div>
    }
}
