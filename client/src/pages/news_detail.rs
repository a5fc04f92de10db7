//! A single news post.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::net::types::NewsArticle;
use crate::state::session::AppSession;
use crate::util::format::{format_date, news_image_url};

const LOAD_FAILED: &str = "Failed to load news post.";

#[derive(Clone, Debug, PartialEq)]
enum Detail {
    Loading,
    Found(NewsArticle),
    Missing,
    Failed(String),
}

#[component]
pub fn NewsDetailPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let params = use_params_map();
    let base_url = session.api().config().base_url.clone();
    let detail = RwSignal::new(Detail::Loading);

    let news_id = move || params.read().get("id").unwrap_or_default();

    Effect::new(move || {
        let news_id = news_id();
        detail.set(Detail::Loading);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let next = match session.api().news_detail(&news_id).await {
                Ok(Some(article)) => Detail::Found(article),
                Ok(None) => Detail::Missing,
                Err(e) => {
                    leptos::logging::warn!("news {news_id} failed to load: {e}");
                    Detail::Failed(e.user_message(LOAD_FAILED))
                }
            };
            detail.set(next);
        });
    });

    view! {
        <div class="news-detail">
            <a class="news-detail__back" href="/news">"Back to news"</a>
            {move || match detail.get() {
                Detail::Loading => view! { <p class="news-detail__status">"Loading post..."</p> }.into_any(),
                Detail::Missing => view! { <p class="news-detail__status">"News post not found."</p> }.into_any(),
                Detail::Failed(err) => {
                    view! { <p class="news-detail__status news-detail__status--error">{err}</p> }.into_any()
                }
                Detail::Found(article) => {
                    let image = news_image_url(&base_url, article.image.as_deref());
                    let author = article.author_name.clone().filter(|a| !a.trim().is_empty()).unwrap_or_else(|| "Admin".to_owned());
                    let meta = format!("{} · By {author}", format_date(article.publication_date.as_deref()));
                    let paragraphs = article
                        .content
                        .split("\n\n")
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(|p| view! { <p>{p.to_owned()}</p> })
                        .collect_view();
                    view! {
                        <article class="news-detail__post">
                            <img class="news-detail__image" src=image alt=article.title.clone()/>
                            <span class="news-detail__category">{article.category_name.clone().unwrap_or_default()}</span>
                            <h1>{article.title.clone()}</h1>
                            <p class="news-detail__meta">{meta}</p>
                            <div class="news-detail__content">{paragraphs}</div>
                        </article>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
