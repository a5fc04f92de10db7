//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::{modal_host::ModalHost, navbar::Navbar, protected_route::ProtectedRoute};
use crate::config::ApiConfig;
use crate::net::api::HttpApi;
use crate::pages::{
    account_address::AccountAddressPage, account_orders::AccountOrdersPage, account_profile::AccountProfilePage,
    cart::CartPage, checkout::CheckoutPage, home::HomePage, news::NewsPage, news_detail::NewsDetailPage,
    not_found::NotFoundPage,
    product_detail::ProductDetailPage, products::ProductsPage,
};
use crate::state::modal::ModalState;
use crate::state::session::AppSession;
use crate::util::storage::BrowserStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the modal orchestrator and the session store, then starts the
/// session once the app is running in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let modal = RwSignal::new(ModalState::default());
    let session = AppSession::new(HttpApi::new(ApiConfig::default()), BrowserStorage::default(), modal);

    provide_context(modal);
    provide_context(session.clone());

    // Storage is only readable client-side; both renders start pending.
    Effect::new(move || {
        let session = session.clone();
        leptos::task::spawn_local(async move { session.start().await });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css"/>
        <Title text="Pumacon Store"/>

        <Router>
            <Navbar/>
            <ModalHost/>
            <main class="page">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("products") view=ProductsPage/>
                    <Route path=(StaticSegment("products"), ParamSegment("sku")) view=ProductDetailPage/>
                    <Route path=StaticSegment("news") view=NewsPage/>
                    <Route path=(StaticSegment("news"), ParamSegment("id")) view=NewsDetailPage/>
                    <Route path=StaticSegment("cart") view=CartPage/>
                    <Route
                        path=StaticSegment("checkout")
                        view=|| view! { <ProtectedRoute><CheckoutPage/></ProtectedRoute> }
                    />
                    <Route path=StaticSegment("account") view=|| view! { <Redirect path="/account/profile"/> }/>
                    <Route
                        path=(StaticSegment("account"), StaticSegment("profile"))
                        view=|| view! { <ProtectedRoute><AccountProfilePage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("account"), StaticSegment("orders"))
                        view=|| view! { <ProtectedRoute><AccountOrdersPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("account"), StaticSegment("address"))
                        view=|| view! { <ProtectedRoute><AccountAddressPage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
