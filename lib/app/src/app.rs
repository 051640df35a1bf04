use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use leptos_router::hooks::{use_location, use_params_map};
use leptos_router::{components::{Route, Router, Routes}, ParamSegment, StaticSegment};

use agora_auth::auth::{clear_stored_access_token, get_provider_sign_in_urls, load_stored_access_token, parse_session_fragment, store_access_token, AuthState};
use agora_auth::auth_widget::{SignInDialog, SignOutButton};
use agora_content::comment::CommentSection;
use agora_core::config::DataServiceConfig;
use agora_core::service::RestCommentService;
use agora_core::state::DataServiceState;
use agora_utils::errors::{AppError, ErrorDisplay};
use agora_utils::constants::SITE_ROOT;
use agora_utils::routes::{get_post_path, POST_ROUTE_PARAM_NAME, POST_ROUTE_PREFIX};
use url::Url;

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let body = match DataServiceConfig::from_build_env() {
        Ok(config) => view! { <ConfiguredApp config/> }.into_any(),
        Err(error) => {
            log::error!("Cannot start without data service configuration: {error}");
            view! { <ErrorDisplay error/> }.into_any()
        },
    };

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/agora.css"/>
        <Title text="Agora"/>
        {body}
    }
}

/// Application backed by the data service described by `config`
#[component]
fn ConfiguredApp(
    config: DataServiceConfig,
) -> impl IntoView {
    // Provide global context for app
    let data_service_state = DataServiceState::new(config.clone());
    let auth_state = AuthState::new();
    provide_context(data_service_state.global_state());
    provide_context(auth_state);

    let rest_service = data_service_state.rest_service.clone();
    Effect::new(move |_| rest_service.set_access_token(auth_state.access_token.get()));

    restore_session(auth_state, data_service_state.rest_service.clone());

    let authorize_url = match config.auth_url("authorize") {
        Ok(authorize_url) => Some(authorize_url),
        Err(e) => {
            log::error!("Cannot build sign in url: {e}");
            None
        },
    };
    let on_sign_out = {
        let rest_service = data_service_state.rest_service.clone();
        move || sign_out(auth_state, rest_service.clone())
    };

    view! {
        <Router>
            <main class="min-h-screen flex flex-col items-center">
                <header class="w-full max-w-3xl flex justify-between items-center p-2">
                    <a href=SITE_ROOT class="text-2xl font-bold">"Agora"</a>
                    <SignOutButton on_sign_out/>
                </header>
                <div class="w-full max-w-3xl p-2">
                    <Routes fallback=|| view! { <ErrorDisplay error=AppError::NotFound/> }>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=(StaticSegment(POST_ROUTE_PREFIX), ParamSegment(POST_ROUTE_PARAM_NAME)) view=PostPage/>
                    </Routes>
                </div>
                <CurrentPageSignInDialog authorize_url/>
            </main>
        </Router>
    }
}

/// Url of the current page, to which the identity provider redirects after sign in
fn get_redirect_url(origin: &str, pathname: &str, search: &str) -> String {
    match search.is_empty() || search.starts_with('?') {
        true => format!("{origin}{pathname}{search}"),
        false => format!("{origin}{pathname}?{search}"),
    }
}

/// Sign in dialog whose providers send the viewer back to the page currently displayed
#[component]
fn CurrentPageSignInDialog(
    authorize_url: Option<Url>,
) -> impl IntoView {
    let location = use_location();
    let origin = window().location().origin().unwrap_or_default();
    let sign_in_urls = Signal::derive(move || match &authorize_url {
        Some(authorize_url) => {
            let redirect_to = get_redirect_url(&origin, &location.pathname.read(), &location.search.read());
            get_provider_sign_in_urls(authorize_url, &redirect_to)
        },
        None => Vec::new(),
    });

    view! {
        <SignInDialog sign_in_urls/>
    }
}

/// Restores the viewer's session, from the url fragment after an OAuth redirect or from the local storage
fn restore_session(
    auth_state: AuthState,
    rest_service: Arc<RestCommentService>,
) {
    let location = window().location();
    let fragment_tokens = location.hash().ok().and_then(|fragment| parse_session_fragment(&fragment));
    let access_token = match fragment_tokens {
        Some(session_tokens) => {
            store_access_token(&session_tokens.access_token);
            // keep the token out of the address bar and the history
            if let Err(e) = location.set_hash("") {
                log::warn!("Could not clear session fragment: {e:?}");
            }
            Some(session_tokens.access_token)
        },
        None => load_stored_access_token(),
    };

    if let Some(access_token) = access_token {
        spawn_local(async move {
            match rest_service.fetch_current_user(&access_token).await {
                Ok(user) => auth_state.set_session(user, access_token),
                Err(e) => {
                    log::warn!("Stored session is no longer valid: {e}");
                    clear_stored_access_token();
                    auth_state.clear_session();
                },
            }
        });
    }
}

fn sign_out(
    auth_state: AuthState,
    rest_service: Arc<RestCommentService>,
) {
    let access_token = auth_state.access_token.get_untracked();
    clear_stored_access_token();
    auth_state.clear_session();
    if let Some(access_token) = access_token {
        spawn_local(async move {
            if let Err(e) = rest_service.sign_out(&access_token).await {
                log::warn!("Failed to end session on the data service: {e}");
            }
        });
    }
}

/// Renders the home page of your application.
#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div class="flex flex-col gap-2 py-4">
            <h1 class="text-3xl font-bold">"Agora"</h1>
            <p>"Open a post to read and join its discussion."</p>
            <a href=get_post_path(1) class="button-primary w-fit">"Go to the first post"</a>
        </div>
    }
}

/// Page displaying the discussion of the post in the url
#[component]
fn PostPage() -> impl IntoView {
    let params = use_params_map();
    let post_id = Memo::new(move |_| {
        params.read().get(POST_ROUTE_PARAM_NAME).and_then(|post_id| post_id.parse::<i64>().ok())
    });

    view! {
        {
            move || match post_id.get() {
                Some(post_id) => view! { <CommentSection post_id/> }.into_any(),
                None => view! { <ErrorDisplay error=AppError::NotFound/> }.into_any(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::get_redirect_url;

    #[test]
    fn test_get_redirect_url() {
        assert_eq!(get_redirect_url("https://agora.example.com", "/", ""), "https://agora.example.com/");
        assert_eq!(get_redirect_url("https://agora.example.com", "/post/3", ""), "https://agora.example.com/post/3");
        assert_eq!(
            get_redirect_url("https://agora.example.com", "/post/3", "?sort=new"),
            "https://agora.example.com/post/3?sort=new"
        );
        assert_eq!(
            get_redirect_url("https://agora.example.com", "/post/3", "sort=new"),
            "https://agora.example.com/post/3?sort=new"
        );
    }
}
