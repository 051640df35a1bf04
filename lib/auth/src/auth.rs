use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use url::Url;
use web_sys::MouseEvent;

use crate::user::User;

pub const ACCESS_TOKEN_STORAGE_KEY: &str = "agora.access_token";
pub const ACCESS_TOKEN_PARAM: &str = "access_token";
pub const REFRESH_TOKEN_PARAM: &str = "refresh_token";
pub const EXPIRES_IN_PARAM: &str = "expires_in";
pub const PROVIDER_PARAM: &str = "provider";
pub const REDIRECT_TO_PARAM: &str = "redirect_to";

#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum OAuthProvider {
    #[default]
    Google,
    Github,
}

impl OAuthProvider {
    pub fn to_label(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Continue with Google",
            OAuthProvider::Github => "Continue with GitHub",
        }
    }
}

/// Tokens handed back by the identity provider in the url fragment after an OAuth sign in
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// Capability to ask the viewer to sign in
pub trait SignInPrompt {
    fn request_sign_in(&self);
}

/// Source of the current identity
pub trait IdentityProvider: SignInPrompt {
    fn current_user(&self) -> Option<User>;
}

/// Reactive authentication state shared through the context
#[derive(Copy, Clone)]
pub struct AuthState {
    pub user: RwSignal<Option<User>>,
    pub access_token: RwSignal<Option<String>>,
    pub show_sign_in: RwSignal<bool>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            user: RwSignal::new(None),
            access_token: RwSignal::new(None),
            show_sign_in: RwSignal::new(false),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.read_untracked().is_some()
    }

    /// Stores the identity of a freshly authenticated session and closes the sign-in prompt
    pub fn set_session(&self, user: User, access_token: String) {
        log::debug!("Signed in as {}", user.username);
        self.user.set(Some(user));
        self.access_token.set(Some(access_token));
        self.show_sign_in.set(false);
    }

    pub fn clear_session(&self) {
        self.user.set(None);
        self.access_token.set(None);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInPrompt for AuthState {
    fn request_sign_in(&self) {
        log::debug!("Request sign in.");
        self.show_sign_in.set(true);
    }
}

impl IdentityProvider for AuthState {
    fn current_user(&self) -> Option<User> {
        self.user.get_untracked()
    }
}

/// Builds the url starting the OAuth flow of `provider`, which redirects to `redirect_to` once done
pub fn get_sign_in_url(
    authorize_url: &Url,
    provider: OAuthProvider,
    redirect_to: &str,
) -> Url {
    let mut sign_in_url = authorize_url.clone();
    sign_in_url.query_pairs_mut()
        .append_pair(PROVIDER_PARAM, &provider.to_string())
        .append_pair(REDIRECT_TO_PARAM, redirect_to);
    sign_in_url
}

/// Builds the sign in url of every supported provider, in the order they are offered to the viewer
pub fn get_provider_sign_in_urls(
    authorize_url: &Url,
    redirect_to: &str,
) -> Vec<(OAuthProvider, String)> {
    OAuthProvider::iter()
        .map(|provider| (provider, get_sign_in_url(authorize_url, provider, redirect_to).to_string()))
        .collect()
}

/// Extracts the session tokens from the url fragment set by the identity provider after sign in
pub fn parse_session_fragment(fragment: &str) -> Option<SessionTokens> {
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    for (key, value) in url::form_urlencoded::parse(fragment.trim_start_matches('#').as_bytes()) {
        match key.as_ref() {
            ACCESS_TOKEN_PARAM => access_token = Some(value.into_owned()),
            REFRESH_TOKEN_PARAM => refresh_token = Some(value.into_owned()),
            EXPIRES_IN_PARAM => expires_in = value.parse::<i64>().ok(),
            _ => (),
        }
    }
    access_token
        .filter(|access_token| !access_token.is_empty())
        .map(|access_token| SessionTokens {
            access_token,
            refresh_token,
            expires_in,
        })
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window().local_storage().ok().flatten()
}

pub fn load_stored_access_token() -> Option<String> {
    get_local_storage().and_then(|storage| storage.get_item(ACCESS_TOKEN_STORAGE_KEY).ok().flatten())
}

pub fn store_access_token(access_token: &str) {
    match get_local_storage() {
        Some(storage) => if let Err(e) = storage.set_item(ACCESS_TOKEN_STORAGE_KEY, access_token) {
            log::warn!("Could not persist session: {e:?}");
        },
        None => log::warn!("Local storage unavailable, session will not be persisted."),
    }
}

pub fn clear_stored_access_token() {
    if let Some(storage) = get_local_storage() {
        if let Err(e) = storage.remove_item(ACCESS_TOKEN_STORAGE_KEY) {
            log::warn!("Could not clear persisted session: {e:?}");
        }
    }
}

/// Login guarded button component. If the user is logged in, the button runs `button_action`.
/// Otherwise, clicking it prompts the user to sign in.
#[component]
pub fn LoginGuardedButton<A>(
    #[prop(into)]
    button_class: Signal<&'static str>,
    button_action: A,
    children: Children,
) -> impl IntoView
where
    A: Fn(MouseEvent) + Clone + Send + Sync + 'static,
{
    let auth_state = expect_context::<AuthState>();
    view! {
        <button
            class=button_class
            on:click=move |ev| match auth_state.is_signed_in() {
                true => button_action(ev),
                false => auth_state.request_sign_in(),
            }
        >
            {children()}
        </button>
    }
}
