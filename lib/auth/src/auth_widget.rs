use leptos::prelude::*;

use agora_utils::icons::AuthErrorIcon;
use agora_utils::widget::ModalDialog;

use crate::auth::{AuthState, OAuthProvider};

/// Modal dialog asking the viewer to sign in, displayed whenever a guarded action is attempted anonymously
#[component]
pub fn SignInDialog(
    /// Urls starting the OAuth flow of each provider
    #[prop(into)]
    sign_in_urls: Signal<Vec<(OAuthProvider, String)>>,
) -> impl IntoView {
    let auth_state = expect_context::<AuthState>();

    view! {
        <ModalDialog
            class="w-full flex justify-center"
            show_dialog=auth_state.show_sign_in
        >
            <div class="bg-base-100 shadow-xl p-4 rounded-xs flex flex-col items-center gap-3 w-96">
                <AuthErrorIcon class="h-20 w-20"/>
                <h1 id="modal-title" class="text-2xl font-bold">"Sign in"</h1>
                <p class="text-center">"You need to be signed in to join the conversation."</p>
                <For
                    each=move || sign_in_urls.get()
                    key=|(provider, _)| *provider
                    children=move |(provider, sign_in_url)| view! {
                        <a href=sign_in_url class="button-primary w-full text-center">
                            {provider.to_label()}
                        </a>
                    }
                />
                <button
                    class="button-secondary w-full"
                    on:click=move |_| auth_state.show_sign_in.set(false)
                >
                    "Cancel"
                </button>
            </div>
        </ModalDialog>
    }
}

fn get_author_class(is_own: bool) -> &'static str {
    match is_own {
        true => "font-semibold text-primary text-sm",
        false => "font-semibold text-gray-900 dark:text-gray-100 text-sm",
    }
}

/// Component to display the author of a comment, highlighted when it is the viewer
#[component]
pub fn AuthorWidget(
    #[prop(into)]
    author: Signal<String>,
    #[prop(into, default = Signal::stored(false))]
    is_own: Signal<bool>,
) -> impl IntoView {
    view! {
        <span class=move || get_author_class(is_own.get())>{author}</span>
    }
}

/// Button ending the current session
#[component]
pub fn SignOutButton<F>(
    on_sign_out: F,
) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    let auth_state = expect_context::<AuthState>();
    view! {
        <Show when=move || auth_state.user.read().is_some()>
            <button class="button-rounded-neutral px-2 py-1 text-sm" on:click={
                let on_sign_out = on_sign_out.clone();
                move |_| on_sign_out()
            }>
                "Sign out"
            </button>
        </Show>
    }
}
