use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_use::use_resize_observer;

use agora_auth::auth::{AuthState, LoginGuardedButton};
use agora_auth::auth_widget::AuthorWidget;
use agora_core::cache::QueryKey;
use agora_core::comment::{find_comment, get_comment_anchor_id, CommentNode};
use agora_core::constants::MAX_RENDER_DEPTH;
use agora_core::reply::{load_comment_forest, submit_comment};
use agora_core::state::GlobalState;
use agora_core::thread::{ReplyFormState, ThreadNodeState};
use agora_utils::constants::DEFAULT_AVATAR_PATH;
use agora_utils::errors::{ErrorDisplay, InlineErrorDisplay};
use agora_utils::icons::{HeartIcon, LoadingIcon, ReplyIcon};
use agora_utils::node_utils::get_anchor_offsets;
use agora_utils::unpack::handle_initial_load;
use agora_utils::widget::{DotMenu, TimeSinceWidget};

use crate::thread_lines::ThreadLines;

/// Comment whose sub-tree is displayed instead of the whole forest, when a thread is too deep to be rendered inline
#[derive(Copy, Clone)]
pub struct ThreadFocus {
    pub comment_id: RwSignal<Option<i64>>,
}

impl ThreadFocus {
    pub fn new() -> Self {
        Self {
            comment_id: RwSignal::new(None),
        }
    }
}

impl Default for ThreadFocus {
    fn default() -> Self {
        Self::new()
    }
}

/// Loading marker of the comment section
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadIndicator {
    Hidden,
    /// Nothing is displayed yet
    Initial,
    /// Displayed comments are being reloaded
    Refresh,
}

fn get_load_indicator(is_loading: bool, has_content: bool) -> LoadIndicator {
    match (is_loading, has_content) {
        (false, _) => LoadIndicator::Hidden,
        (true, false) => LoadIndicator::Initial,
        (true, true) => LoadIndicator::Refresh,
    }
}

/// Publishes the draft of `form_state` in the background
fn spawn_submit_comment(
    state: GlobalState,
    auth_state: AuthState,
    form_state: ReplyFormState,
    post_id: i64,
    parent_comment_id: Option<i64>,
) {
    let body = match form_state.begin_submit() {
        Some(body) => body,
        None => return,
    };
    spawn_local(async move {
        let result = submit_comment(
            state.comment_service.as_ref(),
            &state.query_cache,
            &auth_state,
            post_id,
            parent_comment_id,
            &body,
        ).await;
        form_state.apply_result(result);
    });
}

/// Comment section of a post: the form to start a new thread followed by the comment forest
#[component]
pub fn CommentSection(
    post_id: i64,
) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let auth_state = expect_context::<AuthState>();
    let thread_focus = ThreadFocus::new();
    provide_context(thread_focus);

    let comment_forest = RwSignal::new(Vec::<CommentNode>::new());
    let is_loading = RwSignal::new(true);
    let load_error = RwSignal::new(None);
    // released when the section is disposed, which tears down the cache entry once nobody observes it
    let subscription = StoredValue::new(state.query_cache.subscribe(QueryKey::Comments(post_id)));

    let _comment_resource = LocalResource::new({
        let state = state.clone();
        move || {
            let state = state.clone();
            async move {
                let generation = subscription.with_value(|subscription| subscription.track());
                let viewer = auth_state.user.get();
                is_loading.set(true);
                let load_result = load_comment_forest(
                    state.comment_service.as_ref(),
                    &state.query_cache,
                    post_id,
                    generation,
                    viewer.as_ref(),
                ).await;
                handle_initial_load(load_result, comment_forest, load_error);
                is_loading.set(false);
            }
        }
    });

    let load_indicator = Memo::new(move |_| get_load_indicator(
        is_loading.get(),
        !comment_forest.read().is_empty() || load_error.read().is_some(),
    ));

    view! {
        <div class="flex flex-col gap-2 w-full">
            <div class="flex items-center gap-2">
                <h2 class="text-xl font-semibold">"Comments"</h2>
                <Show when=move || load_indicator.get() == LoadIndicator::Refresh>
                    <LoadingIcon class="h-4 w-4"/>
                </Show>
            </div>
            <NewCommentForm post_id/>
            <Show when=move || load_indicator.get() == LoadIndicator::Initial>
                <div class="flex items-center gap-2 text-sm text-gray-500 dark:text-gray-400">
                    <LoadingIcon class="h-5 w-5"/>
                    "Loading comments..."
                </div>
            </Show>
            {
                move || load_error.get().map(|error| view! {
                    <div class="flex justify-start py-4"><ErrorDisplay error/></div>
                })
            }
            <Show when=move || !is_loading.get() && load_error.read().is_none() && comment_forest.read().is_empty()>
                <p class="text-center text-sm text-gray-500 dark:text-gray-400 py-4">"Be the first to comment this post"</p>
            </Show>
            {
                move || match thread_focus.comment_id.get() {
                    Some(comment_id) => view! { <FocusedThread comment_id comment_forest post_id/> }.into_any(),
                    None => view! { <CommentForest comment_forest post_id/> }.into_any(),
                }
            }
        </div>
    }.into_any()
}

/// Component displaying the root comments of a post and their replies
#[component]
pub fn CommentForest(
    comment_forest: RwSignal<Vec<CommentNode>>,
    post_id: i64,
) -> impl IntoView {
    view! {
        <div class="flex flex-col">
            <For
                each=move || comment_forest.get()
                key=|node| node.comment_id()
                children=move |root_node| {
                    let comment_id = root_node.comment_id();
                    let fallback_node = StoredValue::new(root_node);
                    let node = Signal::derive(move || {
                        comment_forest
                            .with(|comment_forest| comment_forest.iter().find(|node| node.comment_id() == comment_id).cloned())
                            .unwrap_or_else(|| fallback_node.get_value())
                    });
                    view! { <CommentItem node depth=0 post_id/> }.into_any()
                }
            />
        </div>
    }.into_any()
}

/// Component displaying the sub-tree of `comment_id` as if it was a root comment
#[component]
pub fn FocusedThread(
    comment_id: i64,
    comment_forest: RwSignal<Vec<CommentNode>>,
    post_id: i64,
) -> impl IntoView {
    let thread_focus = expect_context::<ThreadFocus>();
    let is_found = Memo::new(move |_| comment_forest.with(|comment_forest| find_comment(comment_forest, comment_id).is_some()));

    view! {
        <button
            class="button-secondary w-fit text-sm"
            on:click=move |_| thread_focus.comment_id.set(None)
        >
            "Back to full thread"
        </button>
        {
            move || is_found.get()
                .then(|| comment_forest.with_untracked(|comment_forest| find_comment(comment_forest, comment_id).cloned()))
                .flatten()
                .map(|initial_node| {
                    let fallback_node = StoredValue::new(initial_node);
                    let node = Signal::derive(move || {
                        comment_forest
                            .with(|comment_forest| find_comment(comment_forest, comment_id).cloned())
                            .unwrap_or_else(|| fallback_node.get_value())
                    });
                    view! { <CommentItem node depth=0 post_id/> }
                })
        }
    }.into_any()
}

/// Comment with its replies, rendered recursively until `MAX_RENDER_DEPTH`
#[component]
pub fn CommentItem(
    #[prop(into)]
    node: Signal<CommentNode>,
    depth: usize,
    post_id: i64,
) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let auth_state = expect_context::<AuthState>();
    let thread_focus = expect_context::<ThreadFocus>();
    let node_state = ThreadNodeState::new();
    let container_ref = NodeRef::<html::Div>::new();

    let (comment_id, base_like_count) = node.with_untracked(|node| (node.comment_id(), node.like_count));
    let anchor_id = get_comment_anchor_id(comment_id);
    let author_name = Signal::derive(move || node.with(|node| node.comment.author_name.clone()));
    let is_own = Signal::derive(move || node.with(|node| node.is_own));
    let avatar_src = move || node.with(|node| node.comment.avatar_url.clone().unwrap_or_else(|| String::from(DEFAULT_AVATAR_PATH)));
    let avatar_alt = move || format!("{}'s avatar", author_name.get());
    let timestamp = Signal::derive(move || node.with(|node| node.comment.create_timestamp));
    let body = move || node.with(|node| node.comment.body.clone());
    let has_children = Memo::new(move |_| node.with(|node| node.has_children()));
    let is_depth_capped = depth >= MAX_RENDER_DEPTH;
    let is_collapsed = node_state.is_collapsed;

    let measure_child_offsets = move || {
        if !node_state.can_measure_children(has_children.get_untracked()) {
            return;
        }
        let anchor_ids = node.with_untracked(|node| {
            node.child_comments.iter().map(|child| get_comment_anchor_id(child.comment_id())).collect::<Vec<String>>()
        });
        match get_anchor_offsets(container_ref, &anchor_ids) {
            Some(child_offsets) => node_state.set_child_offsets(child_offsets),
            None => log::trace!("Container of comment {comment_id} is not mounted, skip measurement."),
        }
    };

    // measure once the layout reflects the latest replies, collapse state and reply form
    Effect::new(move |_| {
        node.track();
        is_collapsed.track();
        node_state.reply_form.is_open.track();
        request_animation_frame(measure_child_offsets);
    });
    use_resize_observer(container_ref, move |_, _| measure_child_offsets());

    let geometry = Signal::derive(move || node_state.connector_geometry());
    let on_toggle = Callback::new(move |_| node_state.toggle_collapsed());
    let on_reply = Callback::new(move |_| spawn_submit_comment(state.clone(), auth_state, node_state.reply_form, post_id, Some(comment_id)));
    let avatar_class = move || match is_collapsed.get() {
        true => "w-8 h-8 rounded-full object-cover ring-2 ring-base-100 shadow-sm relative z-20 opacity-0",
        false => "w-8 h-8 rounded-full object-cover ring-2 ring-base-100 shadow-sm relative z-20",
    };

    view! {
        <div class="relative" node_ref=container_ref data-collapsed=move || is_collapsed.get().to_string()>
            <div class="flex py-3">
                <div class="flex flex-1">
                    <div id=anchor_id class="shrink-0 mr-3">
                        <img src=avatar_src alt=avatar_alt class=avatar_class/>
                    </div>
                    <div class="flex-1 min-w-0">
                        <div class="flex items-center mt-2 gap-2 mb-2">
                            <AuthorWidget author=author_name is_own/>
                            <span class="text-gray-500 dark:text-gray-400 text-xs">"•"</span>
                            <TimeSinceWidget timestamp/>
                        </div>
                        <Show when=move || !is_collapsed.get()>
                            <div class="prose prose-sm max-w-none mb-3">
                                <p class="text-sm leading-relaxed whitespace-pre-wrap">{body}</p>
                            </div>
                            <CommentActions node_state base_like_count/>
                            <Show when=move || node_state.reply_form.is_open.get()>
                                <CommentForm
                                    form_state=node_state.reply_form
                                    placeholder="Write your reply..."
                                    submit_label="Post Reply"
                                    error_message="Error posting reply."
                                    on_submit=on_reply
                                />
                            </Show>
                        </Show>
                    </div>
                </div>
            </div>
            <Show when=move || has_children.get() && !is_depth_capped>
                <ThreadLines geometry is_collapsed depth on_toggle/>
            </Show>
            <Show when=move || has_children.get() && is_depth_capped && !is_collapsed.get()>
                <button
                    class="button-neutral ml-12 px-2 py-1 text-xs"
                    on:click=move |_| thread_focus.comment_id.set(Some(comment_id))
                >
                    {move || format!("Continue this thread ({})", node.with(|node| node.descendant_count()))}
                </button>
            </Show>
            {
                (!is_depth_capped).then(|| view! {
                    <div class="ml-12 relative" class:hidden=move || is_collapsed.get()>
                        <For
                            each=move || node.with(|node| node.child_comments.clone())
                            key=|child| child.comment_id()
                            children=move |child| {
                                let child_id = child.comment_id();
                                let fallback_node = StoredValue::new(child);
                                let child_node = Signal::derive(move || {
                                    node.with(|node| node.child_comments.iter().find(|child| child.comment_id() == child_id).cloned())
                                        .unwrap_or_else(|| fallback_node.get_value())
                                });
                                view! { <CommentItem node=child_node depth=depth+1 post_id/> }.into_any()
                            }
                        />
                    </div>
                })
            }
        </div>
    }.into_any()
}

/// Reaction, reply and overflow buttons of a comment
#[component]
pub fn CommentActions(
    node_state: ThreadNodeState,
    base_like_count: i32,
) -> impl IntoView {
    let is_liked = node_state.is_liked;
    let like_class = move || match is_liked.get() {
        true => "flex items-center gap-1 text-red-500 dark:text-red-400 transition-colors",
        false => "flex items-center gap-1 hover:text-red-500 dark:hover:text-red-400 transition-colors",
    };
    view! {
        <div class="flex items-center gap-4 text-xs text-gray-500 dark:text-gray-400 mb-3">
            <button
                class=like_class
                aria-pressed=move || is_liked.get().to_string()
                on:click=move |_| node_state.toggle_like()
            >
                <HeartIcon is_filled=is_liked/>
                <span>{move || node_state.like_count(base_like_count)}</span>
            </button>
            <LoginGuardedButton
                button_class="flex items-center gap-1 hover:text-blue-500 dark:hover:text-blue-400 transition-colors"
                button_action=move |_| node_state.reply_form.toggle()
            >
                <ReplyIcon/>
                <span>"Reply"</span>
            </LoginGuardedButton>
            <DotMenu/>
        </div>
    }
}

/// Form to write a comment. The draft is kept until the comment is published.
#[component]
pub fn CommentForm(
    form_state: ReplyFormState,
    placeholder: &'static str,
    submit_label: &'static str,
    error_message: &'static str,
    on_submit: Callback<()>,
) -> impl IntoView {
    let is_submitting = Signal::derive(move || form_state.is_submitting());
    let has_error = move || form_state.error().is_some();
    view! {
        <form
            class="mb-4"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(());
            }
        >
            <textarea
                class="w-full p-2 border border-gray-300 dark:border-gray-700 rounded-lg bg-base-100 text-sm"
                placeholder=placeholder
                prop:value=move || form_state.draft.get()
                on:input=move |ev| form_state.draft.set(event_target_value(&ev))
            />
            <div class="mt-2 flex justify-end gap-2">
                <button
                    type="button"
                    class="px-3 py-1 text-xs rounded-md bg-base-300 hover:bg-base-200 transition-colors"
                    on:click=move |_| form_state.close()
                >
                    "Cancel"
                </button>
                <button
                    type="submit"
                    class="px-3 py-1 text-xs rounded-md bg-blue-500 text-white hover:bg-blue-600 transition-colors disabled:opacity-50"
                    disabled=move || is_submitting.get()
                >
                    {move || match is_submitting.get() {
                        true => "Posting...",
                        false => submit_label,
                    }}
                </button>
            </div>
            <Show when=has_error>
                <InlineErrorDisplay message=error_message/>
            </Show>
        </form>
    }
}

/// Form to start a new thread in the post, opened from a placeholder that prompts anonymous viewers to sign in
#[component]
pub fn NewCommentForm(
    post_id: i64,
) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let auth_state = expect_context::<AuthState>();
    let form_state = ReplyFormState::new();
    let on_submit = Callback::new(move |_| spawn_submit_comment(state.clone(), auth_state, form_state, post_id, None));

    view! {
        <div class="w-full">
            <Show
                when=move || form_state.is_open.get()
                fallback=move || view! {
                    <LoginGuardedButton
                        button_class="w-full text-left p-2 border border-gray-300 dark:border-gray-700 rounded-lg text-sm text-gray-500"
                        button_action=move |_| form_state.is_open.set(true)
                    >
                        "Join the conversation"
                    </LoginGuardedButton>
                }
            >
                <CommentForm
                    form_state
                    placeholder="Join the conversation"
                    submit_label="Post Comment"
                    error_message="Error posting comment."
                    on_submit
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use crate::comment::{get_load_indicator, LoadIndicator};

    #[test]
    fn test_get_load_indicator() {
        assert_eq!(get_load_indicator(false, false), LoadIndicator::Hidden);
        assert_eq!(get_load_indicator(false, true), LoadIndicator::Hidden);
        assert_eq!(get_load_indicator(true, false), LoadIndicator::Initial);
        assert_eq!(get_load_indicator(true, true), LoadIndicator::Refresh);
    }
}
