use agora_auth::auth::IdentityProvider;
use agora_auth::user::User;
use agora_utils::constants::MAX_CONTENT_LENGTH;
use agora_utils::errors::AppError;

use crate::cache::{QueryCache, QueryKey};
use crate::comment::{build_comment_forest, sort_by_create_timestamp, CommentNode, NewComment};
use crate::service::CommentService;

/// Status of the comment submission of a form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ReplyStatus {
    #[default]
    Idle,
    Submitting,
    Failed(AppError),
}

/// Successful ends of a comment submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted,
    SignInRequested,
    EmptyBody,
}

/// Loads the comments of `post_id` and builds their forest, fetching them only if they are not cached.
/// `generation` is the generation of the cache entry when the load was triggered.
pub async fn load_comment_forest<S>(
    service: &S,
    cache: &QueryCache,
    post_id: i64,
    generation: usize,
    viewer: Option<&User>,
) -> Result<Vec<CommentNode>, AppError>
where
    S: CommentService + ?Sized,
{
    let key = QueryKey::Comments(post_id);
    let mut comment_vec = match cache.cached(&key) {
        Some(comment_vec) => comment_vec,
        None => {
            let comment_vec = service.fetch_comments(post_id).await?;
            cache.store(&key, generation, comment_vec.clone());
            comment_vec
        }
    };
    sort_by_create_timestamp(&mut comment_vec);
    Ok(build_comment_forest(comment_vec, viewer))
}

/// Publishes a comment in `post_id`, as a reply to `parent_comment_id` if any.
///
/// Blank bodies are ignored. Anonymous viewers are prompted to sign in and nothing is sent. Once the comment is published,
/// the comments of the post are invalidated so that every observer reloads them.
pub async fn submit_comment<S, I>(
    service: &S,
    cache: &QueryCache,
    identity: &I,
    post_id: i64,
    parent_comment_id: Option<i64>,
    body: &str,
) -> Result<SubmitOutcome, AppError>
where
    S: CommentService + ?Sized,
    I: IdentityProvider + ?Sized,
{
    if body.trim().is_empty() {
        return Ok(SubmitOutcome::EmptyBody);
    }
    let user = match identity.current_user() {
        Some(user) => user,
        None => {
            identity.request_sign_in();
            return Ok(SubmitOutcome::SignInRequested);
        }
    };
    if body.chars().count() > MAX_CONTENT_LENGTH {
        return Err(AppError::InvalidInput(format!("Comment exceeds {MAX_CONTENT_LENGTH} characters.")));
    }

    log::trace!("Submit comment in post {post_id}, parent: {parent_comment_id:?}");
    let new_comment = NewComment {
        post_id,
        parent_comment_id,
        body: String::from(body),
        author_id: user.user_id,
        author_name: user.username,
    };
    if let Err(e) = service.insert_comment(new_comment).await {
        log::error!("Failed to publish comment in post {post_id}: {e}");
        return Err(e);
    }
    cache.invalidate(&QueryKey::Comments(post_id));
    Ok(SubmitOutcome::Posted)
}
