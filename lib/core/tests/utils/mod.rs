#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use agora_auth::auth::{IdentityProvider, SignInPrompt};
use agora_auth::user::User;
use agora_core::comment::{CommentNode, CommentRecord, NewComment};
use agora_core::service::CommentService;
use agora_utils::errors::AppError;

pub const TEST_POST_ID: i64 = 1;

pub fn create_test_comment(comment_id: i64, parent_id: Option<i64>) -> CommentRecord {
    CommentRecord {
        comment_id,
        post_id: TEST_POST_ID,
        parent_id,
        body: format!("comment {comment_id}"),
        author_id: format!("user-{}", comment_id % 3),
        author_name: format!("user {}", comment_id % 3),
        create_timestamp: Utc.timestamp_opt(1_700_000_000 + comment_id * 60, 0).unwrap(),
        avatar_url: None,
    }
}

pub fn create_test_user() -> User {
    User {
        user_id: String::from("user-1"),
        username: String::from("user 1"),
        avatar_url: Some(String::from("https://example.com/avatar.png")),
    }
}

/// Shape of a forest as (comment id, shape of the replies), to compare trees structurally
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeShape(pub i64, pub Vec<TreeShape>);

pub fn get_forest_shape(comment_forest: &[CommentNode]) -> Vec<TreeShape> {
    comment_forest
        .iter()
        .map(|node| TreeShape(node.comment_id(), get_forest_shape(&node.child_comments)))
        .collect()
}

/// In-memory comment service recording the requests it receives
#[derive(Default)]
pub struct FakeCommentService {
    pub comment_vec: Mutex<Vec<CommentRecord>>,
    pub inserted_comments: Mutex<Vec<NewComment>>,
    pub fetch_count: AtomicUsize,
    pub insert_error: Mutex<Option<AppError>>,
    pub fetch_error: Mutex<Option<AppError>>,
}

impl FakeCommentService {
    pub fn new(comment_vec: Vec<CommentRecord>) -> Self {
        Self {
            comment_vec: Mutex::new(comment_vec),
            ..Default::default()
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserted_comments.lock().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait(?Send)]
impl CommentService for FakeCommentService {
    async fn fetch_comments(&self, post_id: i64) -> Result<Vec<CommentRecord>, AppError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.fetch_error.lock().clone() {
            return Err(error);
        }
        Ok(self.comment_vec.lock().iter().filter(|comment| comment.post_id == post_id).cloned().collect())
    }

    async fn insert_comment(&self, new_comment: NewComment) -> Result<(), AppError> {
        if let Some(error) = self.insert_error.lock().clone() {
            return Err(error);
        }
        let mut comment_vec = self.comment_vec.lock();
        let comment_id = comment_vec.iter().map(|comment| comment.comment_id).max().unwrap_or_default() + 1;
        comment_vec.push(CommentRecord {
            comment_id,
            post_id: new_comment.post_id,
            parent_id: new_comment.parent_comment_id,
            body: new_comment.body.clone(),
            author_id: new_comment.author_id.clone(),
            author_name: new_comment.author_name.clone(),
            create_timestamp: Utc.timestamp_opt(1_800_000_000 + comment_id, 0).unwrap(),
            avatar_url: None,
        });
        self.inserted_comments.lock().push(new_comment);
        Ok(())
    }
}

/// Identity provider with a fixed identity, counting the sign-in prompts
#[derive(Default)]
pub struct FakeIdentity {
    pub user: Option<User>,
    pub sign_in_request_count: AtomicUsize,
}

impl FakeIdentity {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            sign_in_request_count: AtomicUsize::new(0),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in_request_count(&self) -> usize {
        self.sign_in_request_count.load(Ordering::SeqCst)
    }
}

impl SignInPrompt for FakeIdentity {
    fn request_sign_in(&self) {
        self.sign_in_request_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl IdentityProvider for FakeIdentity {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}
