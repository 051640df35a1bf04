use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

use agora_auth::user::{SessionUser, User};
use agora_utils::errors::AppError;

use crate::comment::{CommentRecord, NewComment};
use crate::config::DataServiceConfig;
use crate::constants::COMMENTS_TABLE;

pub const API_KEY_HEADER: &str = "apikey";
pub const PREFER_HEADER: &str = "Prefer";

/// Query and mutation surface of the comments of a post
#[async_trait(?Send)]
pub trait CommentService: Send + Sync {
    /// Returns all comments of the post `post_id`, from the oldest to the most recent
    async fn fetch_comments(&self, post_id: i64) -> Result<Vec<CommentRecord>, AppError>;
    async fn insert_comment(&self, new_comment: NewComment) -> Result<(), AppError>;
}

/// [`CommentService`] backed by the REST API of the data service
pub struct RestCommentService {
    client: Client,
    config: DataServiceConfig,
    access_token: RwLock<Option<String>>,
}

impl RestCommentService {
    pub fn new(config: DataServiceConfig) -> Self {
        RestCommentService {
            client: Client::new(),
            config,
            access_token: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &DataServiceConfig {
        &self.config
    }

    /// Sets the token of the viewer's session, requests are sent anonymously when it is `None`
    pub fn set_access_token(&self, access_token: Option<String>) {
        *self.access_token.write() = access_token;
    }

    pub fn get_comments_url(&self, post_id: i64) -> Result<Url, AppError> {
        let mut comments_url = self.config.rest_url(COMMENTS_TABLE)?;
        comments_url.query_pairs_mut()
            .append_pair("post_id", &format!("eq.{post_id}"))
            .append_pair("order", "created_at.asc")
            .append_pair("select", "*");
        Ok(comments_url)
    }

    fn authorize(&self, request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(self.config.api_key());
        request
            .header(API_KEY_HEADER, self.config.api_key())
            .bearer_auth(bearer)
    }

    fn authorize_session(&self, request: RequestBuilder) -> RequestBuilder {
        let access_token = self.access_token.read().clone();
        self.authorize(request, access_token.as_deref())
    }

    /// Returns the identity behind `access_token`
    pub async fn fetch_current_user(&self, access_token: &str) -> Result<User, AppError> {
        let request = self.client.get(self.config.auth_url("user")?);
        let response = check_response(self.authorize(request, Some(access_token)).send().await?).await?;
        let session_user = response.json::<SessionUser>().await?;
        Ok(User::from(session_user))
    }

    /// Ends the session of `access_token` on the data service
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let request = self.client.post(self.config.auth_url("logout")?);
        check_response(self.authorize(request, Some(access_token)).send().await?).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl CommentService for RestCommentService {
    async fn fetch_comments(&self, post_id: i64) -> Result<Vec<CommentRecord>, AppError> {
        log::debug!("Fetch comments of post {post_id}.");
        let request = self.client.get(self.get_comments_url(post_id)?);
        let response = check_response(self.authorize_session(request).send().await?).await?;
        let comment_vec = response.json::<Vec<CommentRecord>>().await?;
        log::debug!("Fetched {} comments of post {post_id}.", comment_vec.len());
        Ok(comment_vec)
    }

    async fn insert_comment(&self, new_comment: NewComment) -> Result<(), AppError> {
        let request = self.client
            .post(self.config.rest_url(COMMENTS_TABLE)?)
            .header(PREFER_HEADER, "return=minimal")
            .json(&new_comment);
        check_response(self.authorize_session(request).send().await?).await?;
        Ok(())
    }
}

/// Converts non-success responses into [`AppError::DataServiceError`]
async fn check_response(response: Response) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    log::warn!("Data service responded with {status}: {message}");
    Err(AppError::DataServiceError {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use crate::config::DataServiceConfig;
    use crate::service::RestCommentService;

    #[test]
    fn test_get_comments_url() {
        let config = DataServiceConfig::new("https://project.example.com", "key").expect("Should create config.");
        let service = RestCommentService::new(config);
        assert_eq!(
            service.get_comments_url(12).expect("Should get comments url.").as_str(),
            "https://project.example.com/rest/v1/comments?post_id=eq.12&order=created_at.asc&select=*"
        );
    }

    #[test]
    fn test_set_access_token() {
        let config = DataServiceConfig::new("https://project.example.com", "key").expect("Should create config.");
        let service = RestCommentService::new(config);
        assert_eq!(*service.access_token.read(), None);
        service.set_access_token(Some(String::from("token")));
        assert_eq!(service.access_token.read().as_deref(), Some("token"));
        service.set_access_token(None);
        assert_eq!(*service.access_token.read(), None);
    }
}
