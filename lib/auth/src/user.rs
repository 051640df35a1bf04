use serde::{Deserialize, Serialize};

/// Identity of the authenticated viewer
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub user_name: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// User as returned by the identity provider's session endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl From<SessionUser> for User {
    fn from(session_user: SessionUser) -> Self {
        let username = session_user.user_metadata.user_name
            .or(session_user.user_metadata.full_name)
            .or(session_user.email)
            .unwrap_or_else(|| session_user.id.clone());
        User {
            user_id: session_user.id,
            username,
            avatar_url: session_user.user_metadata.avatar_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::user::{SessionUser, User};

    #[test]
    fn test_user_from_session_user() {
        let session_user: SessionUser = serde_json::from_str(
            r#"{
                "id": "a1b2",
                "email": "jane@example.com",
                "user_metadata": { "user_name": "jane", "avatar_url": "https://img/jane.png" }
            }"#
        ).expect("Should parse session user.");
        assert_eq!(
            User::from(session_user),
            User {
                user_id: String::from("a1b2"),
                username: String::from("jane"),
                avatar_url: Some(String::from("https://img/jane.png")),
            }
        );
    }

    #[test]
    fn test_user_from_session_user_username_fallback() {
        let session_user: SessionUser = serde_json::from_str(
            r#"{ "id": "a1b2", "email": "jane@example.com" }"#
        ).expect("Should parse session user without metadata.");
        let user = User::from(session_user);
        assert_eq!(user.username, "jane@example.com");
        assert_eq!(user.avatar_url, None);

        let session_user: SessionUser = serde_json::from_str(r#"{ "id": "a1b2", "user_metadata": {} }"#)
            .expect("Should parse session user with empty metadata.");
        assert_eq!(User::from(session_user).username, "a1b2");
    }
}
