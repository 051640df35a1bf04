pub const POST_ROUTE_PREFIX: &str = "/post";
pub const POST_ROUTE_PARAM_NAME: &str = "post_id";

/// Returns the path of the page displaying the post `post_id` and its comments
pub fn get_post_path(post_id: i64) -> String {
    format!("{POST_ROUTE_PREFIX}/{post_id}")
}
