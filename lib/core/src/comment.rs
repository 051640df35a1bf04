use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use agora_auth::user::User;

use crate::constants::COMMENT_ANCHOR_PREFIX;

/// Comment as stored by the data service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(rename = "id")]
    pub comment_id: i64,
    pub post_id: i64,
    #[serde(rename = "parent_comment_id")]
    pub parent_id: Option<i64>,
    #[serde(rename = "content")]
    pub body: String,
    #[serde(rename = "user_id")]
    pub author_id: String,
    #[serde(rename = "author")]
    pub author_name: String,
    #[serde(rename = "created_at")]
    pub create_timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Comment to insert in the data service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: i64,
    pub parent_comment_id: Option<i64>,
    #[serde(rename = "content")]
    pub body: String,
    #[serde(rename = "user_id")]
    pub author_id: String,
    #[serde(rename = "author")]
    pub author_name: String,
}

/// Comment with its direct replies, in the order in which they were received
#[derive(Debug, PartialEq, Eq)]
pub struct CommentNode {
    pub comment: CommentRecord,
    pub child_comments: Vec<CommentNode>,
    pub like_count: i32,
    pub is_edited: bool,
    pub is_own: bool,
}

impl CommentNode {
    pub fn new(comment: CommentRecord, viewer: Option<&User>) -> Self {
        let is_own = viewer.is_some_and(|viewer| viewer.user_id == comment.author_id);
        let mut comment = comment;
        if comment.avatar_url.is_none() && is_own {
            comment.avatar_url = viewer.and_then(|viewer| viewer.avatar_url.clone());
        }
        CommentNode {
            comment,
            child_comments: Vec::new(),
            like_count: 0,
            is_edited: false,
            is_own,
        }
    }

    pub fn comment_id(&self) -> i64 {
        self.comment.comment_id
    }

    pub fn has_children(&self) -> bool {
        !self.child_comments.is_empty()
    }

    /// Number of comments in the sub-tree below this node
    pub fn descendant_count(&self) -> usize {
        count_comments(&self.child_comments)
    }
}

impl Clone for CommentNode {
    fn clone(&self) -> Self {
        CommentNode {
            comment: self.comment.clone(),
            child_comments: clone_comment_forest(&self.child_comments),
            like_count: self.like_count,
            is_edited: self.is_edited,
            is_own: self.is_own,
        }
    }
}

impl Drop for CommentNode {
    // unlinks descendants one level at a time, the default recursive drop overflows the stack on very deep threads
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.child_comments);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.child_comments);
        }
    }
}

/// Clones `comment_forest` without recursion, replies are cloned before their parent
fn clone_comment_forest(comment_forest: &[CommentNode]) -> Vec<CommentNode> {
    let mut stack: Vec<(&CommentNode, bool)> = comment_forest.iter().rev().map(|node| (node, false)).collect();
    let mut cloned_nodes = Vec::<CommentNode>::new();
    while let Some((node, is_visited)) = stack.pop() {
        if is_visited {
            let child_comments = cloned_nodes.split_off(cloned_nodes.len() - node.child_comments.len());
            cloned_nodes.push(CommentNode {
                comment: node.comment.clone(),
                child_comments,
                like_count: node.like_count,
                is_edited: node.is_edited,
                is_own: node.is_own,
            });
        } else {
            stack.push((node, true));
            stack.extend(node.child_comments.iter().rev().map(|child| (child, false)));
        }
    }
    cloned_nodes
}

/// Id of the html element used as anchor of a comment's thread lines
pub fn get_comment_anchor_id(comment_id: i64) -> String {
    format!("{COMMENT_ANCHOR_PREFIX}{comment_id}")
}

/// Stable sort of comments from the oldest to the most recent
pub fn sort_by_create_timestamp(comment_vec: &mut [CommentRecord]) {
    comment_vec.sort_by_key(|comment| comment.create_timestamp);
}

/// Builds the comment forest of a post from its flat list of comments.
///
/// Every comment is attached to its parent, in the order of `comment_vec`. Comments without parent are roots.
/// Comments that cannot be reached from a root are dropped: comments whose parent is absent from
/// `comment_vec`, their replies, and comments whose chain of parents loops.
/// When several comments share the same id, the last one replaces the others at the position of the first.
pub fn build_comment_forest(
    comment_vec: Vec<CommentRecord>,
    viewer: Option<&User>,
) -> Vec<CommentNode> {
    let input_count = comment_vec.len();
    let mut index_by_id = HashMap::<i64, usize>::with_capacity(input_count);
    let mut node_slots = Vec::<Option<CommentNode>>::with_capacity(input_count);

    for comment in comment_vec {
        let node = CommentNode::new(comment, viewer);
        match index_by_id.get(&node.comment_id()) {
            Some(&index) => node_slots[index] = Some(node),
            None => {
                index_by_id.insert(node.comment_id(), node_slots.len());
                node_slots.push(Some(node));
            }
        }
    }

    let mut child_index_vec = vec![Vec::<usize>::new(); node_slots.len()];
    let mut root_index_vec = Vec::new();
    for (index, node) in node_slots.iter().enumerate() {
        let parent_id = node.as_ref().and_then(|node| node.comment.parent_id);
        match parent_id {
            Some(parent_id) => if let Some(&parent_index) = index_by_id.get(&parent_id) {
                child_index_vec[parent_index].push(index);
            },
            None => root_index_vec.push(index),
        }
    }

    // post-order walk from the roots, so that children are complete before being moved into their parent
    let mut post_order = Vec::with_capacity(node_slots.len());
    let mut stack: Vec<(usize, bool)> = root_index_vec.iter().rev().map(|index| (*index, false)).collect();
    while let Some((index, is_visited)) = stack.pop() {
        if is_visited {
            post_order.push(index);
        } else {
            stack.push((index, true));
            stack.extend(child_index_vec[index].iter().rev().map(|child_index| (*child_index, false)));
        }
    }

    for index in post_order {
        let child_comments: Vec<CommentNode> = child_index_vec[index]
            .iter()
            .filter_map(|child_index| node_slots[*child_index].take())
            .collect();
        if let Some(node) = node_slots[index].as_mut() {
            node.child_comments = child_comments;
        }
    }

    let comment_forest: Vec<CommentNode> = root_index_vec
        .iter()
        .filter_map(|index| node_slots[*index].take())
        .collect();

    let unreachable_count = node_slots.iter().filter(|node| node.is_some()).count();
    if unreachable_count > 0 {
        log::debug!("Dropped {unreachable_count} unreachable comments out of {input_count}.");
    }

    comment_forest
}

/// Total number of comments in `comment_forest`
pub fn count_comments(comment_forest: &[CommentNode]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&CommentNode> = comment_forest.iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.child_comments.iter());
    }
    count
}

/// Finds the comment `comment_id` in `comment_forest`
pub fn find_comment(
    comment_forest: &[CommentNode],
    comment_id: i64,
) -> Option<&CommentNode> {
    let mut stack: Vec<&CommentNode> = comment_forest.iter().collect();
    while let Some(node) = stack.pop() {
        if node.comment_id() == comment_id {
            return Some(node);
        }
        stack.extend(node.child_comments.iter());
    }
    None
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use agora_auth::user::User;

    use crate::comment::{build_comment_forest, get_comment_anchor_id, sort_by_create_timestamp, CommentNode, CommentRecord};

    fn create_comment(comment_id: i64, parent_id: Option<i64>, author_id: &str) -> CommentRecord {
        CommentRecord {
            comment_id,
            post_id: 1,
            parent_id,
            body: format!("comment {comment_id}"),
            author_id: String::from(author_id),
            author_name: String::from(author_id),
            create_timestamp: Utc.timestamp_opt(1_700_000_000 + comment_id, 0).unwrap(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_comment_record_deserialization() {
        let comment: CommentRecord = serde_json::from_str(
            r#"{
                "id": 4,
                "post_id": 2,
                "parent_comment_id": 1,
                "content": "hello",
                "user_id": "u1",
                "created_at": "2024-06-01T12:00:00.123456+00:00",
                "author": "jane",
                "avatar_url": null
            }"#
        ).expect("Should deserialize comment.");
        assert_eq!(comment.comment_id, 4);
        assert_eq!(comment.parent_id, Some(1));
        assert_eq!(comment.body, "hello");
        assert_eq!(comment.author_name, "jane");
        assert_eq!(comment.avatar_url, None);

        let root_comment: CommentRecord = serde_json::from_str(
            r#"{ "id": 1, "post_id": 2, "parent_comment_id": null, "content": "root", "user_id": "u1", "created_at": "2024-06-01T12:00:00Z", "author": "jane" }"#
        ).expect("Should deserialize comment without avatar.");
        assert_eq!(root_comment.parent_id, None);
    }

    #[test]
    fn test_comment_record_missing_field() {
        let result = serde_json::from_str::<CommentRecord>(
            r#"{ "id": 1, "post_id": 2, "parent_comment_id": null, "user_id": "u1", "created_at": "2024-06-01T12:00:00Z", "author": "jane" }"#
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_comment_node_new() {
        let viewer = User {
            user_id: String::from("u1"),
            username: String::from("jane"),
            avatar_url: Some(String::from("jane.png")),
        };
        let own_node = CommentNode::new(create_comment(1, None, "u1"), Some(&viewer));
        assert!(own_node.is_own);
        assert_eq!(own_node.comment.avatar_url, Some(String::from("jane.png")));
        assert_eq!(own_node.like_count, 0);
        assert!(!own_node.is_edited);
        assert!(own_node.child_comments.is_empty());

        let other_node = CommentNode::new(create_comment(2, None, "u2"), Some(&viewer));
        assert!(!other_node.is_own);
        assert_eq!(other_node.comment.avatar_url, None);

        let mut comment_with_avatar = create_comment(3, None, "u1");
        comment_with_avatar.avatar_url = Some(String::from("own.png"));
        let node = CommentNode::new(comment_with_avatar, Some(&viewer));
        assert_eq!(node.comment.avatar_url, Some(String::from("own.png")));

        let anonymous_node = CommentNode::new(create_comment(4, None, "u1"), None);
        assert!(!anonymous_node.is_own);
    }

    #[test]
    fn test_sort_by_create_timestamp() {
        let mut comment_vec = vec![create_comment(3, None, "a"), create_comment(1, None, "a"), create_comment(2, None, "a")];
        let mut tied_comment = create_comment(4, None, "a");
        tied_comment.create_timestamp = comment_vec[1].create_timestamp;
        comment_vec.push(tied_comment);
        sort_by_create_timestamp(&mut comment_vec);
        let ids: Vec<i64> = comment_vec.iter().map(|comment| comment.comment_id).collect();
        assert_eq!(ids, vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_build_comment_forest_self_parent() {
        let forest = build_comment_forest(vec![create_comment(5, Some(5), "a"), create_comment(6, None, "a")], None);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].comment_id(), 6);
        assert!(forest[0].child_comments.is_empty());
    }

    #[test]
    fn test_deep_thread_drop() {
        let depth = 100_000;
        let comment_vec = (1..=depth).map(|id| create_comment(id, if id == 1 { None } else { Some(id - 1) }, "a")).collect();
        let forest = build_comment_forest(comment_vec, None);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].descendant_count(), (depth - 1) as usize);
        let cloned_forest = forest.clone();
        assert_eq!(cloned_forest[0].descendant_count(), (depth - 1) as usize);
        drop(forest);
        drop(cloned_forest);
    }

    #[test]
    fn test_clone_keeps_reply_order() {
        let forest = build_comment_forest(
            vec![
                create_comment(1, None, "a"),
                create_comment(2, Some(1), "a"),
                create_comment(3, Some(2), "a"),
                create_comment(4, Some(1), "a"),
                create_comment(5, None, "a"),
            ],
            None,
        );
        let cloned_forest = forest.clone();
        assert_eq!(cloned_forest, forest);
        let child_ids: Vec<i64> = cloned_forest[0].child_comments.iter().map(|node| node.comment_id()).collect();
        assert_eq!(child_ids, vec![2, 4]);
        assert_eq!(cloned_forest[0].child_comments[0].child_comments[0].comment_id(), 3);
    }

    #[test]
    fn test_get_comment_anchor_id() {
        assert_eq!(get_comment_anchor_id(42), "avatar-42");
    }
}
