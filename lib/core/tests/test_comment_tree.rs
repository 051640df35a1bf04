use agora_core::comment::{build_comment_forest, count_comments, find_comment};

pub use crate::utils::*;

mod utils;

#[test]
fn test_build_comment_forest_nested_replies() {
    let comment_vec = vec![
        create_test_comment(1, None),
        create_test_comment(2, Some(1)),
        create_test_comment(3, Some(1)),
        create_test_comment(4, Some(2)),
    ];

    let comment_forest = build_comment_forest(comment_vec, None);

    assert_eq!(
        get_forest_shape(&comment_forest),
        vec![TreeShape(1, vec![TreeShape(2, vec![TreeShape(4, vec![])]), TreeShape(3, vec![])])]
    );
    let node_2 = find_comment(&comment_forest, 2).expect("Comment 2 should be in the forest.");
    assert_eq!(node_2.child_comments.len(), 1);
    let node_3 = find_comment(&comment_forest, 3).expect("Comment 3 should be in the forest.");
    assert!(!node_3.has_children());
    assert_eq!(comment_forest[0].descendant_count(), 3);
}

#[test]
fn test_build_comment_forest_drops_orphans() {
    let comment_forest = build_comment_forest(vec![create_test_comment(1, Some(99))], None);
    assert!(comment_forest.is_empty());

    // replies of an orphan are unreachable as well
    let comment_vec = vec![
        create_test_comment(1, None),
        create_test_comment(2, Some(99)),
        create_test_comment(3, Some(2)),
        create_test_comment(4, Some(1)),
    ];
    let comment_forest = build_comment_forest(comment_vec, None);
    assert_eq!(get_forest_shape(&comment_forest), vec![TreeShape(1, vec![TreeShape(4, vec![])])]);
}

#[test]
fn test_build_comment_forest_duplicate_ids() {
    let mut updated_comment = create_test_comment(5, None);
    updated_comment.body = String::from("last version");
    let comment_vec = vec![
        create_test_comment(5, None),
        create_test_comment(6, None),
        updated_comment,
        create_test_comment(7, Some(5)),
    ];

    let comment_forest = build_comment_forest(comment_vec, None);

    assert_eq!(count_comments(&comment_forest), 3);
    assert_eq!(
        get_forest_shape(&comment_forest),
        vec![TreeShape(5, vec![TreeShape(7, vec![])]), TreeShape(6, vec![])]
    );
    assert_eq!(comment_forest[0].comment.body, "last version");
}

/// Parent of the comments generated for the completeness test: every tenth comment is an orphan
fn get_generated_parent_id(comment_id: i64) -> Option<i64> {
    match comment_id % 10 {
        0 => Some(1000 + comment_id),
        1 => None,
        _ => Some(comment_id / 2),
    }
}

fn is_generated_comment_reachable(comment_id: i64) -> bool {
    let mut current_id = comment_id;
    loop {
        match get_generated_parent_id(current_id) {
            None => return true,
            Some(parent_id) if parent_id > 1000 => return false,
            Some(parent_id) => current_id = parent_id,
        }
    }
}

#[test]
fn test_build_comment_forest_completeness() {
    let comment_vec: Vec<_> = (1..=200)
        .map(|comment_id| create_test_comment(comment_id, get_generated_parent_id(comment_id)))
        .collect();
    let input_count = comment_vec.len();
    let unreachable_count = (1..=200).filter(|comment_id| !is_generated_comment_reachable(*comment_id)).count();
    assert!(unreachable_count > 0);

    let comment_forest = build_comment_forest(comment_vec, None);

    assert_eq!(count_comments(&comment_forest), input_count - unreachable_count);
    for comment_id in 1..=200 {
        assert_eq!(
            find_comment(&comment_forest, comment_id).is_some(),
            is_generated_comment_reachable(comment_id),
            "Unexpected presence of comment {comment_id}"
        );
    }
    assert!(comment_forest.iter().all(|node| node.comment.parent_id.is_none()));
}

#[test]
fn test_build_comment_forest_preserves_order() {
    let comment_vec = vec![
        create_test_comment(10, None),
        create_test_comment(4, Some(10)),
        create_test_comment(2, None),
        create_test_comment(8, Some(10)),
        create_test_comment(1, Some(10)),
        create_test_comment(3, Some(2)),
    ];

    let comment_forest = build_comment_forest(comment_vec, None);

    let root_ids: Vec<i64> = comment_forest.iter().map(|node| node.comment_id()).collect();
    assert_eq!(root_ids, vec![10, 2]);
    let child_ids: Vec<i64> = comment_forest[0].child_comments.iter().map(|node| node.comment_id()).collect();
    assert_eq!(child_ids, vec![4, 8, 1]);
}

#[test]
fn test_build_comment_forest_idempotence() {
    let comment_vec: Vec<_> = (1..=50)
        .map(|comment_id| create_test_comment(comment_id, (comment_id > 5).then_some(comment_id % 7 + 1)))
        .collect();

    let first_forest = build_comment_forest(comment_vec.clone(), None);
    let second_forest = build_comment_forest(comment_vec, None);

    assert_eq!(get_forest_shape(&first_forest), get_forest_shape(&second_forest));
    assert_eq!(first_forest, second_forest);
}

#[test]
fn test_build_comment_forest_drops_cycles() {
    let comment_vec = vec![
        create_test_comment(1, None),
        create_test_comment(2, Some(3)),
        create_test_comment(3, Some(4)),
        create_test_comment(4, Some(2)),
        create_test_comment(5, Some(1)),
        create_test_comment(6, Some(6)),
    ];

    let comment_forest = build_comment_forest(comment_vec, None);

    assert_eq!(get_forest_shape(&comment_forest), vec![TreeShape(1, vec![TreeShape(5, vec![])])]);
}

#[test]
fn test_build_comment_forest_viewer_context() {
    let viewer = create_test_user();
    let comment_vec = vec![
        create_test_comment(1, None),
        create_test_comment(2, Some(1)),
        create_test_comment(4, Some(1)),
    ];

    let comment_forest = build_comment_forest(comment_vec.clone(), Some(&viewer));

    let own_node = find_comment(&comment_forest, 1).expect("Comment 1 should be in the forest.");
    assert!(own_node.is_own);
    assert_eq!(own_node.comment.avatar_url, viewer.avatar_url);
    let other_node = find_comment(&comment_forest, 2).expect("Comment 2 should be in the forest.");
    assert!(!other_node.is_own);
    assert_eq!(other_node.comment.avatar_url, None);
    assert!(comment_forest.iter().all(|node| node.like_count == 0 && !node.is_edited));

    let anonymous_forest = build_comment_forest(comment_vec, None);
    assert_eq!(get_forest_shape(&anonymous_forest), get_forest_shape(&comment_forest));
    assert!(!anonymous_forest[0].is_own);
}

#[test]
fn test_build_comment_forest_deep_chain() {
    let depth = 50_000;
    let comment_vec: Vec<_> = (1..=depth)
        .map(|comment_id| create_test_comment(comment_id, (comment_id > 1).then(|| comment_id - 1)))
        .collect();

    let comment_forest = build_comment_forest(comment_vec, None);

    assert_eq!(comment_forest.len(), 1);
    assert_eq!(count_comments(&comment_forest), depth as usize);
    assert!(find_comment(&comment_forest, depth).is_some_and(|node| !node.has_children()));
}

#[test]
fn test_build_comment_forest_empty() {
    assert!(build_comment_forest(Vec::new(), None).is_empty());
}
