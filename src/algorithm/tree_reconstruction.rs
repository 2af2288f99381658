//! Rebuilding a binary tree from its inorder and preorder traversals.
//!
//! This stands apart from the graph structure on purpose: it shares no
//! state with [`crate::graph::Graph`], it is a divide-and-conquer exercise
//! over two value sequences.

use ahash::RandomState;
use std::collections::{HashMap, VecDeque};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i32,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The values in level order, for inspecting a reconstructed tree.
    pub fn level_order(&self) -> Vec<i32> {
        let mut values = Vec::new();
        let mut queue = VecDeque::from(vec![self]);
        while let Some(node) = queue.pop_front() {
            values.push(node.value);
            if let Some(left) = node.left.as_deref() {
                queue.push_back(left);
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back(right);
            }
        }
        values
    }
}

/// Rebuilds the tree the two traversals came from.
///
/// The first preorder value is the root; its position in the inorder
/// sequence splits that sequence into the left and right subtrees, and the
/// same split carves up the rest of the preorder sequence. An index map
/// over the inorder values keeps each split O(1).
///
/// Returns `None` for empty or length-mismatched inputs. The traversals
/// are trusted to describe one tree; values must be unique.
pub fn from_inorder_preorder(inorder: &[i32], preorder: &[i32]) -> Option<Box<TreeNode>> {
    if inorder.is_empty() || inorder.len() != preorder.len() {
        return None;
    }
    let positions: HashMap<i32, usize, RandomState> = inorder
        .iter()
        .enumerate()
        .map(|(idx, value)| (*value, idx))
        .collect();
    build(preorder, &positions, 0..preorder.len(), 0..inorder.len())
}

fn build(
    preorder: &[i32],
    positions: &HashMap<i32, usize, RandomState>,
    pre: Range<usize>,
    ino: Range<usize>,
) -> Option<Box<TreeNode>> {
    if pre.is_empty() {
        return None;
    }
    let value = preorder[pre.start];
    let split = *positions.get(&value)?;
    if !ino.contains(&split) {
        return None;
    }
    let left_size = split - ino.start;
    let left = build(
        preorder,
        positions,
        pre.start + 1..pre.start + 1 + left_size,
        ino.start..split,
    );
    let right = build(
        preorder,
        positions,
        pre.start + 1 + left_size..pre.end,
        split + 1..ino.end,
    );
    Some(Box::new(TreeNode { value, left, right }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: i32, left: Option<Box<TreeNode>>, right: Option<Box<TreeNode>>) -> Box<TreeNode> {
        Box::new(TreeNode { value, left, right })
    }

    fn leaf(value: i32) -> Box<TreeNode> {
        Box::new(TreeNode::new(value))
    }

    #[test]
    fn rebuilds_the_reference_tree() {
        let root = from_inorder_preorder(&[4, 2, 5, 1, 3], &[1, 2, 4, 5, 3]).unwrap();
        assert_eq!(root.level_order(), vec![1, 2, 3, 4, 5]);
        let expected = node(1, Some(node(2, Some(leaf(4)), Some(leaf(5)))), Some(leaf(3)));
        assert_eq!(root, expected);
    }

    #[test]
    fn handles_skewed_trees() {
        let left_skewed = from_inorder_preorder(&[3, 2, 1], &[1, 2, 3]).unwrap();
        assert_eq!(
            left_skewed,
            node(1, Some(node(2, Some(leaf(3)), None)), None)
        );

        let right_skewed = from_inorder_preorder(&[1, 2, 3], &[1, 2, 3]).unwrap();
        assert_eq!(
            right_skewed,
            node(1, None, Some(node(2, None, Some(leaf(3)))))
        );
    }

    #[test]
    fn single_value_is_a_leaf() {
        let root = from_inorder_preorder(&[7], &[7]).unwrap();
        assert_eq!(*root, TreeNode::new(7));
    }

    #[test]
    fn degenerate_inputs_yield_no_tree() {
        assert_eq!(from_inorder_preorder(&[], &[]), None);
        assert_eq!(from_inorder_preorder(&[1], &[]), None);
        assert_eq!(from_inorder_preorder(&[1, 2], &[1]), None);
    }

    #[test]
    fn traversals_of_the_result_round_trip() {
        let inorder = [8, 4, 9, 2, 5, 1, 6, 3, 7];
        let preorder = [1, 2, 4, 8, 9, 5, 3, 6, 7];
        let root = from_inorder_preorder(&inorder, &preorder).unwrap();

        fn walk_inorder(node: &TreeNode, out: &mut Vec<i32>) {
            if let Some(left) = node.left.as_deref() {
                walk_inorder(left, out);
            }
            out.push(node.value);
            if let Some(right) = node.right.as_deref() {
                walk_inorder(right, out);
            }
        }
        fn walk_preorder(node: &TreeNode, out: &mut Vec<i32>) {
            out.push(node.value);
            if let Some(left) = node.left.as_deref() {
                walk_preorder(left, out);
            }
            if let Some(right) = node.right.as_deref() {
                walk_preorder(right, out);
            }
        }

        let mut seen_inorder = Vec::new();
        walk_inorder(&root, &mut seen_inorder);
        assert_eq!(seen_inorder, inorder.to_vec());

        let mut seen_preorder = Vec::new();
        walk_preorder(&root, &mut seen_preorder);
        assert_eq!(seen_preorder, preorder.to_vec());
    }
}
