use std::fmt::Display;

use serde::Serialize;

use crate::node::{Color, NodeRef};

/// A renderer-neutral description of a tree (or subtree) shape.
///
/// Empty subtrees are omitted, so a node has zero, one or two children, the
/// left child preceding the right when both are present. Serialises as
/// `{"name": "...", "color": "RED" | "BLACK" | null, "children": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutNode {
    /// The rendered key.
    #[serde(rename = "name")]
    pub label: String,

    /// The node colour, for variants that track one.
    pub color: Option<Color>,

    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub(crate) fn build<'a, K, N>(root: N) -> Self
    where
        K: Display + 'a,
        N: NodeRef<'a, K>,
    {
        // Flatten the tree in pre-order, recording the index of each node's
        // parent.
        let mut flat: Vec<(Option<usize>, Self)> = Vec::new();
        let mut stack = vec![(None, root)];
        while let Some((parent, n)) = stack.pop() {
            let idx = flat.len();
            let node = Self {
                label: n.key().to_string(),
                color: n.color(),
                children: Vec::new(),
            };
            flat.push((parent, node));

            // Push the right child first so the left subtree is visited
            // first.
            stack.extend(n.right().map(|v| (Some(idx), v)));
            stack.extend(n.left().map(|v| (Some(idx), v)));
        }

        // Every node follows its ancestors in pre-order, so attaching nodes
        // in reverse completes each subtree before it is moved into its
        // parent. Right siblings come off first.
        while let Some((parent, node)) = flat.pop() {
            match parent {
                Some(p) => flat[p].1.children.insert(0, node),
                None => return node,
            }
        }

        unreachable!("the root is always flattened first")
    }

    /// Visit this node and all its descendants in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let v = stack.pop()?;
            // Push in reverse so the left child is visited first.
            stack.extend(v.children.iter().rev());
            Some(v)
        })
    }

    /// The number of nodes in this subtree.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    /// Serialise the layout to the JSON shape consumed by renderers.
    ///
    /// The output matches the [`Serialize`] impl, but is written without
    /// recursing so it copes with a degenerate tree of any height.
    pub fn to_json(&self) -> serde_json::Result<String> {
        enum Step<'a> {
            Node(&'a LayoutNode),
            Comma,
            Close,
        }

        let mut buf = String::new();
        let mut stack = vec![Step::Node(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Node(n) => {
                    buf.push_str(r#"{"name":"#);
                    buf.push_str(&serde_json::to_string(&n.label)?);
                    buf.push_str(r#","color":"#);
                    buf.push_str(&serde_json::to_string(&n.color)?);
                    buf.push_str(r#","children":["#);

                    stack.push(Step::Close);
                    for (i, child) in n.children.iter().enumerate().rev() {
                        stack.push(Step::Node(child));
                        if i > 0 {
                            stack.push(Step::Comma);
                        }
                    }
                }
                Step::Comma => buf.push(','),
                Step::Close => buf.push_str("]}"),
            }
        }

        Ok(buf)
    }
}

impl Drop for LayoutNode {
    fn drop(&mut self) {
        // Drop descendants from a flat list rather than recursing per level.
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut n) = stack.pop() {
            stack.append(&mut n.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{AvlTree, BinaryTree, RedBlackTree, Tree};

    use super::*;

    #[test]
    fn test_layout_omits_empty_children() {
        //
        //      5
        //       \
        //        7
        //       /
        //      6
        //
        let mut t = BinaryTree::default();
        for v in [5, 7, 6] {
            t.insert(v);
        }

        let got = t.layout().unwrap();
        let want = LayoutNode {
            label: "5".to_string(),
            color: None,
            children: vec![LayoutNode {
                label: "7".to_string(),
                color: None,
                children: vec![LayoutNode {
                    label: "6".to_string(),
                    color: None,
                    children: vec![],
                }],
            }],
        };
        assert_eq!(got, want);
        assert_eq!(got.size(), 3);
    }

    #[test]
    fn test_children_ordered_left_first() {
        let mut t = AvlTree::default();
        for v in [2, 1, 3] {
            t.insert(v);
        }

        let got = t.layout().unwrap();
        let labels = got.iter().map(|v| v.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["2", "1", "3"]);
    }

    #[test]
    fn test_red_black_json() {
        let mut t = RedBlackTree::default();
        for v in [10, 20, 30] {
            t.insert(v);
        }

        let got: serde_json::Value =
            serde_json::from_str(&t.layout().unwrap().to_json().unwrap()).unwrap();

        assert_eq!(
            got,
            json!({
                "name": "20",
                "color": "BLACK",
                "children": [
                    { "name": "10", "color": "RED", "children": [] },
                    { "name": "30", "color": "RED", "children": [] },
                ]
            })
        );
    }

    #[test]
    fn test_uncoloured_json() {
        let mut t = BinaryTree::default();
        t.insert(1);

        let got = serde_json::to_value(t.layout().unwrap()).unwrap();
        assert_eq!(got, json!({ "name": "1", "color": null, "children": [] }));
    }

    #[test]
    fn test_to_json_matches_serialize() {
        let mut t = RedBlackTree::default();
        for v in [5, -3, 8, 1, 12, 7, 7] {
            t.insert(v);
        }

        let layout = t.layout().unwrap();
        assert_eq!(
            layout.to_json().unwrap(),
            serde_json::to_string(&layout).unwrap()
        );
    }

    #[test]
    fn test_deep_layout() {
        const N: usize = 20_000;

        let leaf = |v: usize| LayoutNode {
            label: v.to_string(),
            color: None,
            children: vec![],
        };

        // A chain of single children, as an unbalanced tree of sorted keys
        // produces.
        let mut root = leaf(0);
        let mut tail = &mut root;
        for v in 1..N {
            tail.children.push(leaf(v));
            tail = &mut tail.children[0];
        }

        assert_eq!(root.size(), N);
        assert_eq!(root.iter().last().unwrap().label, (N - 1).to_string());

        let json = root.to_json().unwrap();
        assert_eq!(json.matches(r#""name""#).count(), N);
    }
}
