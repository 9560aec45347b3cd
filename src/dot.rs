use std::fmt::{Display, Write};

use crate::node::{Color, NodeRef};

/// Render the tree rooted at `root` as a Graphviz digraph.
///
/// Absent children are drawn as invisible points so left and right children
/// keep their side when only one is present.
pub(crate) fn print_dot<'a, K, N>(root: Option<N>) -> String
where
    K: Display + 'a,
    N: NodeRef<'a, K>,
{
    let mut buf = String::new();
    write_dot(root, &mut buf).expect("writing to a String cannot fail");
    buf
}

fn write_dot<'a, K, N, W>(root: Option<N>, buf: &mut W) -> std::fmt::Result
where
    K: Display + 'a,
    N: NodeRef<'a, K>,
    W: Write,
{
    writeln!(buf, "digraph {{")?;
    writeln!(
        buf,
        r#"node [shape = circle; style = filled; fillcolor = "gray60";];"#
    )?;
    let Some(root) = root else {
        return writeln!(buf, "}}");
    };

    // Keys may repeat, so nodes are identified by a counter and labelled with
    // their key. The walk keeps its own stack so degenerate trees of any
    // height can be printed.
    let mut next_id = 1;
    let mut stack = vec![(root, 0)];
    while let Some((n, id)) = stack.pop() {
        write_node(n, id, buf)?;

        let mut children = Vec::with_capacity(2);
        for (side, v) in [("l", n.left()), ("r", n.right())] {
            match v {
                Some(v) => {
                    writeln!(buf, "n{id} -> n{next_id};")?;
                    children.push((v, next_id));
                    next_id += 1;
                }
                None => {
                    writeln!(buf, "null_{side}{id} [shape=point,style=invis];")?;
                    writeln!(buf, "n{id} -> null_{side}{id} [style=invis];")?;
                }
            };
        }

        // Visit the left child first.
        stack.extend(children.into_iter().rev());
    }

    writeln!(buf, "}}")
}

fn write_node<'a, K, N, W>(n: N, id: usize, buf: &mut W) -> std::fmt::Result
where
    K: Display + 'a,
    N: NodeRef<'a, K>,
    W: Write,
{
    let key = n.key();
    match n.color() {
        Some(Color::Red) => writeln!(
            buf,
            r#"n{id} [label="{key}"; fillcolor = "red"; fontcolor = "white";];"#
        ),
        Some(Color::Black) => writeln!(
            buf,
            r#"n{id} [label="{key}"; fillcolor = "black"; fontcolor = "white";];"#
        ),
        None => writeln!(buf, r#"n{id} [label="{key}";];"#),
    }
}
