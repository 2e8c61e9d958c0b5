use std::fmt::{self, Display};

/// Read-only view of a binary tree node, enough to dump the tree shape.
pub(crate) trait RenderNode {
    type Key: Display;

    fn key(&self) -> &Self::Key;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;

    /// Extra number printed after the key, e.g. the cached height.
    fn annotation(&self) -> Option<usize> {
        None
    }
}

/// Pre-order dump, one node per line:
///
/// ```text
/// 4 (3)
///  L: 2 (2)
///   L: 1 (1)
///   R: 3 (1)
///  R: 5 (1)
/// ```
pub(crate) fn render<N: RenderNode>(root: Option<&N>) -> String {
    TreeDump(root).to_string()
}

struct TreeDump<'a, N>(Option<&'a N>);

impl<N: RenderNode> fmt::Display for TreeDump<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Explicit stack: an unbalanced tree can be as deep as it is long.
        let mut stack: Vec<(&N, usize, &str)> =
            self.0.map(|root| (root, 0, "")).into_iter().collect();
        while let Some((node, depth, label)) = stack.pop() {
            write_line(f, node, depth, label)?;
            if let Some(right) = node.right() {
                stack.push((right, depth + 1, "R: "));
            }
            if let Some(left) = node.left() {
                stack.push((left, depth + 1, "L: "));
            }
        }
        Ok(())
    }
}

fn write_line<N: RenderNode>(
    f: &mut fmt::Formatter<'_>,
    node: &N,
    depth: usize,
    label: &str,
) -> fmt::Result {
    write!(f, "{:depth$}{label}{}", "", node.key())?;
    match node.annotation() {
        Some(extra) => writeln!(f, " ({extra})"),
        None => writeln!(f),
    }
}
