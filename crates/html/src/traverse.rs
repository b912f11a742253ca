use crate::Node;

/// Position of a node as child indices from the root.
pub type NodePath = Vec<usize>;

/// Paths of every element matching `pred`, in tree order (pre-order).
pub fn find_all_by(root: &Node, pred: &dyn Fn(&Node) -> bool) -> Vec<NodePath> {
    fn walk(node: &Node, path: &mut NodePath, pred: &dyn Fn(&Node) -> bool, out: &mut Vec<NodePath>) {
        for (i, child) in node.children().iter().enumerate() {
            path.push(i);
            if matches!(child, Node::Element { .. }) && pred(child) {
                out.push(path.clone());
            }
            walk(child, path, pred, out);
            path.pop();
        }
    }

    let mut out = Vec::new();
    walk(root, &mut Vec::new(), pred, &mut out);
    out
}

/// Paths of every element named `tag` (ASCII case-insensitive), in tree order.
pub fn find_all(root: &Node, tag: &str) -> Vec<NodePath> {
    find_all_by(root, &|n: &Node| n.is_element(tag))
}

pub fn node_at<'a>(root: &'a Node, path: &[usize]) -> Option<&'a Node> {
    path.iter()
        .try_fold(root, |node, &i| node.children().get(i))
}

pub fn node_at_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    let mut node = root;
    for &i in path {
        node = node.children_mut()?.get_mut(i)?;
    }
    Some(node)
}

/// First element named `tag` in tree order.
pub fn find_first<'a>(root: &'a Node, tag: &str) -> Option<&'a Node> {
    root.children().iter().find_map(|c| {
        if c.is_element(tag) {
            Some(c)
        } else {
            find_first(c, tag)
        }
    })
}

pub fn find_first_mut<'a>(root: &'a mut Node, tag: &str) -> Option<&'a mut Node> {
    let path = find_all(root, tag).into_iter().next()?;
    node_at_mut(root, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn find_all_is_tree_ordered() {
        let dom = parse_document("<div><wpt>a</wpt><p><wpt>b</wpt></p></div><wpt>c</wpt>");
        let paths = find_all(&dom, "wpt");
        assert_eq!(paths, vec![vec![0, 0], vec![0, 1, 0], vec![1]]);
        let texts: Vec<String> = paths
            .iter()
            .filter_map(|p| node_at(&dom, p))
            .map(Node::text_content)
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn node_at_mut_reaches_nested_nodes() {
        let mut dom = parse_document("<div><span>x</span></div>");
        let span = node_at_mut(&mut dom, &[0, 0]).expect("span exists");
        span.set_attr("class", Some("hit".into()));
        assert_eq!(find_first(&dom, "span").and_then(|n| n.attr("class")), Some("hit"));
        assert!(node_at(&dom, &[0, 5]).is_none());
    }
}
