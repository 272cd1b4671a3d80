//! Tree rendering functionality for debugging and visualization.
//!
//! Trees may be infinite in both directions, so every renderer takes a depth
//! limit and shows at most [`MAX_RENDERED_CHILDREN`] children per node.

use super::Tree;

/// Children shown per node before the rest are elided.
pub const MAX_RENDERED_CHILDREN: usize = 16;

impl<T> Tree<T>
where
    T: std::fmt::Display + 'static,
{
    /// Render the tree structure as a string for debugging.
    pub fn render(&self, max_depth: usize) -> String {
        let mut result = String::new();
        self.render_recursive(&mut result, "", true, max_depth);
        result
    }

    fn render_recursive(&self, result: &mut String, prefix: &str, is_last: bool, depth: usize) {
        result.push_str(prefix);
        if is_last {
            result.push_str("└── ");
        } else {
            result.push_str("├── ");
        }
        result.push_str(&format!("{}\n", self.value));

        if depth == 0 {
            return;
        }

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let mut children = self.children().peekable();
        let mut shown = 0;
        while let Some(child) = children.next() {
            if shown == MAX_RENDERED_CHILDREN {
                result.push_str(&format!("{child_prefix}└── …\n"));
                break;
            }
            shown += 1;
            let child_is_last = children.peek().is_none();
            child.render_recursive(result, &child_prefix, child_is_last, depth - 1);
        }
    }

    /// Render the tree structure compactly, showing only values.
    pub fn render_compact(&self, max_depth: usize) -> String {
        if max_depth == 0 {
            return format!("{}", self.value);
        }

        let mut children = self.children();
        let mut rendered: Vec<String> = children
            .by_ref()
            .take(MAX_RENDERED_CHILDREN)
            .map(|child| child.render_compact(max_depth - 1))
            .collect();
        if children.next().is_some() {
            rendered.push("…".to_string());
        }

        if rendered.is_empty() {
            format!("{}", self.value)
        } else {
            format!("{}[{}]", self.value, rendered.join(", "))
        }
    }
}
