//! Box-drawing helper for multi-line binary tree dumps.

/// Renders one child subtree given the indentation prefix for its lines.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Renders the left and right subtree of a node on the lines below it.
///
/// The left branch continues with a `│` rail so that the right branch, drawn
/// last, stays attached to the parent.
pub fn print_children(tab: &str, left: &PrintChild<'_>, right: &PrintChild<'_>) -> String {
    let left = left(&format!("{tab}│  "));
    let right = right(&format!("{tab}   "));
    format!("\n{tab}├─ {left}\n{tab}└─ {right}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_render_on_two_branches() {
        let left = |_: &str| "a".to_string();
        let right = |_: &str| "b".to_string();
        assert_eq!(print_children("..", &left, &right), "\n..├─ a\n..└─ b");
    }

    #[test]
    fn nested_children_receive_rail_prefix() {
        let leaf_l = |_: &str| "l".to_string();
        let leaf_r = |_: &str| "r".to_string();
        let left = |tab: &str| format!("x{}", print_children(tab, &leaf_l, &leaf_r));
        let right = |_: &str| "∅".to_string();
        assert_eq!(
            print_children("", &left, &right),
            "\n├─ x\n│  ├─ l\n│  └─ r\n└─ ∅"
        );
    }
}
