use std::fmt::Debug;

use crate::types::Node;

/// Debug printer.
///
/// `label` names a node's tag for the active strategy.
pub fn print<N, K, F, L>(arena: &[N], node: Option<u32>, tab: &str, key_of: &F, label: &L) -> String
where
    N: Node,
    K: Debug,
    F: Fn(&N) -> &K,
    L: Fn(u8) -> &'static str,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print(arena, n.l(), &format!("{tab}  "), key_of, label);
            let right = print(arena, n.r(), &format!("{tab}  "), key_of, label);
            format!(
                "Node[{i}] {} {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
                label(n.tag()),
                key_of(n),
            )
        }
    }
}
