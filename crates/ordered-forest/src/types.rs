//! Node hook and trait definitions.
//!
//! Nodes live in a caller-owned arena (`Vec<N>` or any slice). Every
//! "pointer" is an `Option<u32>` index into that arena, and all tree
//! functions take the arena explicitly. The core never allocates, moves or
//! drops nodes; it only rewrites their hooks.

/// Per-node tree metadata: parent/left/right links and a 2-bit strategy tag.
///
/// The tag is interpreted by the active balancing strategy (colour for
/// red-black, lean for AVL, rank shape for weak-AVL). It is only meaningful
/// while the node is linked into a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hook {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub tag: u8,
}

impl Hook {
    pub const fn new() -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            tag: 0,
        }
    }

    /// Whether any link is set.
    pub fn is_linked(&self) -> bool {
        self.p.is_some() || self.l.is_some() || self.r.is_some()
    }
}

/// A record that embeds a [`Hook`] and can therefore be linked into a tree.
pub trait Node {
    fn hook(&self) -> &Hook;
    fn hook_mut(&mut self) -> &mut Hook;

    fn p(&self) -> Option<u32> {
        self.hook().p
    }

    fn l(&self) -> Option<u32> {
        self.hook().l
    }

    fn r(&self) -> Option<u32> {
        self.hook().r
    }

    fn tag(&self) -> u8 {
        self.hook().tag
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.hook_mut().p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.hook_mut().l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.hook_mut().r = v;
    }

    fn set_tag(&mut self, tag: u8) {
        self.hook_mut().tag = tag;
    }
}

impl Node for Hook {
    fn hook(&self) -> &Hook {
        self
    }

    fn hook_mut(&mut self) -> &mut Hook {
        self
    }
}

/// Three-way comparator: negative, zero or positive.
pub type Comparator<K> = dyn Fn(&K, &K) -> i32;

/// Natural order of `K`. Incomparable values (e.g. NaN) compare as equal.
pub fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a < b {
        -1
    } else if a > b {
        1
    } else {
        0
    }
}

/// Ready-made key/value node.
#[derive(Clone, Debug)]
pub struct TreeNode<K, V> {
    pub hook: Hook,
    pub k: K,
    pub v: V,
}

impl<K, V> TreeNode<K, V> {
    pub fn new(k: K, v: V) -> Self {
        Self {
            hook: Hook::new(),
            k,
            v,
        }
    }

    /// Key extractor usable as a tree's `key_of`.
    pub fn key(&self) -> &K {
        &self.k
    }
}

impl<K, V> Node for TreeNode<K, V> {
    fn hook(&self) -> &Hook {
        &self.hook
    }

    fn hook_mut(&mut self) -> &mut Hook {
        &mut self.hook
    }
}
