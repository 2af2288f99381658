/// Identifier of a vertex.
///
/// Vertices are named by arbitrary strings (whatever token the edge-list
/// format carried). `Ord` is the lexicographic byte order of the identifier;
/// that order is the fixed tie-break used wherever a deterministic choice
/// between vertices is needed (canonical edge orientation, cursor snapshots,
/// Kruskal's edge sort).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex(String);

impl Vertex {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Vertex {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for Vertex {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::borrow::Borrow<str> for Vertex {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ord_is_lexicographic() {
        let mut v = vec![Vertex::from("b"), Vertex::from("a"), Vertex::from("ab")];
        v.sort();
        assert_eq!(v, vec![Vertex::from("a"), Vertex::from("ab"), Vertex::from("b")]);
    }

    #[test]
    fn borrows_as_str() {
        use std::collections::BTreeSet;
        let mut s = BTreeSet::new();
        s.insert(Vertex::from("x"));
        assert!(s.contains("x"));
    }
}
