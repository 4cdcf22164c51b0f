use std::{collections::BTreeMap, fmt};

///
/// err
/// Push a formatted message onto an `ErrorTree`.
///

#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {
        $errs.add(format!($($arg)*))
    };
}

///
/// ErrorTree
///
/// Aggregates validation messages, optionally keyed by a route such as a
/// field name, so one pass can report every problem in a signature.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, message: impl fmt::Display) {
        self.messages.push(message.to_string());
    }

    pub fn add_for(&mut self, route: impl Into<String>, message: impl fmt::Display) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    /// Attach a child tree under `route`, skipping it when empty.
    pub fn merge_for(&mut self, route: impl Into<String>, tree: Self) {
        if tree.is_empty() {
            return;
        }

        let child = self.children.entry(route.into()).or_default();
        child.messages.extend(tree.messages);
        for (key, grandchild) in tree.children {
            child.merge_for(key, grandchild);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `(route, message)` pairs; routes are joined with `.`.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into(String::new(), &mut out);

        out
    }

    fn flatten_into(&self, prefix: String, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((prefix.clone(), message.clone()));
        }

        for (key, child) in &self.children {
            let route = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            child.flatten_into(route, out);
        }
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .flatten()
            .into_iter()
            .map(|(route, message)| {
                if route.is_empty() {
                    message
                } else {
                    format!("{route}: {message}")
                }
            })
            .collect::<Vec<_>>();

        write!(f, "{}", lines.join("\n"))
    }
}

impl std::error::Error for ErrorTree {}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_is_ok() {
        assert!(ErrorTree::new().result().is_ok());
    }

    #[test]
    fn routes_are_rendered_and_counted() {
        let mut errs = ErrorTree::new();
        err!(errs, "top level {}", 1);
        errs.add_for("name", "is empty");

        let mut nested = ErrorTree::new();
        nested.add_for("inner", "bad");
        errs.merge_for("field", nested);
        errs.merge_for("skipped", ErrorTree::new());

        assert_eq!(errs.len(), 3);
        let rendered = errs.to_string();
        assert!(rendered.contains("top level 1"), "got: {rendered}");
        assert!(rendered.contains("name: is empty"), "got: {rendered}");
        assert!(rendered.contains("field.inner: bad"), "got: {rendered}");
        assert!(!rendered.contains("skipped"), "got: {rendered}");
    }
}
