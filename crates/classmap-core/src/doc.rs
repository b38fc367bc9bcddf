//! Documentation comments attached to objects and members.

/// A single `@name params... value` tag of a documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTag {
    name: String,
    params: Vec<String>,
    value: String,
}

impl DocTag {
    /// Create a tag with positional parameters and a trailing value.
    pub fn new(name: impl Into<String>, params: Vec<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params,
            value: value.into(),
        }
    }

    /// Create a tag that only carries a value, such as `@assoc` or `@important`.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Vec::new(), value)
    }

    /// Tag name without the leading `@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional parameters, e.g. the argument name of `@param`.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Trailing free text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Append text to the value, separated by a space.
    pub fn extend_value(&mut self, more: &str) {
        if more.is_empty() {
            return;
        }
        if !self.value.is_empty() {
            self.value.push(' ');
        }
        self.value.push_str(more);
    }
}

/// Free text plus tags of a documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    text: String,
    tags: Vec<DocTag>,
}

impl DocComment {
    /// Create a comment from its free text and tags.
    pub fn new(text: impl Into<String>, tags: Vec<DocTag>) -> Self {
        Self {
            text: text.into(),
            tags,
        }
    }

    /// Create a comment that has only free text.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// Free text preceding the first tag.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All tags in source order.
    pub fn tags(&self) -> &[DocTag] {
        &self.tags
    }

    /// Returns `true` when the comment has neither text nor tags.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tags.is_empty()
    }

    /// First tag with the given name.
    pub fn tag(&self, name: &str) -> Option<&DocTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    /// Every tag with the given name, in source order.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocTag> {
        self.tags.iter().filter(move |tag| tag.name == name)
    }

    /// Returns `true` if a tag with the given name is present.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }

    /// Add a tag after the existing ones.
    pub fn push_tag(&mut self, tag: DocTag) {
        self.tags.push(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocComment {
        DocComment::new(
            "Computes things.",
            vec![
                DocTag::new("param", vec!["x".to_string()], "the input"),
                DocTag::with_value("assoc", "1 - * B"),
                DocTag::new("param", vec!["y".to_string()], "another"),
            ],
        )
    }

    #[test]
    fn test_tag_lookup() {
        let doc = sample();
        assert!(doc.has_tag("assoc"));
        assert!(!doc.has_tag("noassoc"));
        assert_eq!(doc.tag("assoc").map(DocTag::value), Some("1 - * B"));
        assert_eq!(doc.tag("param").map(|t| t.params()[0].as_str()), Some("x"));
    }

    #[test]
    fn test_tags_named_preserves_order() {
        let doc = sample();
        let params: Vec<&str> = doc
            .tags_named("param")
            .map(|t| t.params()[0].as_str())
            .collect();
        assert_eq!(params, ["x", "y"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(DocComment::default().is_empty());
        assert!(!DocComment::text_only("x").is_empty());

        let mut doc = DocComment::default();
        doc.push_tag(DocTag::with_value("important", ""));
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_extend_value() {
        let mut tag = DocTag::with_value("return", "");
        tag.extend_value("the");
        tag.extend_value("");
        tag.extend_value("result");
        assert_eq!(tag.value(), "the result");
    }
}
