//! Post entity: one pre-written social media post

use serde::{Deserialize, Serialize};

use crate::value_objects::PostId;

/// Separator placed between the post text and its url when posting
pub const POSTING_SEPARATOR: &str = "\n";

/// A single social media post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    title: String,
    url: String,
    #[serde(default)]
    text: String,
}

impl Post {
    /// Create a post with an already allocated id
    pub fn new(
        id: PostId,
        title: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            text: text.into(),
        }
    }

    /// Get post ID
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Name of the post, not part of the posted text
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Url appended to the posted text
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Body of the post
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text that actually gets posted, with the url at the end
    pub fn text_for_posting(&self) -> String {
        format!("{}{}{}", self.text, POSTING_SEPARATOR, self.url)
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_for_posting_appends_url() {
        let post = Post::new(PostId::new(0), "Title", "https://example.com", "Hello");
        assert_eq!(post.text_for_posting(), "Hello\nhttps://example.com");
    }

    #[test]
    fn test_text_for_posting_empty_text() {
        let post = Post::new(PostId::new(0), "Title", "https://example.com", "");
        assert_eq!(post.text_for_posting(), "\nhttps://example.com");
    }
}
