use serde::Serialize;
use std::fmt;

/// One grammar rule alternative: `head → body`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Production {
    head: String,
    body: Vec<String>,
    #[serde(skip)]
    body_key: String,
}

impl Production {
    pub fn new<S: Into<String>>(head: impl Into<String>, body: impl IntoIterator<Item = S>) -> Self {
        let body: Vec<String> = body.into_iter().map(Into::into).collect();
        let body_key = body.join(" ");
        Production {
            head: head.into(),
            body,
            body_key,
        }
    }

    /// Build from a whitespace-separated body, e.g. `("<term>", "<term> * <factor>")`.
    pub fn parse(head: &str, body: &str) -> Self {
        Production::new(head, body.split_whitespace())
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Body symbols joined by single spaces; the key reductions look productions up by.
    pub fn body_key(&self) -> &str {
        &self.body_key
    }

    pub fn first(&self) -> Option<&str> {
        self.body.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.body.last().map(String::as_str)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.head, self.body_key)
    }
}
