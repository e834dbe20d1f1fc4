use super::query::{first_query_value, split_url};
use std::fmt;
use url::form_urlencoded;

/// A page URL split into the part before the query, the query and the fragment.
///
/// Works on absolute URLs (`https://host/path?q#f`) and on bare path+query
/// strings (`/path?q`) alike, and never re-encodes parts it did not change:
/// `PageUrl::parse(s).to_string() == s` for any input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    base: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl PageUrl {
    pub fn parse(url: &str) -> Self {
        let (base, query, fragment) = split_url(url);
        Self {
            base: base.to_string(),
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
        }
    }

    /// Everything before the `?`: scheme, authority and path.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The raw query string without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The query including its leading `?`, or an empty string.
    pub fn search(&self) -> String {
        self.query
            .as_deref()
            .map(|q| format!("?{q}"))
            .unwrap_or_default()
    }

    /// Returns the decoded value of the first pair whose decoded name is `key`.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query
            .as_deref()
            .and_then(|query| first_query_value(query, key))
    }

    /// Returns a copy with `key` bound to `value`.
    ///
    /// The first pair named `key` has its value replaced in place and later
    /// pairs with that name are dropped; if there is none, the pair is
    /// appended. Every other pair is kept byte-for-byte.
    pub fn with_query_param(&self, key: &str, value: &str) -> Self {
        let binding = format!("{}={}", encode(key), encode(value));
        let mut replaced = false;
        let mut pairs: Vec<String> = Vec::new();

        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            for pair in query.split('&') {
                if pair_name(pair).as_deref() == Some(key) {
                    if !replaced {
                        pairs.push(binding.clone());
                        replaced = true;
                    }
                } else {
                    pairs.push(pair.to_string());
                }
            }
        }
        if !replaced {
            pairs.push(binding);
        }

        Self {
            base: self.base.clone(),
            query: Some(pairs.join("&")),
            fragment: self.fragment.clone(),
        }
    }
}

fn pair_name(pair: &str) -> Option<String> {
    form_urlencoded::parse(pair.as_bytes())
        .next()
        .map(|(name, _)| name.into_owned())
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
