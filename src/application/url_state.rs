//! Mapping between listing filter state and the query string.
//!
//! Parsing is lenient: unknown categories or sort orders fall back to their
//! defaults so any shared link still renders a listing. Serialisation emits
//! only non-default parameters, in the fixed order `category`, `tags`, `q`,
//! `sort`.

use std::collections::BTreeSet;

use url::form_urlencoded;

use crate::{
    application::listing::filter_posts,
    domain::{
        categories::Category,
        filter::{FilterAction, FilterState, SortOrder, reduce},
        posts::Post,
    },
};

pub const LISTING_PATH: &str = "/blog";

/// Read a `FilterState` from a raw query string (with or without the leading
/// `?`). Absent parameters take their defaults.
pub fn parse_query(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::default();
    let mut seen = BTreeSet::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        // First occurrence wins for repeated keys.
        if !seen.insert(key.clone().into_owned()) {
            continue;
        }
        match key.as_ref() {
            "category" => state.category = value.parse::<Category>().unwrap_or_default(),
            "tags" => {
                state.tags = value
                    .split(',')
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "q" => state.query = value.into_owned(),
            "sort" => state.sort = value.parse::<SortOrder>().unwrap_or_default(),
            _ => {}
        }
    }

    state
}

/// Encode the non-default parts of `state`. The default state encodes to an
/// empty string.
pub fn serialize_query(state: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !state.category.is_all() {
        serializer.append_pair("category", state.category.as_str());
    }
    if !state.tags.is_empty() {
        let joined = state
            .tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        serializer.append_pair("tags", &joined);
    }
    if !state.query.is_empty() {
        serializer.append_pair("q", &state.query);
    }
    if state.sort != SortOrder::default() {
        serializer.append_pair("sort", state.sort.as_str());
    }

    serializer.finish()
}

/// Listing URL for an encoded query: `/blog` when empty, `/blog?{query}`
/// otherwise.
pub fn listing_url(query: &str) -> String {
    if query.is_empty() {
        LISTING_PATH.to_string()
    } else {
        format!("{LISTING_PATH}?{query}")
    }
}

/// Receiver for canonical query strings. Replacing the query must not
/// navigate or reload anything.
pub trait QuerySink {
    fn replace_query(&mut self, query: &str);
}

/// Sink that remembers every replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    history: Vec<String>,
}

impl RecordingSink {
    pub fn latest(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl QuerySink for RecordingSink {
    fn replace_query(&mut self, query: &str) {
        self.history.push(query.to_string());
    }
}

/// One listing session: the published posts, the current filter state and
/// the sink mirroring that state into the URL.
#[derive(Debug)]
pub struct BlogSession<S: QuerySink> {
    posts: Vec<Post>,
    state: FilterState,
    sink: S,
}

impl<S: QuerySink> BlogSession<S> {
    /// Start a session from the initial state and normalise the URL once.
    pub fn mount(posts: Vec<Post>, state: FilterState, mut sink: S) -> Self {
        sink.replace_query(&serialize_query(&state));
        Self { posts, state, sink }
    }

    /// Fold `action` into the state. The sink is called only when the state
    /// actually changed.
    pub fn dispatch(&mut self, action: FilterAction) -> &FilterState {
        let next = reduce(&self.state, action);
        if next != self.state {
            self.state = next;
            self.sink.replace_query(&serialize_query(&self.state));
        }
        &self.state
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Posts visible under the current state.
    pub fn visible(&self) -> Vec<Post> {
        filter_posts(&self.posts, &self.state)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
