//! Query templates published on the nanopub query services.
//!
//! Each template is itself a nanopub; its identifier is the artifact code
//! followed by the template's name. Every search comes in two variants, the
//! second restricted to nanopubs that are neither retracted nor superseded.

pub const FIND_NANOPUBS_WITH_TEXT: &str =
    "RAWruhiSmyzgZhVRs8QY8YQPAgHzTfl7anxII1de-yaCs/fulltext-search-on-labels";
pub const FIND_VALID_NANOPUBS_WITH_TEXT: &str =
    "RAMJaSqIk4-qgCud7Kf-ltdE3i8DVP239uQv-BiTGvwUU/fulltext-search-on-labels-all";
pub const FIND_NANOPUBS_WITH_PATTERN: &str =
    "RAuE9jU8LLwco-iJHiNjzQgEHfx5j-XkbzlutT59cQYiU/find_nanopubs_with_pattern";
pub const FIND_VALID_NANOPUBS_WITH_PATTERN: &str =
    "RAIDPTdWRrYy-TOcdEVmGi7JHwn8fBriVphmsCy3mn4r0/find_valid_nanopubs_with_pattern";
pub const FIND_THINGS: &str = "RA99xFu2qrCrpOYc1zc7h0SYV4m6Z4OE530dguEhYeoOM/find-things";
pub const FIND_VALID_THINGS: &str =
    "RARqGauUpDMEA1o4KBSKC8AeP694qJjpbf7x7FOWHDfM8/find-valid-things";

/// Search term matching every thing of a type.
pub const MATCH_ALL: &str = "*:*";

/// The searches the query services expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Search {
    Text,
    Pattern,
    Things,
}

impl Search {
    /// The template identifier, optionally the validated-only variant.
    pub fn template_id(self, validated_only: bool) -> &'static str {
        match (self, validated_only) {
            (Search::Text, false) => FIND_NANOPUBS_WITH_TEXT,
            (Search::Text, true) => FIND_VALID_NANOPUBS_WITH_TEXT,
            (Search::Pattern, false) => FIND_NANOPUBS_WITH_PATTERN,
            (Search::Pattern, true) => FIND_VALID_NANOPUBS_WITH_PATTERN,
            (Search::Things, false) => FIND_THINGS,
            (Search::Things, true) => FIND_VALID_THINGS,
        }
    }
}

/// Options shared by every search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Restrict to nanopubs signed with this public key.
    pub pubkey: Option<String>,
    /// Skip retracted and superseded nanopubs. On by default.
    pub validated_only: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            pubkey: None,
            validated_only: true,
        }
    }
}

impl SearchOptions {
    /// Include retracted and superseded nanopubs.
    pub fn all() -> Self {
        Self {
            pubkey: None,
            validated_only: false,
        }
    }

    pub fn with_pubkey(mut self, pubkey: impl Into<String>) -> Self {
        self.pubkey = Some(pubkey.into());
        self
    }
}

/// A subject/predicate/object pattern; unset positions match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<String>,
}

impl TriplePattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, iri: impl Into<String>) -> Self {
        self.subject = Some(iri.into());
        self
    }

    pub fn predicate(mut self, iri: impl Into<String>) -> Self {
        self.predicate = Some(iri.into());
        self
    }

    pub fn object(mut self, iri: impl Into<String>) -> Self {
        self.object = Some(iri.into());
        self
    }
}

/// Query parameters of a template request.
pub type Params = Vec<(String, String)>;

pub(crate) fn text_params(text: &str, options: &SearchOptions) -> Params {
    let mut params = vec![("query".to_string(), text.to_string())];
    push_pubkey(&mut params, options);
    params
}

pub(crate) fn pattern_params(pattern: &TriplePattern, options: &SearchOptions) -> Params {
    let mut params = Params::new();
    for (name, value) in [
        ("subj", &pattern.subject),
        ("pred", &pattern.predicate),
        ("obj", &pattern.object),
    ] {
        if let Some(value) = value {
            params.push((name.to_string(), value.clone()));
        }
    }
    push_pubkey(&mut params, options);
    params
}

pub(crate) fn things_params(thing_type: &str, term: Option<&str>, options: &SearchOptions) -> Params {
    let mut params = vec![
        ("type".to_string(), thing_type.to_string()),
        ("query".to_string(), term.unwrap_or(MATCH_ALL).to_string()),
    ];
    push_pubkey(&mut params, options);
    params
}

fn push_pubkey(params: &mut Params, options: &SearchOptions) {
    if let Some(pubkey) = &options.pubkey {
        params.push(("pubkey".to_string(), pubkey.clone()));
    }
}

// --- tests -------------------------------------------------------------------
