//! Reference documentation lookup and XML doc-comment extraction.
//!
//! Symbols from referenced assemblies carry no inline documentation, only a stable
//! documentation-comment id (`M:System.Console.WriteLine(System.String)`). Those ids are resolved
//! against a bundled dictionary that is decoded once per process, on first use.

use crate::error::DocsError;
use crate::symbol::Symbol;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

const BUNDLED_JSON: &str = include_str!("../resources/reference_docs.json");

/// A read-only `documentation id -> XML` dictionary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ReferenceDocs {
    entries: HashMap<String, String>,
}

impl ReferenceDocs {
    /// Decode a dictionary from a JSON object of id to XML strings.
    pub fn from_json(json: &str) -> Result<Self, DocsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The dictionary bundled with the crate, decoded on first use.
    pub fn bundled() -> &'static ReferenceDocs {
        static BUNDLED: OnceLock<ReferenceDocs> = OnceLock::new();
        BUNDLED.get_or_init(|| match Self::from_json(BUNDLED_JSON) {
            Ok(docs) => {
                log::debug!("loaded {} reference documentation entries", docs.len());
                docs
            }
            Err(err) => {
                log::warn!("bundled reference documentation unusable: {err}");
                Self::default()
            }
        })
    }

    /// XML for a documentation id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// XML documentation for `symbol`: inline when present, otherwise looked up by its
/// documentation id.
pub fn documentation_xml<'a>(symbol: &'a Symbol, docs: &'a ReferenceDocs) -> Option<&'a str> {
    symbol
        .documentation_xml
        .as_deref()
        .filter(|xml| !xml.trim().is_empty())
        .or_else(|| docs.get(symbol.documentation_id.as_deref()?))
}

/// Plain-text content of an XML doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// `<summary>` text.
    pub summary: Option<String>,
    /// `<param>` texts in document order.
    pub params: Vec<(String, String)>,
    /// `<returns>` text.
    pub returns: Option<String>,
}

impl DocComment {
    /// Extract summary, parameter and return texts from `xml`.
    ///
    /// Inline `<see cref>` references become the simple referenced name, `<paramref>` becomes
    /// the parameter name, other markup is dropped and whitespace is collapsed.
    pub fn parse(xml: &str) -> Self {
        let Some(patterns) = DocPatterns::get() else {
            return Self::default();
        };
        let section = |re: &Regex| {
            re.captures(xml)
                .map(|caps| patterns.plain_text(&caps[1]))
                .filter(|text| !text.is_empty())
        };
        Self {
            summary: section(&patterns.summary),
            params: patterns
                .param
                .captures_iter(xml)
                .map(|caps| (caps[1].to_string(), patterns.plain_text(&caps[2])))
                .collect(),
            returns: section(&patterns.returns),
        }
    }

    /// Text for a named parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, text)| text.as_str())
    }
}

struct DocPatterns {
    summary: Regex,
    param: Regex,
    returns: Regex,
    reference: Regex,
    name_ref: Regex,
    tag: Regex,
    space: Regex,
}

impl DocPatterns {
    fn get() -> Option<&'static DocPatterns> {
        static PATTERNS: OnceLock<Option<DocPatterns>> = OnceLock::new();
        PATTERNS.get_or_init(Self::compile).as_ref()
    }

    fn compile() -> Option<Self> {
        Some(Self {
            summary: Regex::new(r"(?s)<summary>(.*?)</summary>").ok()?,
            param: Regex::new(r#"(?s)<param\s+name="([^"]*)"\s*>(.*?)</param>"#).ok()?,
            returns: Regex::new(r"(?s)<returns>(.*?)</returns>").ok()?,
            reference: Regex::new(r#"<see(?:also)?\s+(cref|langword)="([^"]*)"\s*/>"#).ok()?,
            name_ref: Regex::new(r#"<(?:type)?paramref\s+name="([^"]*)"\s*/>"#).ok()?,
            tag: Regex::new(r"<[^>]*>").ok()?,
            space: Regex::new(r"\s+").ok()?,
        })
    }

    fn plain_text(&self, fragment: &str) -> String {
        let text = self.reference.replace_all(fragment, |caps: &Captures| {
            if &caps[1] == "cref" {
                cref_name(&caps[2]).to_string()
            } else {
                caps[2].to_string()
            }
        });
        let text = self.name_ref.replace_all(&text, "$1");
        let text = self.tag.replace_all(&text, "");
        let text = self.space.replace_all(&text, " ");
        decode_entities(text.trim())
    }
}

/// `T:System.Collections.Generic.List`1` -> `List`.
fn cref_name(cref: &str) -> &str {
    let id = cref.split_once(':').map_or(cref, |(_, id)| id);
    let id = id.split('(').next().unwrap_or(id);
    let name = id.rsplit('.').next().unwrap_or(id);
    name.split('`').next().unwrap_or(name)
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
