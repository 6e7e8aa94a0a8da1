//! Query-string shapes for each view, extracted with
//! [`axum_extra::extract::Query`].
//!
//! Repeated keys (`class=x&class=y`, `nodes=...`) land in `Vec` fields. Keys
//! whose empty value means something different from absence (`node`, `gene`)
//! are `Vec` too; callers read the first element.

use std::str::FromStr;

use serde::Deserialize;

/// Network view and `/api/graph`: sidebar form plus node selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NetworkQuery {
    pub size: Option<String>,
    pub font_size: Option<String>,
    pub width: Option<String>,
    pub bg: Option<String>,
    #[serde(default)]
    pub class: Vec<String>,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub info: Vec<String>,
    #[serde(default)]
    pub apply: Vec<String>,
}

impl NetworkQuery {
    /// The sidebar form was submitted, so unchecked boxes mean "cleared".
    pub fn submitted(&self) -> bool {
        !self.apply.is_empty()
    }

    /// Checkbox semantics: present and not `0`/`false`/`off`.
    pub fn info_checked(&self) -> bool {
        self.info
            .first()
            .is_some_and(|v| !matches!(v.as_str(), "0" | "false" | "off"))
    }
}

/// Detail view and the `/api/locus` lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NodeQuery {
    #[serde(default)]
    pub node: Vec<String>,
}

/// Genome-browser view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenomeQuery {
    #[serde(default)]
    pub node: Vec<String>,
    #[serde(default)]
    pub gene: Vec<String>,
    pub locus: Option<String>,
    pub height: Option<String>,
}

/// Lenient number field: blank or unparseable counts as absent.
pub fn number<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
pub(crate) fn from_query<T: serde::de::DeserializeOwned>(raw: &str) -> T {
    let uri: axum::http::Uri = format!("/?{raw}").parse().unwrap();
    axum_extra::extract::Query::<T>::try_from_uri(&uri).unwrap().0
}
