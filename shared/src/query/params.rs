//! Query parameter expansion.
//!
//! Expands the raw key/value pairs of a query string into a mapping from
//! parameter name to an ordered list of string tokens, so that array-like
//! parameters may be written either way:
//!
//! ```text
//! /v1/co2/weekly?year=2020,2021&year=2022
//! ```
//!
//! expands the `year` tokens to `["2020", "2021", "2022"]`.

use std::collections::BTreeMap;

/// Expands every value by splitting on commas and merges repeated keys,
/// preserving the arrival order of the flattened token list per key.
///
/// Keys are lowercased. No validation happens here; tokens are handed on
/// verbatim. A `BTreeMap` keeps later iteration deterministic.
#[must_use]
pub fn expand_params(pairs: &[(String, String)]) -> BTreeMap<String, Vec<String>> {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in pairs {
        let tokens = params.entry(key.to_lowercase()).or_default();
        for token in value.split(',') {
            tokens.push(token.to_string());
        }
    }
    params
}
