// Dogstatsd - A DogStatsD client for Rust!
//
// Copyright 2015-2021 Nick Pillitteri
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Merging of the client's namespace and global tags with call-site values.

// Separator callers conventionally end a namespace with
const NAMESPACE_SEPARATOR: char = '.';

/// Prepend the namespace to a metric name or event title.
///
/// No separator is inserted, the namespace is expected to already end with
/// one if one is wanted (`"my.app."`).
pub(crate) fn compose_name(namespace: &str, name: &str) -> String {
    let mut out = String::with_capacity(namespace.len() + name.len());
    out.push_str(namespace);
    out.push_str(name);
    out
}

/// Call-site tags followed by global tags, in order, duplicates kept.
pub(crate) fn compose_tags<'a, C, G>(call: &'a [C], global: &'a [G]) -> Vec<&'a str>
where
    C: AsRef<str>,
    G: AsRef<str>,
{
    let mut out = Vec::with_capacity(call.len() + global.len());
    out.extend(call.iter().map(AsRef::as_ref));
    out.extend(global.iter().map(AsRef::as_ref));
    out
}

/// The namespace with a single trailing separator removed, if any.
pub(crate) fn trim_namespace(namespace: &str) -> &str {
    namespace.strip_suffix(NAMESPACE_SEPARATOR).unwrap_or(namespace)
}
