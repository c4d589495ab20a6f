//! Docker-style image reference parsing
//!
//! Handles the reference forms a status request may carry:
//! - `busybox` → `docker.io/library/busybox:latest`
//! - `quay.io/org/app:v1` → `quay.io/org/app:v1`
//! - `app@sha256:<hex>` → digest reference
//!
//! Bare hex strings are image IDs (or truncated IDs), not references; see
//! [`is_image_id_prefix`].

use crate::error::{Result, StatusError};
use std::fmt;

pub const DEFAULT_TAG: &str = "latest";
pub const DOCKER_HUB: &str = "docker.io";
const OFFICIAL_REPO_PREFIX: &str = "library";
const ID_LEN: usize = 64;
const MAX_TAG_LEN: usize = 128;

/// Tag or digest part of a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Tag(String),
    Digest(String),
}

/// A parsed image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Registry domain, `None` when the name was unqualified
    pub domain: Option<String>,
    /// Repository path, e.g. `library/busybox`
    pub path: String,
    pub identifier: Identifier,
}

impl Reference {
    /// Parse a reference, defaulting the tag to `latest`.
    ///
    /// Fails with [`StatusError::CannotParseImageId`] when the input does not
    /// follow the reference grammar.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || StatusError::CannotParseImageId(input.to_string());

        if input.is_empty() || input.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        if is_full_id(input) {
            // Docker forbids a 64-byte hex string as repository name
            return Err(invalid());
        }

        let (name, digest) = match input.split_once('@') {
            Some((name, digest)) => {
                if !is_valid_digest(digest) {
                    return Err(invalid());
                }
                (name, Some(digest))
            }
            None => (input, None),
        };

        // A ':' after the last '/' separates the tag
        let (name, tag) = match name.rfind(':') {
            Some(pos) if !name[pos..].contains('/') => (&name[..pos], Some(&name[pos + 1..])),
            _ => (name, None),
        };
        if let Some(tag) = tag {
            if !is_valid_tag(tag) {
                return Err(invalid());
            }
        }

        let (domain, path) = match name.split_once('/') {
            Some((first, rest)) if is_domain(first) => (Some(first.to_string()), rest),
            _ => (None, name),
        };
        if path.is_empty() || !path.split('/').all(is_valid_path_component) {
            return Err(invalid());
        }

        let identifier = match (digest, tag) {
            (Some(digest), _) => Identifier::Digest(digest.to_string()),
            (None, Some(tag)) => Identifier::Tag(tag.to_string()),
            (None, None) => Identifier::Tag(DEFAULT_TAG.to_string()),
        };

        Ok(Self {
            domain,
            path: path.to_string(),
            identifier,
        })
    }

    pub fn is_qualified(&self) -> bool {
        self.domain.is_some()
    }

    /// Qualify an unqualified reference with `registry`.
    ///
    /// Single-component Docker Hub names gain the `library/` namespace.
    pub fn qualify(&self, registry: &str) -> Self {
        if self.domain.is_some() {
            return self.clone();
        }
        let path = if registry == DOCKER_HUB && !self.path.contains('/') {
            format!("{}/{}", OFFICIAL_REPO_PREFIX, self.path)
        } else {
            self.path.clone()
        };
        Self {
            domain: Some(registry.to_string()),
            path,
            identifier: self.identifier.clone(),
        }
    }

    /// `domain/path` without tag or digest
    pub fn name(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{}/{}", domain, self.path),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        match &self.identifier {
            Identifier::Tag(t) => write!(f, ":{}", t),
            Identifier::Digest(d) => write!(f, "@{}", d),
        }
    }
}

/// Whether `name` could be an image ID or a truncated one.
pub fn is_image_id_prefix(name: &str, min_len: usize) -> bool {
    (min_len..=ID_LEN).contains(&name.len()) && name.chars().all(is_lower_hex)
}

pub fn is_full_id(name: &str) -> bool {
    name.len() == ID_LEN && name.chars().all(is_lower_hex)
}

fn is_lower_hex(c: char) -> bool {
    c.is_ascii_digit() || ('a'..='f').contains(&c)
}

fn is_domain(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}

fn is_valid_digest(digest: &str) -> bool {
    match digest.split_once(':') {
        Some(("sha256", hex)) => is_full_id(hex),
        Some((algo, hex)) => {
            !algo.is_empty()
                && algo.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "+._-".contains(c))
                && hex.len() >= 32
                && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => {}
        _ => return false,
    }
    tag.len() <= MAX_TAG_LEN && chars.all(|c| c.is_ascii_alphanumeric() || "_.-".contains(c))
}

/// Lowercase alphanumerics joined by `.`, `_`, `__` or runs of `-`
fn is_valid_path_component(component: &str) -> bool {
    let bytes = component.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let alnum = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !alnum(bytes[0]) || !alnum(bytes[bytes.len() - 1]) {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        if alnum(bytes[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && !alnum(bytes[i]) {
            i += 1;
        }
        let sep = &component[start..i];
        let ok = sep == "." || sep == "_" || sep == "__" || sep.bytes().all(|b| b == b'-');
        if !ok {
            return false;
        }
    }
    true
}
