use thiserror::Error;

use crate::secret::SecretString;

/// One `[column; row]` token, split into its two sub-patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCoordSpec {
    pub col: SecretString,
    pub row: SecretString,
}

/// Parsed search path: context tokens, table coordinates, optional target.
///
/// Token roles come from shape and position. A token of the form
/// `[col; row]` is a coordinate; every plain token before the first
/// coordinate belongs to the context path; the single plain token after the
/// coordinates is the target. Without coordinates the last plain token is
/// the target and the rest form the context path. Coordinates are stored
/// outermost first, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WPath {
    path_tokens: Vec<SecretString>,
    coord_specs: Vec<TableCoordSpec>,
    target: Option<SecretString>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WPathError {
    #[error("malformed table coordinate '{0}': expected [column; row]")]
    MalformedCoordinate(SecretString),
    #[error("unexpected token '{0}' after the target")]
    TokenAfterTarget(SecretString),
}

impl WPath {
    pub fn parse(tokens: &[SecretString]) -> Result<Self, WPathError> {
        let mut path_tokens: Vec<SecretString> = Vec::new();
        let mut coord_specs: Vec<TableCoordSpec> = Vec::new();
        let mut target: Option<SecretString> = None;
        for token in tokens {
            if target.is_some() {
                return Err(WPathError::TokenAfterTarget(token.clone()));
            }
            if looks_like_coordinate(token) {
                coord_specs.push(split_coordinate(token)?);
            } else if coord_specs.is_empty() {
                path_tokens.push(token.clone());
            } else {
                target = Some(token.clone());
            }
        }
        if coord_specs.is_empty() {
            target = path_tokens.pop();
        }
        Ok(Self { path_tokens, coord_specs, target })
    }

    pub fn path_tokens(&self) -> &[SecretString] {
        &self.path_tokens
    }

    pub fn coord_specs(&self) -> &[TableCoordSpec] {
        &self.coord_specs
    }

    pub fn target(&self) -> Option<&SecretString> {
        self.target.as_ref()
    }

    pub fn has_coords(&self) -> bool {
        !self.coord_specs.is_empty()
    }

    /// True when the path carries no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.path_tokens.is_empty() && self.coord_specs.is_empty() && self.target.is_none()
    }
}

fn looks_like_coordinate(token: &SecretString) -> bool {
    let t = token.as_str().trim();
    t.len() >= 2 && t.starts_with('[') && t.ends_with(']')
}

fn split_coordinate(token: &SecretString) -> Result<TableCoordSpec, WPathError> {
    let inner = token
        .as_str()
        .trim()
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| WPathError::MalformedCoordinate(token.clone()))?;
    let parts: Vec<&str> = inner.split(';').collect();
    if parts.len() != 2 {
        return Err(WPathError::MalformedCoordinate(token.clone()));
    }
    let wrap = |text: &str| {
        if token.is_secret() {
            SecretString::secret(text.trim())
        } else {
            SecretString::new(text.trim())
        }
    };
    Ok(TableCoordSpec { col: wrap(parts[0]), row: wrap(parts[1]) })
}
