//! Path templates such as `/projects/:projectName/documents`
//!
//! A template is a sequence of literal segments and `:name` parameters. It
//! matches a concrete path segment by segment and formats parameters back
//! into a path.

use crate::error::{RoutingError, RoutingResult};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Parsed path template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parse a template
    ///
    /// # Errors
    /// - `RoutingError::InvalidTemplate` if the template does not start with
    ///   `/`, has an empty segment, an unnamed parameter, or a parameter name
    ///   used twice
    pub fn parse(template: &str) -> RoutingResult<Self> {
        let Some(rest) = template.strip_prefix('/') else {
            return Err(RoutingError::invalid_template(template, "must start with '/'"));
        };

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('/') {
                let segment = match part.strip_prefix(':') {
                    _ if part.is_empty() => {
                        return Err(RoutingError::invalid_template(template, "empty segment"));
                    }
                    Some("") => {
                        return Err(RoutingError::invalid_template(template, "unnamed parameter"));
                    }
                    Some(name) => {
                        let taken = segments
                            .iter()
                            .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                        if taken {
                            return Err(RoutingError::invalid_template(
                                template,
                                format!("duplicate parameter '{name}'"),
                            ));
                        }
                        Segment::Param(name.to_string())
                    }
                    None => Segment::Literal(part.to_string()),
                };
                segments.push(segment);
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// Template as written
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parameter names in order of appearance
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template declares parameter `name`
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.params().any(|p| p == name)
    }

    /// Match a concrete path, extracting parameter values
    ///
    /// A single trailing `/` on the path is ignored. Parameters never match
    /// an empty segment.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let rest = path.strip_prefix('/')?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let parts: Vec<&str> = if rest.is_empty() {
            Vec::new()
        } else {
            rest.split('/').collect()
        };
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(name) if !part.is_empty() => params.insert(name.clone(), part),
                Segment::Literal(_) | Segment::Param(_) => return None,
            }
        }
        Some(params)
    }

    /// Build a concrete path from parameter values
    ///
    /// # Errors
    /// - `RoutingError::MissingParam` if a template parameter has no value
    /// - `RoutingError::InvalidParamValue` if a value is empty or contains `/`
    pub fn format(&self, params: &RouteParams) -> RoutingResult<String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| RoutingError::MissingParam(name.clone()))?;
                    if value.is_empty() || value.contains('/') {
                        return Err(RoutingError::InvalidParamValue {
                            name: name.clone(),
                            value: value.to_string(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }
        Ok(path)
    }
}

impl FromStr for PathTemplate {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parameter values extracted from, or used to build, a path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    /// No parameters
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// With a value
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Value of parameter `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of parameter `name`, or an error naming it
    ///
    /// # Errors
    /// - `RoutingError::MissingParam` if there is no such value
    pub fn require(&self, name: &str) -> RoutingResult<&str> {
        self.get(name)
            .ok_or_else(|| RoutingError::MissingParam(name.to_string()))
    }

    /// Parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
