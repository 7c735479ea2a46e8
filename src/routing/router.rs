//! Route table construction.
//!
//! # Responsibilities
//! - Parse "<METHOD> <URL> <RPC-METHOD>" lines
//! - Keep declaration order (first match wins downstream)
//! - Reject malformed lines instead of skipping them
//!
//! # Design Decisions
//! - Tokens are split on single spaces; exactly three non-empty tokens
//!   are accepted, so doubled spaces are an error too
//! - Immutable after construction (thread-safe without locks)

use serde::Serialize;

use crate::config::error::{ConfigError, ConfigResult};

/// One `urlmapping` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// HTTP method, e.g. "GET".
    pub http_method: String,
    /// URL pattern, e.g. "/users/:id".
    pub url_pattern: String,
    /// Target RPC method name.
    pub rpc_method: String,
}

impl Route {
    /// Parse a single line. `index` is reported in errors.
    pub fn parse(index: usize, line: &str) -> ConfigResult<Self> {
        let malformed = |reason: String| ConfigError::MalformedRoute {
            index,
            line: line.to_string(),
            reason,
        };

        let tokens: Vec<&str> = line.trim().split(' ').map(str::trim).collect();
        if tokens.len() != 3 {
            return Err(malformed(format!(
                "expected 3 space-separated tokens, found {}",
                tokens.len()
            )));
        }
        if tokens.iter().any(|t| t.is_empty()) {
            return Err(malformed("empty token".to_string()));
        }

        Ok(Self {
            http_method: tokens[0].to_string(),
            url_pattern: tokens[1].to_string(),
            rpc_method: tokens[2].to_string(),
        })
    }

    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.http_method, &self.url_pattern, &self.rpc_method)
    }
}

/// Ordered routing table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build from raw lines, preserving order. Any malformed line fails
    /// the whole table.
    pub fn from_lines<I, S>(lines: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let routes = lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| Route::parse(i, line.as_ref()))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
