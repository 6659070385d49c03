// SPDX-License-Identifier: MPL-2.0

//! Query-string builder for the backend's REST filter grammar.
//!
//! The service exposes each table at `rest/v1/<table>` and takes filters as
//! query parameters (`id=eq.42`, `status=in.("a","b")`, `order=col.desc`).
//! Embedded joins ride on the `select` parameter (`select=*,profiles(*)`).

use url::Url;

#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column list, including embedded joins (`"*,profiles(*)"`).
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    pub fn neq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.into(), format!("neq.{value}")));
        self
    }

    /// Membership filter. Values are double-quoted so ids containing the
    /// grammar's reserved characters (commas, parens) survive intact.
    pub fn in_any(mut self, column: &str, values: &[String]) -> Self {
        let list = values
            .iter()
            .map(|v| format!("\"{v}\""))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push((column.into(), format!("in.({list})")));
        self
    }

    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.params
            .push(("order".into(), format!("{column}.{direction}")));
        self
    }

    /// Append the accumulated parameters to a request URL.
    pub fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &self.params {
            pairs.append_pair(key, value);
        }
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}
