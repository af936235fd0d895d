//! 层级查询键。
//!
//! 键是有序片段列表，失效按前缀匹配：
//! `["batiments"]` ⊃ `["batiments", "list"]` ⊃ `["batiments", "list", {filters, pagination}]`，
//! `["batiments", "detail", id]` ⊃ `["batiments", "detail", id, "validation"]`。

use api_contract::{BatimentFilters, Pagination};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Name(String),
    List {
        filters: BatimentFilters,
        pagination: Pagination,
    },
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Name(name) => f.write_str(name),
            KeyPart::List { pagination, .. } => {
                write!(f, "{{page={},size={}}}", pagination.page, pagination.size)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeyPart>);

impl QueryKey {
    fn from_names(names: &[&str]) -> Self {
        Self(
            names
                .iter()
                .map(|name| KeyPart::Name((*name).to_string()))
                .collect(),
        )
    }

    fn child(mut self, part: KeyPart) -> Self {
        self.0.push(part);
        self
    }

    fn named(self, name: &str) -> Self {
        self.child(KeyPart::Name(name.to_string()))
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// `prefix` 是否为本键的前缀（含相等）。
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn batiments_all() -> Self {
        Self::from_names(&["batiments"])
    }

    pub fn batiment_lists() -> Self {
        Self::batiments_all().named("list")
    }

    pub fn batiment_list(filters: &BatimentFilters, pagination: &Pagination) -> Self {
        Self::batiment_lists().child(KeyPart::List {
            filters: filters.clone(),
            pagination: pagination.clone(),
        })
    }

    pub fn batiments_no_pagination() -> Self {
        Self::batiments_all().named("no-pagination")
    }

    pub fn batiment_details() -> Self {
        Self::batiments_all().named("detail")
    }

    pub fn batiment_detail(id: &str) -> Self {
        Self::batiment_details().named(id)
    }

    pub fn batiment_validation(id: &str) -> Self {
        Self::batiment_detail(id).named("validation")
    }

    pub fn niveaux_all(batiment_id: &str) -> Self {
        Self::from_names(&["batiments", batiment_id, "niveaux"])
    }

    pub fn niveau_detail(batiment_id: &str, niveau_id: &str) -> Self {
        Self::niveaux_all(batiment_id).named(niveau_id)
    }

    pub fn pieces_all(batiment_id: &str, niveau_id: &str) -> Self {
        Self::niveau_detail(batiment_id, niveau_id).named("pieces")
    }

    pub fn piece_detail(batiment_id: &str, niveau_id: &str, piece_id: &str) -> Self {
        Self::pieces_all(batiment_id, niveau_id).named(piece_id)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_key_lives_under_detail() {
        let validation = QueryKey::batiment_validation("b1");
        assert!(validation.starts_with(&QueryKey::batiment_detail("b1")));
        assert!(validation.starts_with(&QueryKey::batiments_all()));
        assert!(!validation.starts_with(&QueryKey::batiment_detail("b2")));
    }

    #[test]
    fn list_keys_share_the_list_family() {
        let key = QueryKey::batiment_list(&BatimentFilters::default(), &Pagination::new(1, 20));
        assert!(key.starts_with(&QueryKey::batiment_lists()));
        assert!(!QueryKey::batiments_no_pagination().starts_with(&QueryKey::batiment_lists()));
        assert_ne!(
            key,
            QueryKey::batiment_list(&BatimentFilters::default(), &Pagination::new(2, 20))
        );
    }

    #[test]
    fn pieces_nest_under_levels() {
        let piece = QueryKey::piece_detail("b1", "n1", "p1");
        assert!(piece.starts_with(&QueryKey::niveaux_all("b1")));
        assert!(!piece.starts_with(&QueryKey::batiment_detail("b1")));
        assert_eq!(piece.to_string(), "[batiments, b1, niveaux, n1, pieces, p1]");
    }
}
