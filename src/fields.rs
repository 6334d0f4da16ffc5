//! # Sparse Fieldsets
//!
//! A [`FieldSelector`] restricts which attributes and relationships a
//! conversion emits. Paths are matched ASCII case-insensitively:
//!
//! - an attribute `X` is kept iff `X` is listed verbatim;
//! - a relationship `R` is kept iff `R` is listed or some entry starts with `R.`;
//! - the related resource side-loaded for `R` is filtered by the `R.`-prefixed
//!   entries with that segment stripped, or fully mapped when only `R` is listed.
//!
//! No selector at all means "include everything".

use std::convert::Infallible;
use std::str::FromStr;

const LIST_SEPARATOR: char = ',';
const PATH_SEPARATOR: char = '.';

/// An ordered list of field paths such as `name` or `category.name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelector {
    paths: Vec<String>,
}

/// What a selector says about one relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Not selected: no linkage and nothing side-loaded.
    Skip,
    /// Selected as a whole: the related resource is fully mapped.
    Full,
    /// Selected through sub-paths: the related resource is filtered again.
    Narrowed(FieldSelector),
}

impl FieldSelector {
    /// Parses a comma-separated list, trimming entries and dropping empty ones.
    pub fn parse(list: &str) -> Self {
        list.split(LIST_SEPARATOR).collect()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn selects_attribute(&self, name: &str) -> bool {
        self.paths.iter().any(|path| path.eq_ignore_ascii_case(name))
    }

    pub fn select_relationship(&self, name: &str) -> Selection {
        let mut listed = false;
        let mut nested = Vec::new();
        for path in &self.paths {
            if path.eq_ignore_ascii_case(name) {
                listed = true;
            } else if let Some(rest) = strip_segment(path, name) {
                nested.push(rest.to_owned());
            }
        }

        match (listed, nested.is_empty()) {
            (_, false) => Selection::Narrowed(Self { paths: nested }),
            (true, true) => Selection::Full,
            (false, true) => Selection::Skip,
        }
    }
}

// `category.name` with segment `Category` -> `name`
fn strip_segment<'a>(path: &'a str, segment: &str) -> Option<&'a str> {
    let head = path.get(..segment.len())?;
    let rest = path.get(segment.len()..)?;
    if !head.eq_ignore_ascii_case(segment) {
        return None;
    }
    rest.strip_prefix(PATH_SEPARATOR)
}

impl<S: AsRef<str>> FromIterator<S> for FieldSelector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter
                .into_iter()
                .map(|path| path.as_ref().trim().to_owned())
                .filter(|path| !path.is_empty())
                .collect(),
        }
    }
}

impl FromStr for FieldSelector {
    type Err = Infallible;

    fn from_str(list: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_drops_empty_entries() {
        let selector = FieldSelector::parse(" name , ,category.name,");
        assert_eq!(selector.paths(), ["name", "category.name"]);
    }

    #[test]
    fn attributes_match_case_insensitively() {
        let selector = FieldSelector::parse("name");
        assert!(selector.selects_attribute("Name"));
        assert!(!selector.selects_attribute("Description"));
    }

    #[test]
    fn nested_paths_do_not_select_attributes() {
        let selector = FieldSelector::parse("category.name");
        assert!(!selector.selects_attribute("Name"));
        assert!(!selector.selects_attribute("Category"));
    }

    #[test]
    fn bare_relationship_selects_full_mapping() {
        let selector = FieldSelector::parse("name,category");
        assert_eq!(selector.select_relationship("Category"), Selection::Full);
    }

    #[test]
    fn prefixed_paths_narrow_the_relationship() {
        let selector = FieldSelector::parse("Category.Name,category.parent.name,units");
        assert_eq!(
            selector.select_relationship("category"),
            Selection::Narrowed(FieldSelector::parse("Name,parent.name"))
        );
        assert_eq!(selector.select_relationship("Units"), Selection::Full);
    }

    #[test]
    fn sub_paths_win_over_bare_entry() {
        let selector = FieldSelector::parse("category,category.name");
        assert_eq!(
            selector.select_relationship("Category"),
            Selection::Narrowed(FieldSelector::parse("name"))
        );
    }

    #[test]
    fn unlisted_relationships_are_skipped() {
        let selector = FieldSelector::parse("name,categoryname,cat.name");
        assert_eq!(selector.select_relationship("Category"), Selection::Skip);
    }
}
