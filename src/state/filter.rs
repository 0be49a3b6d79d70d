/// List view predicates
///
/// Pure filtering over the fetched cat collection. The collection itself
/// is never mutated; every call derives a fresh result so the view can
/// recompute whenever the data or a predicate changes.

use super::data::{AgeGroup, Cat};

/// The three independent predicates of the home view, combined with AND.
/// An inactive predicate matches everything.
#[derive(Debug, Clone, Default)]
pub struct CatFilter {
    /// Free-text query, matched case-insensitively against name OR location
    pub search: String,
    /// Exact-match location
    pub location: Option<String>,
    /// Exact-match age bracket
    pub age: Option<AgeGroup>,
}

impl CatFilter {
    /// Whether any predicate is narrowing the list. Drives the empty-state
    /// wording: no posts at all vs no posts matching the filters.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.location.is_some() || self.age.is_some()
    }

    pub fn matches(&self, cat: &Cat) -> bool {
        let query = self.search.to_lowercase();
        let search_match = cat.name.to_lowercase().contains(&query)
            || cat.location.to_lowercase().contains(&query);

        let location_match = self
            .location
            .as_deref()
            .map_or(true, |location| cat.location == location);

        let age_match = self.age.map_or(true, |age| cat.age == age);

        search_match && location_match && age_match
    }

    pub fn apply<'a>(&self, cats: &'a [Cat]) -> Vec<&'a Cat> {
        cats.iter().filter(|cat| self.matches(cat)).collect()
    }

    pub fn clear(&mut self) {
        *self = CatFilter::default();
    }
}

/// Options for the location picker: the deduplicated locations present in
/// the fetched collection, in first-seen order. Blank locations are skipped.
pub fn location_options(cats: &[Cat]) -> Vec<String> {
    let mut seen = Vec::new();
    for cat in cats {
        if cat.location.is_empty() {
            continue;
        }
        if !seen.contains(&cat.location) {
            seen.push(cat.location.clone());
        }
    }
    seen
}

/// The dashboard slice: posts whose owner id equals the given user id.
/// Posts without an owner are excluded.
pub fn owned_by(cats: Vec<Cat>, user_id: &str) -> Vec<Cat> {
    cats.into_iter()
        .filter(|cat| {
            cat.user
                .as_ref()
                .and_then(|owner| owner.id.as_deref())
                .map_or(false, |id| id == user_id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{CatOwner, Gender};

    fn cat(id: &str, name: &str, location: &str, age: AgeGroup, owner: Option<&str>) -> Cat {
        Cat {
            id: id.to_owned(),
            name: name.to_owned(),
            age,
            gender: Gender::Unknown,
            location: location.to_owned(),
            description: String::new(),
            photos: Vec::new(),
            adopted: false,
            user: owner.map(|owner_id| CatOwner {
                id: Some(owner_id.to_owned()),
                name: None,
                phone: None,
            }),
        }
    }

    fn sample() -> Vec<Cat> {
        vec![
            cat("1", "Tom", "Kochi", AgeGroup::Adult, Some("u1")),
            cat("2", "Misty", "Thrissur", AgeGroup::Kitten, Some("u2")),
            cat("3", "Socks", "Kochi", AgeGroup::Senior, None),
            cat("4", "Kochi Queen", "Ernakulam", AgeGroup::Adult, Some("u1")),
        ]
    }

    #[test]
    fn test_inactive_filter_returns_everything() {
        let cats = sample();
        let filter = CatFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&cats).len(), cats.len());
    }

    #[test]
    fn test_search_matches_name_or_location_case_insensitively() {
        let cats = sample();
        let filter = CatFilter {
            search: "koCHi".to_owned(),
            ..CatFilter::default()
        };
        // Tom and Socks by location, Kochi Queen by name
        let ids: Vec<&str> = filter.apply(&cats).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_location_filter_is_exact() {
        let cats = sample();
        let filter = CatFilter {
            location: Some("Kochi".to_owned()),
            ..CatFilter::default()
        };
        let ids: Vec<&str> = filter.apply(&cats).iter().map(|c| c.id.as_str()).collect();
        // "Ernakulam" does not match, even though "Kochi Queen" mentions Kochi
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let cats = sample();
        let filter = CatFilter {
            search: "kochi".to_owned(),
            location: Some("Kochi".to_owned()),
            age: Some(AgeGroup::Senior),
        };
        let ids: Vec<&str> = filter.apply(&cats).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_age_filter_is_exact() {
        let cats = sample();
        let filter = CatFilter {
            age: Some(AgeGroup::Adult),
            ..CatFilter::default()
        };
        assert_eq!(filter.apply(&cats).len(), 2);
    }

    #[test]
    fn test_clear_deactivates_every_predicate() {
        let mut filter = CatFilter {
            search: "tom".to_owned(),
            location: Some("Kochi".to_owned()),
            age: Some(AgeGroup::Adult),
        };
        filter.clear();
        assert!(!filter.is_active());
    }

    #[test]
    fn test_location_options_dedupe_in_first_seen_order() {
        let cats = sample();
        assert_eq!(location_options(&cats), vec!["Kochi", "Thrissur", "Ernakulam"]);
    }

    #[test]
    fn test_location_options_skip_blank_locations() {
        let cats = vec![cat("1", "Tom", "", AgeGroup::Adult, None)];
        assert!(location_options(&cats).is_empty());
    }

    #[test]
    fn test_owned_by_keeps_only_the_users_posts() {
        let owned = owned_by(sample(), "u1");
        let ids: Vec<&str> = owned.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_owned_by_excludes_ownerless_posts() {
        let owned = owned_by(sample(), "nobody");
        assert!(owned.is_empty());
    }
}
