//! Search and category filtering over the disposal guideline catalog.

use std::fmt;

use crate::model::{BinCategory, DisposalGuideline};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Category buttons offered by the guide. General waste is only reachable through `All`.
pub enum GuideFilter {
    /// Every category.
    #[default]
    All,
    /// Recyclable guidelines only.
    Recyclable,
    /// Compost guidelines only.
    Compost,
}

impl GuideFilter {
    /// All filters in button order.
    pub const ALL: [GuideFilter; 3] = [GuideFilter::All, GuideFilter::Recyclable, GuideFilter::Compost];

    /// Whether a guideline category passes this filter.
    #[must_use]
    pub fn accepts(self, category: BinCategory) -> bool {
        match self {
            GuideFilter::All => true,
            GuideFilter::Recyclable => category == BinCategory::Recyclable,
            GuideFilter::Compost => category == BinCategory::Compost,
        }
    }

    /// The filter after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            GuideFilter::All => GuideFilter::Recyclable,
            GuideFilter::Recyclable => GuideFilter::Compost,
            GuideFilter::Compost => GuideFilter::All,
        }
    }

    /// The filter before this one, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        match self {
            GuideFilter::All => GuideFilter::Compost,
            GuideFilter::Recyclable => GuideFilter::All,
            GuideFilter::Compost => GuideFilter::Recyclable,
        }
    }
}

impl fmt::Display for GuideFilter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            GuideFilter::All => "all",
            GuideFilter::Recyclable => "recyclable",
            GuideFilter::Compost => "compost",
        };
        write!(formatter, "{slug}")
    }
}

/// Case-insensitive substring match on waste type or instructions.
#[must_use]
pub fn matches_query(guideline: &DisposalGuideline, query: &str) -> bool {
    let needle = query.to_lowercase();
    guideline.waste_type.to_lowercase().contains(&needle)
        || guideline.instructions.to_lowercase().contains(&needle)
}

/// Guidelines matching both the query and the category filter, in catalog order.
#[must_use]
pub fn filter_guidelines<'catalog>(
    catalog: &'catalog [DisposalGuideline],
    query: &str,
    filter: GuideFilter,
) -> Vec<&'catalog DisposalGuideline> {
    catalog
        .iter()
        .filter(|guideline| matches_query(guideline, query) && filter.accepts(guideline.category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guideline(waste_type: &str, instructions: &str, category: BinCategory) -> DisposalGuideline {
        DisposalGuideline {
            waste_type: waste_type.to_owned(),
            instructions: instructions.to_owned(),
            category,
            image_url: String::new(),
            tips: Vec::new(),
            environmental_impact: String::new(),
            qr_code: None,
        }
    }

    fn catalog() -> Vec<DisposalGuideline> {
        vec![
            guideline(
                "Plastic Bottles",
                "Empty and rinse before disposing. Remove caps and labels.",
                BinCategory::Recyclable,
            ),
            guideline(
                "Food Waste",
                "All food scraps go in the compost bin. No packaging.",
                BinCategory::Compost,
            ),
            guideline(
                "Electronics",
                "Remove batteries. Handle with care.",
                BinCategory::General,
            ),
            guideline(
                "Garden Waste",
                "Cut large branches. Remove non-organic materials.",
                BinCategory::Compost,
            ),
        ]
    }

    fn names(found: &[&DisposalGuideline]) -> Vec<String> {
        found.iter().map(|entry| entry.waste_type.clone()).collect()
    }

    #[test]
    fn food_in_compost_finds_food_waste() {
        let catalog = catalog();
        let found = filter_guidelines(&catalog, "food", GuideFilter::Compost);
        assert_eq!(names(&found), vec!["Food Waste"]);
    }

    #[test]
    fn bottle_in_compost_is_empty() {
        let catalog = catalog();
        assert!(filter_guidelines(&catalog, "bottle", GuideFilter::Compost).is_empty());
    }

    #[test]
    fn query_is_case_insensitive_and_searches_instructions() {
        let catalog = catalog();
        let found = filter_guidelines(&catalog, "REMOVE", GuideFilter::All);
        assert_eq!(
            names(&found),
            vec!["Plastic Bottles", "Electronics", "Garden Waste"]
        );
    }

    #[test]
    fn empty_query_keeps_catalog_order() {
        let catalog = catalog();
        let found = filter_guidelines(&catalog, "", GuideFilter::All);
        assert_eq!(found.len(), catalog.len());
        let compost = filter_guidelines(&catalog, "", GuideFilter::Compost);
        assert_eq!(names(&compost), vec!["Food Waste", "Garden Waste"]);
    }

    #[test]
    fn general_guidelines_only_through_all() {
        let catalog = catalog();
        assert_eq!(
            names(&filter_guidelines(&catalog, "batteries", GuideFilter::All)),
            vec!["Electronics"]
        );
        assert!(filter_guidelines(&catalog, "batteries", GuideFilter::Recyclable).is_empty());
        assert!(filter_guidelines(&catalog, "batteries", GuideFilter::Compost).is_empty());
    }

    #[test]
    fn filter_cycles_through_buttons() {
        let mut filter = GuideFilter::default();
        for expected in [GuideFilter::Recyclable, GuideFilter::Compost, GuideFilter::All] {
            filter = filter.next();
            assert_eq!(filter, expected);
        }
        assert_eq!(GuideFilter::All.previous(), GuideFilter::Compost);
    }
}
