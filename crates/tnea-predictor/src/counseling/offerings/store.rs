use std::collections::{BTreeSet, HashMap};

use super::domain::{cmp_cutoff_desc, Community, FilterOptions, Offering};
use super::filter::{BrowseFilter, OfferingFilter};
use super::repository::{OfferingRepository, RepositoryError};

/// Immutable offering store built once at startup.
///
/// Offerings are kept sorted by cutoff descending and indexed by community, so a
/// prediction query only walks the rows of the requested category.
#[derive(Debug, Default, Clone)]
pub struct InMemoryOfferingStore {
    offerings: Vec<Offering>,
    by_category: HashMap<Community, Vec<usize>>,
}

impl InMemoryOfferingStore {
    pub fn new(mut offerings: Vec<Offering>) -> Self {
        offerings.sort_by(cmp_cutoff_desc);

        let mut by_category: HashMap<Community, Vec<usize>> = HashMap::new();
        for (index, offering) in offerings.iter().enumerate() {
            by_category
                .entry(offering.category)
                .or_default()
                .push(index);
        }

        Self {
            offerings,
            by_category,
        }
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}

impl OfferingRepository for InMemoryOfferingStore {
    fn find(
        &self,
        filter: &OfferingFilter,
        limit: usize,
    ) -> Result<Vec<Offering>, RepositoryError> {
        let Some(indexes) = self.by_category.get(&filter.category) else {
            return Ok(Vec::new());
        };

        Ok(indexes
            .iter()
            .map(|&index| &self.offerings[index])
            .filter(|offering| filter.matches(offering))
            .take(limit)
            .cloned()
            .collect())
    }

    fn browse(&self, filter: &BrowseFilter, limit: usize) -> Result<Vec<Offering>, RepositoryError> {
        let mut matches: Vec<&Offering> = self
            .offerings
            .iter()
            .filter(|offering| filter.matches(offering))
            .collect();
        matches.sort_by(|left, right| {
            left.tier
                .cmp(&right.tier)
                .then_with(|| cmp_cutoff_desc(left, right))
        });

        Ok(matches.into_iter().take(limit).cloned().collect())
    }

    fn get(&self, id_or_code: &str) -> Result<Option<Offering>, RepositoryError> {
        let by_id = self
            .offerings
            .iter()
            .find(|offering| offering.id.0 == id_or_code);
        let found = by_id.or_else(|| {
            self.offerings
                .iter()
                .find(|offering| offering.code.as_deref() == Some(id_or_code))
        });
        Ok(found.cloned())
    }

    fn branches_for_code(&self, code: &str) -> Result<Vec<String>, RepositoryError> {
        let branches: BTreeSet<&str> = self
            .offerings
            .iter()
            .filter(|offering| offering.code.as_deref() == Some(code))
            .map(|offering| offering.branch.as_str())
            .collect();
        Ok(branches.into_iter().map(str::to_string).collect())
    }

    fn filter_options(&self) -> Result<FilterOptions, RepositoryError> {
        let mut districts = BTreeSet::new();
        let mut branches = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for offering in &self.offerings {
            if !offering.district.is_empty() {
                districts.insert(offering.district.as_str());
            }
            branches.insert(offering.branch.as_str());
            categories.insert(offering.category.code());
        }

        Ok(FilterOptions {
            districts: districts.into_iter().map(str::to_string).collect(),
            branches: branches.into_iter().map(str::to_string).collect(),
            categories: categories.into_iter().map(str::to_string).collect(),
        })
    }
}
