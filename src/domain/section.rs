//! Home feed partitioning.
//!
//! The home view shows two category groups. Each keeps the fetch order of
//! its articles: the first is the hero, the next [`SECONDARY_LIMIT`] fill the
//! grid, the rest are not rendered.

use crate::domain::{Article, Category};

/// Grid items shown under a hero.
pub const SECONDARY_LIMIT: usize = 8;

/// In-page anchors of the home view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Top,
    Technology,
    Business,
    Markets,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Top => "Home",
            Section::Technology => "Technology",
            Section::Business => "Business",
            Section::Markets => "Markets",
        }
    }

    /// Whether an article of `category` belongs to this section's group.
    pub fn includes(self, category: &Category) -> bool {
        match self {
            Section::Technology => matches!(category, Category::Technology),
            Section::Business => matches!(
                category,
                Category::Business | Category::Economy | Category::Markets
            ),
            Section::Top | Section::Markets => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGroup<'a> {
    pub hero: Option<&'a Article>,
    pub secondary: Vec<&'a Article>,
    /// Size of the group before truncation.
    pub total: usize,
}

impl<'a> CategoryGroup<'a> {
    pub fn collect<I>(articles: I) -> Self
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let mut group = CategoryGroup::default();
        for article in articles {
            group.total += 1;
            if group.hero.is_none() {
                group.hero = Some(article);
            } else if group.secondary.len() < SECONDARY_LIMIT {
                group.secondary.push(article);
            }
        }
        group
    }

    pub fn is_empty(&self) -> bool {
        self.hero.is_none()
    }

    /// Articles that are actually rendered, hero first.
    pub fn rendered(&self) -> impl Iterator<Item = &'a Article> + '_ {
        self.hero.into_iter().chain(self.secondary.iter().copied())
    }

    pub fn rendered_len(&self) -> usize {
        self.hero.map_or(0, |_| 1) + self.secondary.len()
    }

    pub fn hidden(&self) -> usize {
        self.total - self.rendered_len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeSections<'a> {
    pub technology: CategoryGroup<'a>,
    pub business: CategoryGroup<'a>,
}

impl<'a> HomeSections<'a> {
    pub fn partition(articles: &'a [Article]) -> Self {
        Self {
            technology: CategoryGroup::collect(
                articles
                    .iter()
                    .filter(|a| Section::Technology.includes(&a.category)),
            ),
            business: CategoryGroup::collect(
                articles
                    .iter()
                    .filter(|a| Section::Business.includes(&a.category)),
            ),
        }
    }

    pub fn group(&self, section: Section) -> Option<&CategoryGroup<'a>> {
        match section {
            Section::Technology => Some(&self.technology),
            Section::Business => Some(&self.business),
            Section::Top | Section::Markets => None,
        }
    }

    /// Selectable entries in render order.
    pub fn entries(&self) -> Vec<(Section, &'a Article)> {
        self.technology
            .rendered()
            .map(|a| (Section::Technology, a))
            .chain(self.business.rendered().map(|a| (Section::Business, a)))
            .collect()
    }

    pub fn entry_count(&self) -> usize {
        self.technology.rendered_len() + self.business.rendered_len()
    }

    /// Index into [`entries`](Self::entries) where a section starts.
    pub fn first_entry_of(&self, section: Section) -> Option<usize> {
        match section {
            Section::Top => (self.entry_count() > 0).then_some(0),
            Section::Technology => (!self.technology.is_empty()).then_some(0),
            Section::Business => {
                (!self.business.is_empty()).then_some(self.technology.rendered_len())
            }
            Section::Markets => None,
        }
    }
}
