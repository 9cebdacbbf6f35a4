use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Reason a page (or element) was judged educational.
///
/// The first five variants own a static domain table and can be toggled in
/// settings. `Custom` and `ContentBased` are assigned by the classifier and
/// never appear in the category map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryId {
    Academic,
    OnlineCourses,
    Documentation,
    NewsEducational,
    Reference,
    Custom,
    ContentBased,
}

impl CategoryId {
    /// Toggleable categories in matching order. First hit wins, so `nature.com`
    /// resolves to `Academic` even though it is also listed under news.
    pub const TABLE_ORDER: [CategoryId; 5] = [
        CategoryId::Academic,
        CategoryId::OnlineCourses,
        CategoryId::Documentation,
        CategoryId::NewsEducational,
        CategoryId::Reference,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryId::Academic => "academic",
            CategoryId::OnlineCourses => "online-courses",
            CategoryId::Documentation => "documentation",
            CategoryId::NewsEducational => "news-educational",
            CategoryId::Reference => "reference",
            CategoryId::Custom => "custom",
            CategoryId::ContentBased => "content-based",
        }
    }

    pub fn is_toggleable(self) -> bool {
        !matches!(self, CategoryId::Custom | CategoryId::ContentBased)
    }

    /// Host/URL fragments matched by substring containment.
    pub fn domain_fragments(self) -> &'static [&'static str] {
        match self {
            CategoryId::Academic => &[
                ".edu",
                ".ac.",
                "scholar.google",
                "researchgate.net",
                "academia.edu",
                "jstor.org",
                "pubmed.ncbi.nlm.nih.gov",
                "arxiv.org",
                "ieee.org",
                "springer.com",
                "nature.com",
                "sciencedirect.com",
                "mit.edu",
                "stanford.edu",
                "harvard.edu",
                "cambridge.org",
                "oxford.ac.uk",
            ],
            CategoryId::OnlineCourses => &[
                "coursera.org",
                "edx.org",
                "udacity.com",
                "khanacademy.org",
                "udemy.com",
                "lynda.com",
                "pluralsight.com",
                "skillshare.com",
                "masterclass.com",
                "codecademy.com",
                "treehouse.com",
                "brilliant.org",
                "futurelearn.com",
                "canvas.net",
                "alison.com",
            ],
            CategoryId::Documentation => &[
                "developer.mozilla.org",
                "stackoverflow.com",
                "github.com",
                "gitlab.com",
                "docs.",
                "documentation.",
                "api.",
                "guides.",
                "tutorial.",
                "w3schools.com",
                "freecodecamp.org",
                "tutorialspoint.com",
                "geeksforgeeks.org",
                "devdocs.io",
            ],
            CategoryId::NewsEducational => &[
                "scientificamerican.com",
                "nationalgeographic.com",
                "smithsonianmag.com",
                "newscientist.com",
                "science.org",
                "nature.com",
                "livescience.com",
                "howstuffworks.com",
                "ted.com",
                "bbc.com/future",
                "vox.com/science",
            ],
            CategoryId::Reference => &[
                "wikipedia.org",
                "britannica.com",
                "dictionary.com",
                "merriam-webster.com",
                "thesaurus.com",
                "translate.google.com",
                "wolfram.com",
                "mathworld.wolfram.com",
                "reference.com",
                "encyclopedia.com",
            ],
            CategoryId::Custom | CategoryId::ContentBased => &[],
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryId {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "academic" => Ok(CategoryId::Academic),
            "online-courses" => Ok(CategoryId::OnlineCourses),
            "documentation" => Ok(CategoryId::Documentation),
            "news-educational" => Ok(CategoryId::NewsEducational),
            "reference" => Ok(CategoryId::Reference),
            "custom" => Ok(CategoryId::Custom),
            "content-based" => Ok(CategoryId::ContentBased),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_kebab_case_tags() {
        let json = serde_json::to_string(&CategoryId::OnlineCourses).unwrap();
        assert_eq!(json, "\"online-courses\"");
        let parsed: CategoryId = serde_json::from_str("\"content-based\"").unwrap();
        assert_eq!(parsed, CategoryId::ContentBased);
    }

    #[test]
    fn from_str_matches_display() {
        for category in CategoryId::TABLE_ORDER {
            assert_eq!(category.to_string().parse::<CategoryId>().unwrap(), category);
        }
        assert!("sports".parse::<CategoryId>().is_err());
    }

    #[test]
    fn only_table_categories_are_toggleable() {
        assert!(CategoryId::TABLE_ORDER.iter().all(|c| c.is_toggleable()));
        assert!(!CategoryId::Custom.is_toggleable());
        assert!(CategoryId::ContentBased.domain_fragments().is_empty());
    }
}
