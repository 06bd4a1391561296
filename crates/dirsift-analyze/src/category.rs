//! Category identifiers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The fixed set of categories a subtree can be searched for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum Category {
    #[strum(to_string = "largest")]
    #[serde(rename = "largest")]
    LargestFiles,

    #[strum(to_string = "newest")]
    #[serde(rename = "newest")]
    NewestFiles,

    #[strum(to_string = "oldest")]
    #[serde(rename = "oldest")]
    OldestFiles,

    #[strum(to_string = "hardlinked")]
    #[serde(rename = "hardlinked")]
    HardLinkedFiles,

    #[strum(to_string = "broken-symlinks")]
    #[serde(rename = "broken-symlinks")]
    BrokenSymlinks,

    #[strum(to_string = "sparse")]
    #[serde(rename = "sparse")]
    SparseFiles,
}

impl Category {
    /// Stable identifier, as accepted by `FromStr`.
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Category::LargestFiles => "Largest files",
            Category::NewestFiles => "Newest files",
            Category::OldestFiles => "Oldest files",
            Category::HardLinkedFiles => "Files with multiple hard links",
            Category::BrokenSymlinks => "Broken symbolic links",
            Category::SparseFiles => "Sparse files",
        }
    }

    /// Whether the category computes a threshold over the subtree before
    /// items can be checked.
    pub fn needs_preparation(self) -> bool {
        matches!(
            self,
            Category::LargestFiles | Category::NewestFiles | Category::OldestFiles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ids_parse_back() {
        for category in Category::iter() {
            assert_eq!(category.id().parse::<Category>().unwrap(), category);
            assert_eq!(category.to_string(), category.id());
        }
        assert!("biggest".parse::<Category>().is_err());
    }

    #[test]
    fn test_preparation() {
        let prepared: Vec<_> = Category::iter().filter(|c| c.needs_preparation()).collect();
        assert_eq!(
            prepared,
            vec![Category::LargestFiles, Category::NewestFiles, Category::OldestFiles]
        );
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Category::BrokenSymlinks).unwrap();
        assert_eq!(json, "\"broken-symlinks\"");
    }
}
