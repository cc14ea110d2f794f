use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Category an asset is filed under in the picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AssetCategory {
    Food,
    Clothing,
    Routines,
    Emotions,
    Family,
    Places,
    Transport,
    Nature,
    Objects,
}

/// A reusable pictograph.
///
/// `visual_token` is the emoji rendered for the asset; `localized_name`
/// is the Hindi display name where one is curated.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Asset {
    pub id: &'static str,
    pub name: &'static str,
    pub localized_name: Option<&'static str>,
    pub category: AssetCategory,
    pub visual_token: &'static str,
    pub tags: &'static [&'static str],
}

macro_rules! asset {
    ($id:literal, $name:literal, $hindi:literal, $cat:ident, $token:literal, [$($tag:literal),*]) => {
        Asset {
            id: $id,
            name: $name,
            localized_name: Some($hindi),
            category: AssetCategory::$cat,
            visual_token: $token,
            tags: &[$($tag),*],
        }
    };
}

static CATALOG: &[Asset] = &[
    asset!("food-1", "Roti", "रोटी", Food, "🫓", ["food", "bread", "meal"]),
    asset!("food-2", "Rice", "चावल", Food, "🍚", ["food", "grain", "meal"]),
    asset!("food-3", "Dosa", "डोसा", Food, "🥞", ["food", "breakfast", "south"]),
    asset!("food-4", "Idli", "इडली", Food, "⚪", ["food", "breakfast", "south"]),
    asset!("food-5", "Dal", "दाल", Food, "🥣", ["food", "lentils", "meal"]),
    asset!("food-6", "Apple", "सेब", Food, "🍎", ["food", "fruit"]),
    asset!("food-7", "Banana", "केला", Food, "🍌", ["food", "fruit"]),
    asset!("food-8", "Mango", "आम", Food, "🥭", ["food", "fruit", "indian"]),
    asset!("cloth-1", "Shirt", "कमीज़", Clothing, "👕", ["clothing", "upper"]),
    asset!("cloth-2", "Pants", "पैंट", Clothing, "👖", ["clothing", "lower"]),
    asset!("cloth-3", "Dress", "फ्रॉक", Clothing, "👗", ["clothing", "girls"]),
    asset!("cloth-4", "Shoes", "जूते", Clothing, "👟", ["clothing", "footwear"]),
    asset!("routine-1", "Wake Up", "जागना", Routines, "🌅", ["routine", "morning"]),
    asset!("routine-2", "Brush Teeth", "दांत साफ़", Routines, "🪥", ["routine", "hygiene"]),
    asset!("routine-3", "Bath", "नहाना", Routines, "🛁", ["routine", "hygiene"]),
    asset!("routine-4", "Eat Breakfast", "नाश्ता", Routines, "🍳", ["routine", "food"]),
    asset!("routine-5", "Go to School", "स्कूल जाना", Routines, "🏫", ["routine", "school"]),
    asset!("routine-6", "Study", "पढ़ाई", Routines, "📚", ["routine", "school"]),
    asset!("routine-7", "Play", "खेलना", Routines, "⚽", ["routine", "fun"]),
    asset!("routine-8", "Sleep", "सोना", Routines, "😴", ["routine", "night"]),
    asset!("emo-1", "Happy", "खुश", Emotions, "😊", ["emotion", "positive"]),
    asset!("emo-2", "Sad", "उदास", Emotions, "😢", ["emotion", "negative"]),
    asset!("emo-3", "Angry", "गुस्सा", Emotions, "😠", ["emotion", "negative"]),
    asset!("emo-4", "Scared", "डर", Emotions, "😨", ["emotion", "negative"]),
    asset!("emo-5", "Surprised", "हैरान", Emotions, "😲", ["emotion"]),
    asset!("emo-6", "Love", "प्यार", Emotions, "🥰", ["emotion", "positive"]),
    asset!("fam-1", "Mother", "माँ", Family, "👩", ["family", "parent"]),
    asset!("fam-2", "Father", "पापा", Family, "👨", ["family", "parent"]),
    asset!("fam-3", "Grandmother", "दादी", Family, "👵", ["family", "grandparent"]),
    asset!("fam-4", "Grandfather", "दादा", Family, "👴", ["family", "grandparent"]),
    asset!("fam-5", "Sister", "बहन", Family, "👧", ["family", "sibling"]),
    asset!("fam-6", "Brother", "भाई", Family, "👦", ["family", "sibling"]),
    asset!("place-1", "Home", "घर", Places, "🏠", ["place", "living"]),
    asset!("place-2", "School", "स्कूल", Places, "🏫", ["place", "education"]),
    asset!("place-3", "Park", "पार्क", Places, "🏞️", ["place", "outdoor"]),
    asset!("place-4", "Temple", "मंदिर", Places, "🛕", ["place", "religious"]),
    asset!("place-5", "Market", "बाज़ार", Places, "🏪", ["place", "shopping"]),
    asset!("trans-1", "Auto", "ऑटो", Transport, "🛺", ["transport", "vehicle"]),
    asset!("trans-2", "Bus", "बस", Transport, "🚌", ["transport", "vehicle"]),
    asset!("trans-3", "Train", "ट्रेन", Transport, "🚃", ["transport", "vehicle"]),
    asset!("trans-4", "Bicycle", "साइकिल", Transport, "🚲", ["transport", "vehicle"]),
    asset!("trans-5", "Car", "कार", Transport, "🚗", ["transport", "vehicle"]),
    asset!("nat-1", "Sun", "सूरज", Nature, "☀️", ["nature", "weather"]),
    asset!("nat-2", "Moon", "चाँद", Nature, "🌙", ["nature", "weather"]),
    asset!("nat-3", "Rain", "बारिश", Nature, "🌧️", ["nature", "weather"]),
    asset!("nat-4", "Flower", "फूल", Nature, "🌸", ["nature", "plant"]),
    asset!("nat-5", "Tree", "पेड़", Nature, "🌳", ["nature", "plant"]),
    asset!("obj-1", "Book", "किताब", Objects, "📕", ["object", "school"]),
    asset!("obj-2", "Pencil", "पेंसिल", Objects, "✏️", ["object", "school"]),
    asset!("obj-3", "Ball", "गेंद", Objects, "⚽", ["object", "play"]),
    asset!("obj-4", "Doll", "गुड़िया", Objects, "🪆", ["object", "play"]),
    asset!("obj-5", "Phone", "फ़ोन", Objects, "📱", ["object", "device"]),
];

/// The full built-in catalog.
pub fn catalog() -> &'static [Asset] {
    CATALOG
}

pub fn find(id: &str) -> Option<&'static Asset> {
    CATALOG.iter().find(|asset| asset.id == id)
}

pub fn by_category(category: AssetCategory) -> Vec<&'static Asset> {
    CATALOG
        .iter()
        .filter(|asset| asset.category == category)
        .collect()
}

/// Case-insensitive match against asset names and tags.
pub fn search(query: &str) -> Vec<&'static Asset> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    CATALOG
        .iter()
        .filter(|asset| {
            asset.name.to_lowercase().contains(&query)
                || asset.tags.iter().any(|tag| tag.contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let mut seen = HashSet::new();
        assert!(catalog().iter().all(|asset| seen.insert(asset.id)));
    }

    #[test]
    fn every_category_has_assets() {
        use strum::IntoEnumIterator;
        for category in AssetCategory::iter() {
            assert!(
                !by_category(category).is_empty(),
                "no assets in {category}"
            );
        }
    }

    #[test]
    fn find_returns_the_exact_asset() {
        let mango = find("food-8").unwrap();
        assert_eq!(mango.name, "Mango");
        assert_eq!(mango.visual_token, "🥭");
        assert_eq!(mango.localized_name, Some("आम"));
    }

    #[test]
    fn search_matches_names_and_tags() {
        let fruit = search("fruit");
        assert!(fruit.iter().any(|a| a.id == "food-6"));
        assert!(fruit.iter().any(|a| a.id == "food-8"));

        let mango = search("MANGO");
        assert_eq!(mango.len(), 1);

        assert!(search("   ").is_empty());
        assert!(search("xylophone").is_empty());
    }
}
