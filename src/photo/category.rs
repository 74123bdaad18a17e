use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Uncategorized = 0,
    Celebrities,
    Film,
    Journalism,
    Nude,
    BlackAndWhite,
    StillLife,
    People,
    Landscapes,
    CityAndArchitecture,
    Abstract,
    Animals,
    Macro,
    Travel,
    Fashion,
    Commercial,
    Concert,
    Sport,
    Nature,
    PerformingArts,
    Family,
    Street,
    Underwater,
    Food,
    FineArt,
    Wedding,
    Transportation,
    UrbanExploration,
}

impl Category {
    pub const ALL: [Category; 28] = [
        Category::Uncategorized,
        Category::Celebrities,
        Category::Film,
        Category::Journalism,
        Category::Nude,
        Category::BlackAndWhite,
        Category::StillLife,
        Category::People,
        Category::Landscapes,
        Category::CityAndArchitecture,
        Category::Abstract,
        Category::Animals,
        Category::Macro,
        Category::Travel,
        Category::Fashion,
        Category::Commercial,
        Category::Concert,
        Category::Sport,
        Category::Nature,
        Category::PerformingArts,
        Category::Family,
        Category::Street,
        Category::Underwater,
        Category::Food,
        Category::FineArt,
        Category::Wedding,
        Category::Transportation,
        Category::UrbanExploration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Uncategorized => "Uncategorized",
            Category::Celebrities => "Celebrities",
            Category::Film => "Film",
            Category::Journalism => "Journalism",
            Category::Nude => "Nude",
            Category::BlackAndWhite => "Black And White",
            Category::StillLife => "Still Life",
            Category::People => "People",
            Category::Landscapes => "Landscapes",
            Category::CityAndArchitecture => "City And Architecture",
            Category::Abstract => "Abstract",
            Category::Animals => "Animals",
            Category::Macro => "Macro",
            Category::Travel => "Travel",
            Category::Fashion => "Fashion",
            Category::Commercial => "Commercial",
            Category::Concert => "Concert",
            Category::Sport => "Sport",
            Category::Nature => "Nature",
            Category::PerformingArts => "Performing Arts",
            Category::Family => "Family",
            Category::Street => "Street",
            Category::Underwater => "Underwater",
            Category::Food => "Food",
            Category::FineArt => "Fine Art",
            Category::Wedding => "Wedding",
            Category::Transportation => "Transportation",
            Category::UrbanExploration => "Urban Exploration",
        }
    }
}

impl TryFrom<i64> for Category {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|i| Category::ALL.get(i).copied())
            .ok_or(value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
