// src/plant/species.rs
// Fixed houseplant catalogue: canonical names and icons

/// Common houseplants offered by the species picker
pub const COMMON_SPECIES: &[&str] = &[
    "Fiddle Leaf Fig",
    "Monstera Deliciosa",
    "Snake Plant",
    "Pothos",
    "ZZ Plant",
    "Peace Lily",
    "Spider Plant",
    "Rubber Plant",
    "Philodendron",
    "Aloe Vera",
    "Jade Plant",
    "English Ivy",
    "Boston Fern",
    "Bird of Paradise",
    "Dracaena",
    "Chinese Evergreen",
    "Dieffenbachia",
    "Calathea",
    "Maranta",
    "Anthurium",
    "Croton",
    "Schefflera",
    "Ficus Benjamina",
    "Ponytail Palm",
    "Yucca",
    "Aglaonema",
    "Bromeliad",
    "Christmas Cactus",
    "African Violet",
    "Begonia",
    "Coleus",
    "Impatiens",
    "Geranium",
    "Petunia",
    "Marigold",
    "Lavender",
    "Rosemary",
    "Basil",
    "Mint",
    "Oregano",
    "Thyme",
    "Sage",
    "Parsley",
    "Cilantro",
    "Chives",
    "Lemon Tree",
    "Lime Tree",
    "Orange Tree",
    "Avocado",
    "Mango",
    "Bamboo",
    "Lucky Bamboo",
    "Bonsai",
    "Juniper",
    "Cypress",
    "Orchid",
    "Air Plant",
    "String of Pearls",
    "String of Hearts",
    "Burro's Tail",
    "Echeveria",
    "Hens and Chicks",
    "Aloe",
    "Haworthia",
    "Lithops",
    "Easter Cactus",
    "Barrel Cactus",
    "Prickly Pear",
    "Areca Palm",
    "Majesty Palm",
    "Kentia Palm",
    "Parlor Palm",
    "Rubber Tree",
    "Weeping Fig",
    "Ficus Lyrata",
    "Ficus Elastica",
    "Swiss Cheese Plant",
    "Split-Leaf Philodendron",
    "Elephant Ear",
    "Caladium",
    "Taro",
    "Arrowhead Plant",
    "Heartleaf Philodendron",
    "Devil's Ivy",
    "Golden Pothos",
    "Marble Queen Pothos",
    "Neon Pothos",
    "Satin Pothos",
    "Peperomia",
    "Radiator Plant",
    "Prayer Plant",
    "Rattlesnake Plant",
    "Zebra Plant",
    "Peacock Plant",
    "Stromanthe",
];

const DEFAULT_ICON: &str = "🪴";

/// Keyword groups, first match wins
const ICON_RULES: &[(&[&str], &str)] = &[
    (&["cactus", "prickly pear"], "🌵"),
    (&["palm"], "🌴"),
    (&["fig", "ficus", "rubber", "tree", "bonsai", "juniper", "cypress"], "🌳"),
    (&["basil", "mint", "oregano", "thyme", "sage", "parsley", "cilantro", "chives", "rosemary"], "🌿"),
    (&["orchid", "violet", "begonia", "geranium", "petunia", "marigold", "lavender", "impatiens", "lily"], "🌸"),
    (&["aloe", "echeveria", "haworthia", "lithops", "jade", "hens and chicks", "string of", "burro"], "🪨"),
    (&["bamboo"], "🎋"),
];

/// Canonical catalogue name for free-text species input, if any.
pub fn canonical(species: &str) -> Option<&'static str> {
    let needle = species.trim();
    COMMON_SPECIES
        .iter()
        .copied()
        .find(|name| name.eq_ignore_ascii_case(needle))
}

/// Emoji icon for a species; unknown species get a generic potted plant.
pub fn icon_for(species: &str) -> &'static str {
    let lower = species.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
