//! Countries for the flag and border-shape tasks.

pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub tier: u8,
}

pub struct CountryShape {
    pub name: &'static str,
    /// Simplified outline in a 100×100 view box
    pub path: &'static str,
    pub view_box: &'static str,
    pub tier: u8,
}

const fn country(code: &'static str, name: &'static str, tier: u8) -> Country {
    Country { code, name, tier }
}

pub static COUNTRIES: &[Country] = &[
    country("DE", "Deutschland", 1),
    country("FR", "Frankreich", 1),
    country("US", "USA", 1),
    country("GB", "Großbritannien", 1),
    country("IT", "Italien", 1),
    country("ES", "Spanien", 1),
    country("JP", "Japan", 1),
    country("CA", "Kanada", 1),
    country("CH", "Schweiz", 1),
    country("TR", "Türkei", 1),
    country("BR", "Brasilien", 2),
    country("CN", "China", 2),
    country("RU", "Russland", 2),
    country("IN", "Indien", 2),
    country("AU", "Australien", 2),
    country("KR", "Südkorea", 2),
    country("SE", "Schweden", 2),
    country("NL", "Niederlande", 2),
    country("PL", "Polen", 2),
    country("GR", "Griechenland", 2),
    country("AT", "Österreich", 2),
    country("PT", "Portugal", 2),
    country("AR", "Argentinien", 2),
    country("MX", "Mexiko", 2),
    country("ZA", "Südafrika", 2),
    country("BE", "Belgien", 3),
    country("NO", "Norwegen", 3),
    country("FI", "Finnland", 3),
    country("DK", "Dänemark", 3),
    country("EG", "Ägypten", 3),
    country("TH", "Thailand", 3),
    country("VN", "Vietnam", 3),
    country("ID", "Indonesien", 3),
    country("UA", "Ukraine", 3),
    country("HU", "Ungarn", 3),
    country("CZ", "Tschechien", 3),
    country("HR", "Kroatien", 3),
    country("IL", "Israel", 3),
];

pub static COUNTRY_SHAPES: &[CountryShape] = &[
    CountryShape {
        name: "Deutschland",
        path: "M40,20 L55,22 L65,30 L60,45 L70,55 L80,50 L85,60 L75,80 L60,85 L40,80 L30,65 L25,45 L35,30 Z",
        view_box: "0 0 100 100",
        tier: 1,
    },
    CountryShape {
        name: "Frankreich",
        path: "M30,20 L60,15 L75,30 L70,60 L60,75 L40,80 L20,60 L15,40 Z",
        view_box: "0 0 100 100",
        tier: 1,
    },
    CountryShape {
        name: "Italien",
        path: "M30,10 L60,10 L65,30 L50,40 L60,55 L75,80 L55,90 L40,60 L35,40 Z",
        view_box: "0 0 100 100",
        tier: 1,
    },
    CountryShape {
        name: "USA",
        path: "M10,20 L40,22 L90,20 L95,50 L85,75 L60,80 L40,80 L20,70 L5,50 Z",
        view_box: "0 0 100 100",
        tier: 1,
    },
    CountryShape {
        name: "Australien",
        path: "M20,30 L50,25 L80,20 L90,40 L85,70 L60,85 L30,80 L15,60 Z",
        view_box: "0 0 100 100",
        tier: 1,
    },
    CountryShape {
        name: "Japan",
        path: "M70,10 L80,20 L75,35 L60,50 L50,65 L40,60 L50,45 L60,25 Z",
        view_box: "0 0 100 100",
        tier: 2,
    },
    CountryShape {
        name: "Indien",
        path: "M30,20 L50,15 L70,20 L75,40 L60,70 L50,90 L40,70 L25,40 Z",
        view_box: "0 0 100 100",
        tier: 2,
    },
    CountryShape {
        name: "Brasilien",
        path: "M30,20 L70,20 L90,40 L80,70 L50,85 L40,60 L20,40 Z",
        view_box: "0 0 100 100",
        tier: 2,
    },
    CountryShape {
        name: "Großbritannien",
        path: "M40,10 L60,15 L55,40 L65,50 L75,60 L40,80 L30,60 L35,40 L25,20 Z",
        view_box: "0 0 100 100",
        tier: 2,
    },
    CountryShape {
        name: "China",
        path: "M20,30 L50,20 L80,25 L90,45 L70,70 L50,65 L30,60 L25,50 Z",
        view_box: "0 0 100 100",
        tier: 2,
    },
];

/// Highest flag tier unlocked at a level.
pub fn flag_tier_for_level(level: f64) -> u8 {
    if level > 8.0 {
        4
    } else if level > 6.0 {
        3
    } else if level > 3.0 {
        2
    } else {
        1
    }
}

/// Highest shape tier unlocked at a level.
pub fn shape_tier_for_level(level: f64) -> u8 {
    if level > 4.0 {
        2
    } else {
        1
    }
}

/// Regional-indicator emoji for a two-letter ISO code.
pub fn flag_emoji(code: &str) -> String {
    code.to_ascii_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

/// Every distinct country name across both tables, in first-seen order.
pub fn all_country_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::with_capacity(COUNTRIES.len() + COUNTRY_SHAPES.len());
    for name in COUNTRY_SHAPES
        .iter()
        .map(|s| s.name)
        .chain(COUNTRIES.iter().map(|c| c.name))
    {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
