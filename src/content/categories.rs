//! Word categories for the odd-one-out task.
//!
//! Tier 1 is concrete and visual, tier 2 everyday and functional, tier 3 abstract.

pub struct WordCategory {
    pub key: &'static str,
    pub tier: u8,
    pub words: &'static [&'static str],
}

pub static CATEGORIES: &[WordCategory] = &[
    WordCategory {
        key: "ANIMALS",
        tier: 1,
        words: &[
            "Katze", "Hund", "Löwe", "Tiger", "Bär", "Wolf", "Fuchs", "Hase", "Maus", "Pferd",
            "Kuh", "Schwein", "Schaf", "Elefant", "Giraffe", "Affe",
        ],
    },
    WordCategory {
        key: "FRUITS",
        tier: 1,
        words: &[
            "Apfel", "Banane", "Orange", "Traube", "Zitrone", "Birne", "Pfirsich", "Kirsche",
            "Beere", "Melone", "Kiwi", "Ananas",
        ],
    },
    WordCategory {
        key: "COLORS",
        tier: 1,
        words: &[
            "Rot", "Blau", "Grün", "Gelb", "Pink", "Lila", "Orange", "Schwarz", "Weiß", "Grau",
            "Braun", "Türkis", "Gold", "Silber",
        ],
    },
    WordCategory {
        key: "FURNITURE",
        tier: 1,
        words: &[
            "Stuhl", "Tisch", "Bett", "Sofa", "Schreibtisch", "Lampe", "Teppich", "Regal",
            "Schrank", "Sessel", "Hocker",
        ],
    },
    WordCategory {
        key: "CLOTHES",
        tier: 1,
        words: &[
            "Hemd", "Hose", "Schuh", "Hut", "Mantel", "Socke", "Kleid", "Rock", "Jacke",
            "Handschuh", "Schal", "Mütze",
        ],
    },
    WordCategory {
        key: "VEHICLES",
        tier: 2,
        words: &[
            "Auto", "Bus", "LKW", "Fahrrad", "Zug", "Flugzeug", "Boot", "Schiff", "Taxi",
            "Motorrad", "U-Bahn",
        ],
    },
    WordCategory {
        key: "TOOLS",
        tier: 2,
        words: &[
            "Hammer", "Säge", "Bohrer", "Zange", "Schraube", "Nagel", "Axt", "Feile", "Pinsel",
            "Schlüssel",
        ],
    },
    WordCategory {
        key: "JOBS",
        tier: 2,
        words: &[
            "Arzt", "Koch", "Pilot", "Maler", "Bäcker", "Bauer", "Polizist", "Richter", "Lehrer",
            "Anwalt", "Feuerwehrmann",
        ],
    },
    WordCategory {
        key: "SPORTS",
        tier: 2,
        words: &[
            "Fußball", "Tennis", "Golf", "Rugby", "Hockey", "Judo", "Yoga", "Schwimmen", "Laufen",
            "Boxen",
        ],
    },
    WordCategory {
        key: "INSTRUMENTS",
        tier: 2,
        words: &[
            "Klavier", "Gitarre", "Trommel", "Flöte", "Geige", "Bass", "Harfe", "Trompete",
            "Saxophon",
        ],
    },
    WordCategory {
        key: "EMOTIONS",
        tier: 3,
        words: &[
            "Glück", "Trauer", "Wut", "Angst", "Freude", "Liebe", "Hass", "Hoffnung", "Neid",
            "Stolz", "Scham", "Mut",
        ],
    },
    WordCategory {
        key: "MATH_TERMS",
        tier: 3,
        words: &[
            "Plus", "Minus", "Summe", "Faktor", "Graph", "Linie", "Fläche", "Wurzel", "Teiler",
            "Bruch",
        ],
    },
    WordCategory {
        key: "WEATHER",
        tier: 3,
        words: &[
            "Regen", "Schnee", "Wind", "Sturm", "Wolke", "Hagel", "Nebel", "Hitze", "Frost",
            "Donner", "Blitz",
        ],
    },
    WordCategory {
        key: "PLANETS",
        tier: 3,
        words: &[
            "Erde", "Mars", "Venus", "Jupiter", "Saturn", "Pluto", "Mond", "Sonne", "Stern",
            "Komet",
        ],
    },
    WordCategory {
        key: "METALS",
        tier: 3,
        words: &[
            "Gold", "Silber", "Eisen", "Stahl", "Kupfer", "Zink", "Blei", "Zinn", "Messing",
            "Bronze", "Platin",
        ],
    },
];

/// Category tier for a task level: 1 up to 3, 2 up to 7, 3 above.
pub fn tier_for_level(level: f64) -> u8 {
    if level > 7.0 {
        3
    } else if level > 3.0 {
        2
    } else {
        1
    }
}
