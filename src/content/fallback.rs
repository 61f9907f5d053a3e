//! Small tables behind the legacy language types that older profiles still reference.

pub struct SynonymEntry {
    pub word: &'static str,
    pub synonyms: &'static [&'static str],
    pub hint: &'static str,
}

pub struct RhymeEntry {
    pub word: &'static str,
    pub rhymes: &'static [&'static str],
    pub hint: &'static str,
}

pub struct SentenceEntry {
    pub word1: &'static str,
    pub word2: &'static str,
    pub example: &'static str,
}

pub static SYNONYMS: &[SynonymEntry] = &[
    SynonymEntry {
        word: "groß",
        synonyms: &["riesig", "gewaltig", "enorm", "massiv"],
        hint: "Gegenteil von klein",
    },
    SynonymEntry {
        word: "schnell",
        synonyms: &["rasch", "flink", "zügig"],
        hint: "Gegenteil von langsam",
    },
];

pub static RHYMES: &[RhymeEntry] = &[
    RhymeEntry {
        word: "Haus",
        rhymes: &["Maus", "Laus", "raus", "Klaus"],
        hint: "Ein Gebäude",
    },
    RhymeEntry {
        word: "Hand",
        rhymes: &["Sand", "Land", "Band", "Wand"],
        hint: "Körperteil",
    },
];

pub static SENTENCES: &[SentenceEntry] = &[
    SentenceEntry {
        word1: "Sonne",
        word2: "Eis",
        example: "Die Sonne schmolz das Eis.",
    },
    SentenceEntry {
        word1: "Regen",
        word2: "Schirm",
        example: "Im Regen öffnete sie den Schirm.",
    },
];
