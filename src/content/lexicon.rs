//! Word relation database
//!
//! Authored in a compact form (word → tier, part of speech, synonyms, antonyms) and
//! indexed once per process into id-keyed words and directed relation edges. Edges whose
//! partner word is not itself an entry are dropped during indexing.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::types::RelationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Adjective,
    Verb,
    Noun,
}

struct CompactEntry {
    word: &'static str,
    tier: u8,
    pos: PartOfSpeech,
    syns: &'static [&'static str],
    ants: &'static [&'static str],
}

const fn adj(
    word: &'static str,
    tier: u8,
    syns: &'static [&'static str],
    ants: &'static [&'static str],
) -> CompactEntry {
    CompactEntry { word, tier, pos: PartOfSpeech::Adjective, syns, ants }
}

const fn verb(
    word: &'static str,
    tier: u8,
    syns: &'static [&'static str],
    ants: &'static [&'static str],
) -> CompactEntry {
    CompactEntry { word, tier, pos: PartOfSpeech::Verb, syns, ants }
}

const fn noun(
    word: &'static str,
    tier: u8,
    syns: &'static [&'static str],
    ants: &'static [&'static str],
) -> CompactEntry {
    CompactEntry { word, tier, pos: PartOfSpeech::Noun, syns, ants }
}

static COMPACT_DB: &[CompactEntry] = &[
    // adjectives
    adj("gut", 1, &["toll", "super", "prima", "fein"], &["schlecht", "böse", "mies", "übel"]),
    adj("schlecht", 1, &["mies", "übel", "furchtbar"], &["gut", "toll", "super"]),
    adj("groß", 1, &["riesig", "gigantisch", "hoch"], &["klein", "winzig", "niedrig"]),
    adj("klein", 1, &["winzig", "gering"], &["groß", "riesig"]),
    adj("schnell", 1, &["rasch", "flink", "zügig"], &["langsam", "träge"]),
    adj("langsam", 1, &["träge", "gemächlich"], &["schnell", "rasch"]),
    adj("heiß", 1, &["warm", "brennend"], &["kalt", "eisig", "kühl"]),
    adj("kalt", 1, &["eisig", "kühl", "frostig"], &["heiß", "warm"]),
    adj("neu", 1, &["frisch", "modern"], &["alt", "veraltet"]),
    adj("alt", 1, &["betagt", "antik"], &["neu", "jung", "modern"]),
    adj("toll", 1, &["super", "prima"], &["mies"]),
    adj("super", 1, &[], &[]),
    adj("prima", 1, &[], &[]),
    adj("fein", 2, &[], &[]),
    adj("böse", 1, &[], &["gut"]),
    adj("mies", 1, &[], &[]),
    adj("übel", 2, &[], &[]),
    adj("furchtbar", 2, &[], &[]),
    adj("riesig", 1, &["gigantisch"], &["winzig"]),
    adj("gigantisch", 2, &[], &[]),
    adj("hoch", 1, &[], &["niedrig"]),
    adj("winzig", 1, &[], &["riesig"]),
    adj("niedrig", 1, &[], &["hoch"]),
    adj("gering", 2, &[], &[]),
    adj("rasch", 2, &[], &[]),
    adj("flink", 2, &[], &[]),
    adj("zügig", 2, &[], &[]),
    adj("träge", 2, &[], &[]),
    adj("gemächlich", 3, &[], &[]),
    adj("warm", 1, &[], &["kühl"]),
    adj("brennend", 2, &[], &[]),
    adj("eisig", 2, &[], &[]),
    adj("kühl", 1, &[], &["warm"]),
    adj("frostig", 2, &[], &[]),
    adj("frisch", 1, &[], &[]),
    adj("modern", 2, &[], &["veraltet"]),
    adj("veraltet", 2, &[], &[]),
    adj("betagt", 3, &[], &[]),
    adj("antik", 3, &[], &[]),
    adj("jung", 1, &[], &["alt"]),
    adj("mutig", 2, &["tapfer", "kühn"], &["feige", "ängstlich"]),
    adj("feige", 2, &["ängstlich"], &["mutig", "tapfer"]),
    adj("tapfer", 2, &[], &[]),
    adj("kühn", 3, &[], &[]),
    adj("ängstlich", 2, &[], &[]),
    adj("fröhlich", 2, &["heiter", "lustig"], &["traurig", "betrübt"]),
    adj("traurig", 2, &["betrübt"], &["fröhlich", "heiter"]),
    adj("heiter", 2, &[], &[]),
    adj("lustig", 1, &[], &[]),
    adj("betrübt", 3, &[], &[]),
    adj("reich", 2, &["wohlhabend"], &["arm"]),
    adj("arm", 2, &["mittellos"], &["reich", "wohlhabend"]),
    adj("wohlhabend", 3, &[], &[]),
    adj("mittellos", 3, &[], &[]),
    adj("großzügig", 3, &["freigebig"], &["geizig"]),
    adj("geizig", 3, &["knauserig"], &["großzügig"]),
    adj("freigebig", 4, &[], &[]),
    adj("knauserig", 4, &[], &[]),
    adj("ehrlich", 3, &["aufrichtig"], &["verlogen"]),
    adj("aufrichtig", 3, &[], &[]),
    adj("verlogen", 3, &[], &[]),
    adj("vergänglich", 4, &["flüchtig"], &["ewig"]),
    adj("ewig", 3, &["unendlich"], &["vergänglich"]),
    adj("flüchtig", 4, &[], &[]),
    adj("unendlich", 3, &[], &[]),
    adj("präzise", 4, &["genau", "exakt"], &["ungenau", "vage"]),
    adj("genau", 2, &["exakt"], &["ungenau"]),
    adj("exakt", 3, &[], &[]),
    adj("ungenau", 3, &[], &[]),
    adj("vage", 4, &[], &[]),
    // verbs
    verb("laufen", 1, &["rennen", "gehen"], &["stehen"]),
    verb("rennen", 1, &["sprinten"], &["schlendern"]),
    verb("gehen", 1, &[], &["stehen"]),
    verb("stehen", 1, &["verharren"], &["laufen", "gehen"]),
    verb("geben", 1, &["schenken"], &["nehmen"]),
    verb("nehmen", 1, &["greifen"], &["geben"]),
    verb("schenken", 1, &[], &[]),
    verb("greifen", 2, &[], &[]),
    verb("öffnen", 1, &["aufmachen"], &["schließen"]),
    verb("schließen", 1, &["zumachen"], &["öffnen"]),
    verb("aufmachen", 1, &[], &["zumachen"]),
    verb("zumachen", 1, &[], &["aufmachen"]),
    verb("sprinten", 2, &[], &[]),
    verb("schlendern", 3, &[], &[]),
    verb("verharren", 4, &[], &[]),
    verb("beginnen", 2, &["anfangen", "starten"], &["beenden", "aufhören"]),
    verb("beenden", 2, &["abschließen"], &["beginnen"]),
    verb("anfangen", 1, &[], &["aufhören"]),
    verb("starten", 2, &[], &[]),
    verb("aufhören", 2, &[], &["anfangen"]),
    verb("abschließen", 3, &[], &[]),
    verb("lachen", 1, &["kichern"], &["weinen"]),
    verb("weinen", 1, &["schluchzen"], &["lachen"]),
    verb("kichern", 2, &[], &[]),
    verb("schluchzen", 3, &[], &[]),
    verb("loben", 3, &["preisen"], &["tadeln", "kritisieren"]),
    verb("tadeln", 3, &["rügen"], &["loben"]),
    verb("preisen", 4, &[], &[]),
    verb("rügen", 4, &[], &[]),
    verb("kritisieren", 3, &[], &["loben"]),
    // nouns
    noun("Mann", 1, &["Herr", "Kerl"], &["Frau", "Dame"]),
    noun("Frau", 1, &["Dame"], &["Mann", "Herr"]),
    noun("Herr", 1, &[], &["Dame"]),
    noun("Kerl", 2, &[], &[]),
    noun("Dame", 1, &[], &["Herr"]),
    noun("Tag", 1, &["Tageslicht"], &["Nacht"]),
    noun("Nacht", 1, &["Dunkelheit"], &["Tag"]),
    noun("Tageslicht", 2, &[], &["Dunkelheit"]),
    noun("Dunkelheit", 2, &[], &["Tageslicht"]),
    noun("Anfang", 2, &["Beginn", "Start"], &["Ende", "Schluss"]),
    noun("Ende", 2, &["Schluss"], &["Anfang", "Beginn"]),
    noun("Beginn", 2, &[], &["Schluss"]),
    noun("Start", 2, &[], &[]),
    noun("Schluss", 2, &[], &["Beginn"]),
    noun("Freund", 1, &["Kumpel"], &["Feind", "Gegner"]),
    noun("Feind", 2, &["Gegner"], &["Freund"]),
    noun("Kumpel", 2, &[], &[]),
    noun("Gegner", 2, &[], &[]),
    noun("Krieg", 3, &["Kampf"], &["Frieden"]),
    noun("Frieden", 3, &["Ruhe"], &["Krieg"]),
    noun("Kampf", 3, &[], &[]),
    noun("Ruhe", 2, &[], &[]),
    noun("Reichtum", 3, &["Wohlstand"], &["Armut"]),
    noun("Armut", 3, &["Not"], &["Reichtum", "Wohlstand"]),
    noun("Wohlstand", 4, &[], &[]),
    noun("Not", 3, &[], &[]),
];

#[derive(Debug, Clone)]
pub struct LexiconWord {
    pub id: usize,
    pub text: &'static str,
    pub tier: u8,
    pub pos: PartOfSpeech,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    pub target: usize,
    pub partner: usize,
}

/// Immutable word/relation lookup tables.
#[derive(Debug)]
pub struct Lexicon {
    words: Vec<LexiconWord>,
    relations: Vec<Relation>,
    by_text: HashMap<&'static str, usize>,
}

static LEXICON: OnceLock<Lexicon> = OnceLock::new();

/// Shared index, built on first access. Safe to call from concurrent generators.
pub fn lexicon() -> &'static Lexicon {
    LEXICON.get_or_init(|| {
        let lexicon = Lexicon::build();
        tracing::debug!(
            words = lexicon.words.len(),
            relations = lexicon.relations.len(),
            "lexicon indexed"
        );
        lexicon
    })
}

impl Lexicon {
    fn build() -> Self {
        let mut words = Vec::with_capacity(COMPACT_DB.len());
        let mut by_text = HashMap::with_capacity(COMPACT_DB.len());

        for entry in COMPACT_DB {
            if by_text.contains_key(entry.word) {
                continue;
            }
            let id = words.len();
            by_text.insert(entry.word, id);
            words.push(LexiconWord {
                id,
                text: entry.word,
                tier: entry.tier,
                pos: entry.pos,
            });
        }

        let mut relations = Vec::new();
        for entry in COMPACT_DB {
            let Some(&target) = by_text.get(entry.word) else {
                continue;
            };
            let edges = entry
                .syns
                .iter()
                .map(|w| (RelationKind::Synonym, w))
                .chain(entry.ants.iter().map(|w| (RelationKind::Antonym, w)));
            for (kind, partner_text) in edges {
                if let Some(&partner) = by_text.get(partner_text) {
                    if partner != target {
                        relations.push(Relation {
                            kind,
                            target,
                            partner,
                        });
                    }
                }
            }
        }

        Self {
            words,
            relations,
            by_text,
        }
    }

    pub fn words(&self) -> &[LexiconWord] {
        &self.words
    }

    pub fn word(&self, id: usize) -> &LexiconWord {
        &self.words[id]
    }

    pub fn lookup(&self, text: &str) -> Option<&LexiconWord> {
        self.by_text.get(text).map(|&id| &self.words[id])
    }

    pub fn relations(&self, kind: RelationKind) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(move |r| r.kind == kind)
    }

    /// True when `a` and `b` are linked by `kind` in either direction.
    pub fn related(&self, a: usize, b: usize, kind: RelationKind) -> bool {
        self.relations.iter().any(|r| {
            r.kind == kind
                && ((r.target == a && r.partner == b) || (r.target == b && r.partner == a))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_built_once() {
        let first = lexicon() as *const Lexicon;
        let second = lexicon() as *const Lexicon;
        assert_eq!(first, second);
    }

    #[test]
    fn test_relations_point_at_known_words() {
        let lex = lexicon();
        assert!(lex.relations(RelationKind::Antonym).count() > 20);
        assert!(lex.relations(RelationKind::Synonym).count() > 20);
        for rel in lex.relations(RelationKind::Synonym) {
            assert!(rel.target < lex.words().len());
            assert!(rel.partner < lex.words().len());
        }
    }

    #[test]
    fn test_related_is_symmetric() {
        let lex = lexicon();
        let gut = lex.lookup("gut").unwrap().id;
        let schlecht = lex.lookup("schlecht").unwrap().id;
        assert!(lex.related(gut, schlecht, RelationKind::Antonym));
        assert!(lex.related(schlecht, gut, RelationKind::Antonym));
        assert!(!lex.related(gut, schlecht, RelationKind::Synonym));
    }

    #[test]
    fn test_every_part_of_speech_has_distractor_depth() {
        let lex = lexicon();
        for pos in [PartOfSpeech::Adjective, PartOfSpeech::Verb, PartOfSpeech::Noun] {
            assert!(lex.words().iter().filter(|w| w.pos == pos).count() >= 10);
        }
    }
}
