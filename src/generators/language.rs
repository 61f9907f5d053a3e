//! Language family: odd-one-out, word relations, flags, border shapes, and the legacy
//! synonym / rhyme / sentence prompts.

use rand::seq::SliceRandom;
use rand::Rng;
use rand::RngCore;

use super::{place_answer, Generated};
use crate::content::categories::{tier_for_level, WordCategory, CATEGORIES};
use crate::content::fallback::{RHYMES, SENTENCES, SYNONYMS};
use crate::content::filter_or_all;
use crate::content::geography::{
    all_country_names, flag_emoji, flag_tier_for_level, shape_tier_for_level, COUNTRIES,
    COUNTRY_SHAPES,
};
use crate::content::lexicon::{lexicon, LexiconWord};
use crate::types::{RelationKind, Solution, TaskContent, TaskType};

const GEO_DISTRACTORS: usize = 3;

pub(super) fn generate(task_type: TaskType, level: f64, rng: &mut dyn RngCore) -> Generated {
    match task_type {
        TaskType::LangOddOneOut => odd_one_out(level, rng),
        TaskType::LangConnect => connect(level, rng),
        TaskType::LangFlag => flag(level, rng),
        TaskType::LangMap => map(level, rng),
        TaskType::LangSynonym => synonym(rng),
        TaskType::LangRhyme => rhyme(rng),
        _ => sentence(rng),
    }
}

fn option_count(level: f64, threshold: f64) -> usize {
    if level > threshold {
        4
    } else {
        3
    }
}

fn multiple_choice(question: &str, content: TaskContent, correct_index: usize) -> Generated {
    Generated {
        question: question.to_string(),
        content,
        solution: Solution::Index(correct_index),
    }
}

// ==================== Odd One Out ====================

fn odd_one_out(level: f64, rng: &mut dyn RngCore) -> Generated {
    let tier = tier_for_level(level);
    let eligible = filter_or_all(CATEGORIES, |c| c.tier == tier);
    let Some(&base) = eligible.choose(&mut *rng) else {
        return Generated::empty();
    };

    let mut base_words: Vec<&'static str> = base
        .words
        .choose_multiple(&mut *rng, option_count(level, 2.0) - 1)
        .copied()
        .collect();
    base_words.shuffle(&mut *rng);

    let Some((odd_category, odd_word)) = pick_odd_word(base, &base_words, rng) else {
        return Generated::empty();
    };

    let hint = format!(
        "Eines ist {}, die anderen sind {}.",
        odd_category.key, base.key
    );
    let base_words = base_words.into_iter().map(str::to_string).collect();
    let (options, odd_index) = place_answer(odd_word.to_string(), base_words, rng);

    multiple_choice(
        "Was passt nicht?",
        TaskContent::OddOneOut {
            options,
            odd_index,
            hint,
        },
        odd_index,
    )
}

/// True when some category holds `word` together with every base word, which would make
/// the task ambiguous ("Gold" next to "Silber" and "Rot").
fn shares_category(word: &str, base_words: &[&str]) -> bool {
    CATEGORIES.iter().any(|c| {
        c.words.contains(&word) && base_words.iter().all(|b| c.words.contains(b))
    })
}

fn unambiguous_words(
    category: &'static WordCategory,
    base_words: &[&str],
) -> Vec<(&'static WordCategory, &'static str)> {
    category
        .words
        .iter()
        .filter(|w| !shares_category(w, base_words))
        .map(|&w| (category, w))
        .collect()
}

/// An odd word from another category, drawn category-first so small categories are not
/// under-represented.
fn pick_odd_word(
    base: &WordCategory,
    base_words: &[&str],
    rng: &mut dyn RngCore,
) -> Option<(&'static WordCategory, &'static str)> {
    let others: Vec<&'static WordCategory> =
        CATEGORIES.iter().filter(|c| c.key != base.key).collect();

    if let Some(&category) = others.choose(&mut *rng) {
        let words = unambiguous_words(category, base_words);
        if let Some(&picked) = words.choose(&mut *rng) {
            return Some(picked);
        }
    }

    let all: Vec<_> = others
        .into_iter()
        .flat_map(|c| unambiguous_words(c, base_words))
        .collect();
    all.choose(rng).copied()
}

// ==================== Connect ====================

fn connect_tier(level: f64) -> u8 {
    if level > 8.0 {
        3
    } else if level > 3.0 {
        2
    } else {
        1
    }
}

fn connect(level: f64, rng: &mut dyn RngCore) -> Generated {
    let lex = lexicon();
    let mode = if level <= 2.0 || rng.gen_bool(0.5) {
        RelationKind::Antonym
    } else {
        RelationKind::Synonym
    };
    let target_tier = connect_tier(level) as i16;

    let of_mode: Vec<_> = lex.relations(mode).collect();
    let candidates = filter_or_all(&of_mode, |r| {
        (lex.word(r.target).tier as i16 - target_tier).abs() <= 1
    });
    let Some(relation) = candidates.choose(&mut *rng) else {
        tracing::warn!(?mode, "lexicon has no relations of this kind");
        return Generated::empty();
    };

    let target = lex.word(relation.target);
    let answer = lex.word(relation.partner);
    let wanted = option_count(level, 4.0) - 1;

    let excluded = |w: &LexiconWord| {
        w.id == target.id
            || w.id == answer.id
            || lex.related(target.id, w.id, mode)
            || w.text == answer.text
    };
    let same_pos: Vec<&LexiconWord> = lex
        .words()
        .iter()
        .filter(|w| w.pos == target.pos && !excluded(*w))
        .collect();
    let mut distractors: Vec<String> = same_pos
        .choose_multiple(&mut *rng, wanted)
        .map(|w| w.text.to_string())
        .collect();

    if distractors.len() < wanted {
        let others: Vec<&LexiconWord> = lex
            .words()
            .iter()
            .filter(|w| w.pos != target.pos && !excluded(*w))
            .collect();
        distractors.extend(
            others
                .choose_multiple(&mut *rng, wanted - distractors.len())
                .map(|w| w.text.to_string()),
        );
    }
    distractors.shuffle(&mut *rng);

    let (options, correct_index) = place_answer(answer.text.to_string(), distractors, rng);

    multiple_choice(
        "Verbinde Wörter",
        TaskContent::Connect {
            mode,
            target: target.text.to_string(),
            options,
            correct_index,
            answer: answer.text.to_string(),
        },
        correct_index,
    )
}

// ==================== Geography ====================

fn geo_distractors(
    names: &[&'static str],
    answer: &str,
    rng: &mut dyn RngCore,
) -> Vec<String> {
    let pool: Vec<&&str> = names.iter().filter(|n| **n != answer).collect();
    let mut picked: Vec<String> = pool
        .choose_multiple(&mut *rng, GEO_DISTRACTORS)
        .map(|n| n.to_string())
        .collect();
    picked.shuffle(rng);
    picked
}

fn flag(level: f64, rng: &mut dyn RngCore) -> Generated {
    let max_tier = flag_tier_for_level(level);
    let pool = filter_or_all(COUNTRIES, |c| c.tier <= max_tier);
    let Some(&country) = pool.choose(&mut *rng) else {
        return Generated::empty();
    };

    let names: Vec<&'static str> = COUNTRIES.iter().map(|c| c.name).collect();
    let distractors = geo_distractors(&names, country.name, rng);
    let (options, correct_index) = place_answer(country.name.to_string(), distractors, rng);

    multiple_choice(
        "Welches Land ist das?",
        TaskContent::Flag {
            flag: flag_emoji(country.code),
            options,
            correct_index,
            country_name: country.name.to_string(),
        },
        correct_index,
    )
}

fn map(level: f64, rng: &mut dyn RngCore) -> Generated {
    let max_tier = shape_tier_for_level(level);
    let pool = filter_or_all(COUNTRY_SHAPES, |s| s.tier <= max_tier);
    let Some(&shape) = pool.choose(&mut *rng) else {
        return Generated::empty();
    };

    let distractors = geo_distractors(&all_country_names(), shape.name, rng);
    let (options, correct_index) = place_answer(shape.name.to_string(), distractors, rng);

    multiple_choice(
        "Welche Grenze ist das?",
        TaskContent::Map {
            path: shape.path.to_string(),
            view_box: shape.view_box.to_string(),
            options,
            correct_index,
            country_name: shape.name.to_string(),
        },
        correct_index,
    )
}

// ==================== Legacy ====================

fn synonym(rng: &mut dyn RngCore) -> Generated {
    let Some(entry) = SYNONYMS.choose(rng) else {
        return Generated::empty();
    };
    Generated {
        question: format!("Finde Synonyme für „{}“", entry.word),
        content: TaskContent::Synonym {
            word: entry.word.to_string(),
            synonyms: entry.synonyms.iter().map(|s| s.to_string()).collect(),
            hint: entry.hint.to_string(),
        },
        solution: Solution::Interactive,
    }
}

fn rhyme(rng: &mut dyn RngCore) -> Generated {
    let Some(entry) = RHYMES.choose(rng) else {
        return Generated::empty();
    };
    Generated {
        question: format!("Was reimt sich auf „{}“?", entry.word),
        content: TaskContent::Rhyme {
            word: entry.word.to_string(),
            rhymes: entry.rhymes.iter().map(|s| s.to_string()).collect(),
            hint: entry.hint.to_string(),
        },
        solution: Solution::Interactive,
    }
}

fn sentence(rng: &mut dyn RngCore) -> Generated {
    let Some(entry) = SENTENCES.choose(rng) else {
        return Generated::empty();
    };
    Generated {
        question: format!("Bilde einen Satz mit „{}“ und „{}“", entry.word1, entry.word2),
        content: TaskContent::Sentence {
            word1: entry.word1.to_string(),
            word2: entry.word2.to_string(),
            example_sentence: entry.example.to_string(),
        },
        solution: Solution::Interactive,
    }
}
