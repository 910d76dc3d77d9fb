use crate::domain::ProficiencyLevel;

use super::{GrammarField, PromptTemplates};

pub(super) const TEMPLATES: PromptTemplates = PromptTemplates {
    name: "Japanese",
    phonetic_hint: "kana reading with pitch accent, e.g. たいせつ [0], no romaji",
    level_hint: "N5/N4/N3/N2/N1",
    pos_hint: "part of speech",
    grammar_fields: &[
        GrammarField {
            key: "conjugation",
            applies_to: "verbs",
            contents: "the masu, te, ta, nai, dictionary, volitional, imperative and conditional forms",
        },
        GrammarField {
            key: "inflection",
            applies_to: "adjectives",
            contents: "the plain, past, negative and past negative forms",
        },
    ],
    card_rules: &[
        "The phonetic field holds only kana and the pitch number, without romaji",
        "Nouns and adverbs need no grammar table",
    ],
    card_focus: "Consider kana, kanji, verb groups and adjective types.",
    recommendation_rules: &[
        "Mix parts of speech (nouns, verbs, adjectives)",
        "Kanji words, kana words and loanwords are all welcome",
    ],
    output_rules: &["Make sure every word is a valid Japanese word"],
    sample_words: &["こんにちは", "勉強", "食べる"],
    list_separator: "、",
    level_label,
};

fn level_label(level: ProficiencyLevel) -> &'static str {
    match level {
        ProficiencyLevel::Beginner | ProficiencyLevel::Elementary => "N5-N4 (beginner)",
        ProficiencyLevel::Intermediate | ProficiencyLevel::UpperIntermediate => {
            "N3-N2 (intermediate)"
        }
        ProficiencyLevel::Advanced | ProficiencyLevel::Proficient => "N2-N1 (advanced)",
    }
}
