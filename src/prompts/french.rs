use super::{cefr_level_label, GrammarField, PromptTemplates};

pub(super) const TEMPLATES: PromptTemplates = PromptTemplates {
    name: "French",
    phonetic_hint: "IPA transcription",
    level_hint: "A1/A2/B1/B2/C1/C2",
    pos_hint: "part of speech; mark the gender of nouns",
    grammar_fields: &[
        GrammarField {
            key: "conjugation",
            applies_to: "verbs",
            contents: "the present, passé composé and imparfait",
        },
        GrammarField {
            key: "inflection",
            applies_to: "adjectives",
            contents: "masculine/feminine and singular/plural forms",
        },
        GrammarField {
            key: "declension",
            applies_to: "nouns",
            contents: "singular and plural forms",
        },
    ],
    card_rules: &["Note liaison or elision in the tips when it applies"],
    card_focus: "Consider gender, verb conjugation and pronunciation.",
    recommendation_rules: &[
        "Mix parts of speech (nouns, verbs, adjectives)",
        "Balance masculine and feminine nouns",
    ],
    output_rules: &[
        "Make sure every word is a valid French word",
        "Do not add articles to nouns",
    ],
    sample_words: &["maison", "apprendre", "beau"],
    list_separator: ", ",
    level_label: cefr_level_label,
};
