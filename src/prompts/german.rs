use super::{cefr_level_label, GrammarField, PromptTemplates};

pub(super) const TEMPLATES: PromptTemplates = PromptTemplates {
    name: "German",
    phonetic_hint: "IPA transcription",
    level_hint: "A1/A2/B1/B2/C1/C2",
    pos_hint: "part of speech; mark the gender of nouns",
    grammar_fields: &[
        GrammarField {
            key: "conjugation",
            applies_to: "verbs",
            contents: "the present and past conjugation",
        },
        GrammarField {
            key: "inflection",
            applies_to: "adjectives",
            contents: "endings by gender (masculine/feminine/neuter) and number",
        },
        GrammarField {
            key: "declension",
            applies_to: "nouns",
            contents: "all four cases in singular and plural",
        },
    ],
    card_rules: &["Give nouns with their article in the examples"],
    card_focus: "Consider grammatical gender, the four cases and compound words.",
    recommendation_rules: &[
        "Mix parts of speech (nouns, verbs, adjectives)",
        "Balance masculine, feminine and neuter nouns",
    ],
    output_rules: &[
        "Make sure every word is a valid German word",
        "Do not add articles to nouns",
    ],
    sample_words: &["Haus", "lernen", "schön"],
    list_separator: ", ",
    level_label: cefr_level_label,
};
