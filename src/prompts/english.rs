use super::{cefr_level_label, PromptTemplates};

pub(super) const TEMPLATES: PromptTemplates = PromptTemplates {
    name: "English",
    phonetic_hint: "IPA transcription, e.g. /ˈæp.əl/",
    level_hint: "A1/A2/B1/B2/C1/C2",
    pos_hint: "part of speech, e.g. n. / v. / adj.",
    grammar_fields: &[],
    card_rules: &[
        "Cover the most common senses first",
        "Mention irregular plural or past forms in the tips when they exist",
    ],
    card_focus: "Pay attention to pronunciation, common collocations and differences between British and American usage.",
    recommendation_rules: &[
        "Mix parts of speech (nouns, verbs, adjectives, adverbs)",
        "Include useful phrasal verbs only as single words, never as phrases",
    ],
    output_rules: &["Make sure every word is a valid English word"],
    sample_words: &["apple", "learn", "beautiful"],
    list_separator: ", ",
    level_label: cefr_level_label,
};
