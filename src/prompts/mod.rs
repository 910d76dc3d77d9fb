//! Prompt text for card generation and word recommendation.
//!
//! Each language contributes a static [`PromptTemplates`] table; the builders
//! here render those tables into the final prompt strings. Builders never fail.

mod english;
mod french;
mod german;
mod japanese;

use std::fmt::Write;

use crate::config::RECENT_KNOWN_WORDS_LIMIT;
use crate::domain::{Language, LearningStats, ProficiencyLevel};
use crate::services::KnownWords;

/// Language the learner reads explanations in
pub const NATIVE_LANGUAGE: &str = "Simplified Chinese";

/// An optional grammar table the model should fill for some parts of speech
pub struct GrammarField {
    pub key: &'static str,
    pub applies_to: &'static str,
    pub contents: &'static str,
}

/// Per-language prompt material
pub struct PromptTemplates {
    pub name: &'static str,
    /// Hint placed in the `phonetic` slot of the card skeleton
    pub phonetic_hint: &'static str,
    /// Hint placed in the `level` slot of the card skeleton
    pub level_hint: &'static str,
    pub pos_hint: &'static str,
    pub grammar_fields: &'static [GrammarField],
    /// Extra card rules beyond the shared ones
    pub card_rules: &'static [&'static str],
    /// What the card system message asks the model to pay attention to
    pub card_focus: &'static str,
    pub recommendation_rules: &'static [&'static str],
    pub output_rules: &'static [&'static str],
    pub sample_words: &'static [&'static str],
    /// Joins the known-word list inside prompts
    pub list_separator: &'static str,
    pub level_label: fn(ProficiencyLevel) -> &'static str,
}

pub fn templates(language: Language) -> &'static PromptTemplates {
    match language {
        Language::English => &english::TEMPLATES,
        Language::German => &german::TEMPLATES,
        Language::French => &french::TEMPLATES,
        Language::Japanese => &japanese::TEMPLATES,
    }
}

/// How a proficiency level is described to the model for this language
pub fn level_label(language: Language, level: ProficiencyLevel) -> &'static str {
    (templates(language).level_label)(level)
}

pub fn card_prompt(language: Language, word: &str) -> String {
    let t = templates(language);
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Create a study card for the {} word \"{}\".", t.name, word);
    let _ = writeln!(
        prompt,
        "Replace every bracketed placeholder with real content. Never leave a [placeholder] in the output.\n"
    );
    let _ = writeln!(prompt, "Return exactly one valid JSON object with this structure:\n");
    let _ = writeln!(prompt, "{{");
    let _ = writeln!(prompt, "  \"word\": \"{}\",", word);
    let _ = writeln!(prompt, "  \"phonetic\": \"[{}]\",", t.phonetic_hint);
    let _ = writeln!(prompt, "  \"level\": \"[{}]\",", t.level_hint);
    let _ = writeln!(prompt, "  \"definitions\": [");
    for (i, last) in [(1, false), (2, true)] {
        let _ = writeln!(prompt, "    {{");
        let _ = writeln!(prompt, "      \"pos\": \"[{}]\",", t.pos_hint);
        let _ = writeln!(prompt, "      \"meaning\": \"[meaning {} in {}]\",", i, NATIVE_LANGUAGE);
        let _ = writeln!(prompt, "      \"example\": {{");
        let _ = writeln!(prompt, "        \"sentence\": \"[{} example sentence]\",", t.name);
        let _ = writeln!(prompt, "        \"translation\": \"[{} translation]\"", NATIVE_LANGUAGE);
        let _ = writeln!(prompt, "      }}");
        let _ = writeln!(prompt, "    }}{}", if last { "" } else { "," });
    }
    let _ = writeln!(prompt, "  ],");
    for field in t.grammar_fields {
        let _ = writeln!(
            prompt,
            "  \"{}\": \"[{}: an HTML table of {}]\",",
            field.key, field.applies_to, field.contents
        );
    }
    let _ = writeln!(prompt, "  \"etymology\": \"[origin of the word, in {}]\",", NATIVE_LANGUAGE);
    let _ = writeln!(prompt, "  \"tips\": \"[study tips, in {}]\"", NATIVE_LANGUAGE);
    let _ = writeln!(prompt, "}}\n");

    let _ = writeln!(prompt, "Requirements:");
    let mut rules: Vec<String> = t
        .grammar_fields
        .iter()
        .map(|f| format!("{} must include \"{}\"", capitalize(f.applies_to), f.key))
        .collect();
    rules.push("Give at least 2 definitions, each with an example sentence and its translation".to_string());
    rules.extend(t.card_rules.iter().map(|r| r.to_string()));
    rules.push(format!("Write every explanation in {}", NATIVE_LANGUAGE));
    rules.push("Return only the JSON object, without markdown fences".to_string());
    push_numbered(&mut prompt, &rules);

    prompt
}

pub fn recommendation_prompt(
    language: Language,
    known_words: &KnownWords,
    stats: &LearningStats,
    count: usize,
) -> String {
    let t = templates(language);
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "I am learning {}. My current level is {} and I have learned {} words.\n",
        t.name,
        level_label(language, stats.level),
        stats.total_words
    );
    push_known_words(&mut prompt, t, known_words);
    let _ = writeln!(
        prompt,
        "Based on my progress, recommend {} {} words that suit my current level.\n",
        count, t.name
    );

    let _ = writeln!(prompt, "Requirements:");
    let mut rules = vec![
        "Match the difficulty to my current level".to_string(),
        "Never recommend a word I have already learned".to_string(),
        "Prefer common, practical words".to_string(),
        "Keep the words loosely related by topic".to_string(),
    ];
    rules.extend(t.recommendation_rules.iter().map(|r| r.to_string()));
    push_numbered(&mut prompt, &rules);

    push_output_contract(&mut prompt, t);
    prompt
}

pub fn custom_prompt(
    language: Language,
    user_request: &str,
    known_words: &KnownWords,
    count: usize,
) -> String {
    let t = templates(language);
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Learner request: {}\n", user_request.trim());
    push_known_words(&mut prompt, t, known_words);
    let _ = writeln!(
        prompt,
        "Following the learner's request, recommend {} suitable {} words.\n",
        count, t.name
    );

    let _ = writeln!(prompt, "Requirements:");
    push_numbered(
        &mut prompt,
        &[
            "Follow the learner's description closely".to_string(),
            "Never recommend a word the learner has already learned".to_string(),
            "Prefer practical, common words".to_string(),
            "Respect any difficulty level or topic the learner names".to_string(),
        ],
    );

    push_output_contract(&mut prompt, t);
    prompt
}

pub fn card_system_message(language: Language) -> String {
    let t = templates(language);
    format!(
        "You are a professional {} language teaching assistant. Analyse {} words using exactly the JSON structure you are given. \
         Always return the complete JSON object with every field filled in, never partial data or an error message. \
         Replace all bracketed placeholders with real content. {}",
        t.name, t.name, t.card_focus
    )
}

pub fn recommendation_system_message(language: Language) -> String {
    let name = templates(language).name;
    format!(
        r#"You are a professional {name} language learning consultant. Your ONLY task is to return a list of words.

Rules:
1. Return ONLY words, one per line
2. Return exactly the number of words requested
3. No numbers, punctuation, explanations or formatting
4. No introductions such as "Here are the words:" and no closing remarks
5. Do not recommend words the user already knows

Correct output when 3 words are requested:
apple
banana
orange

Your response must contain only the word list."#
    )
}

fn push_known_words(prompt: &mut String, t: &PromptTemplates, known_words: &KnownWords) {
    let recent = known_words.recent(RECENT_KNOWN_WORDS_LIMIT);
    let listed = if recent.is_empty() {
        "(none yet)".to_string()
    } else {
        recent.join(t.list_separator)
    };
    let _ = writeln!(prompt, "Words already learned (do not recommend these):\n{}\n", listed);
}

fn push_output_contract(prompt: &mut String, t: &PromptTemplates) {
    let _ = writeln!(prompt, "\nOutput format:");
    let _ = writeln!(prompt, "- Return only the word list, one word per line");
    let _ = writeln!(prompt, "- No numbering, punctuation or other notes");
    let _ = writeln!(prompt, "- No explanations or commentary");
    for rule in t.output_rules {
        let _ = writeln!(prompt, "- {}", rule);
    }
    let _ = writeln!(prompt, "\nExample output:");
    let _ = write!(prompt, "{}", t.sample_words.join("\n"));
}

fn push_numbered(prompt: &mut String, rules: &[String]) {
    for (i, rule) in rules.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {}", i + 1, rule);
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// CEFR labels shared by the European languages
fn cefr_level_label(level: ProficiencyLevel) -> &'static str {
    match level {
        ProficiencyLevel::Beginner => "A1-A2 (beginner)",
        ProficiencyLevel::Elementary => "A2-B1 (elementary)",
        ProficiencyLevel::Intermediate => "B1-B2 (intermediate)",
        ProficiencyLevel::UpperIntermediate => "B2-C1 (upper intermediate)",
        ProficiencyLevel::Advanced => "C1-C2 (advanced)",
        ProficiencyLevel::Proficient => "C2 (proficient)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> KnownWords {
        list.iter().collect()
    }

    #[test]
    fn test_every_language_has_templates() {
        for language in Language::ALL {
            let t = templates(language);
            assert_eq!(t.name, language.info().name);
            assert!(!t.sample_words.is_empty());
        }
    }

    #[test]
    fn test_card_prompt_mentions_word_and_fields() {
        let prompt = card_prompt(Language::German, "Haus");
        assert!(prompt.contains("\"Haus\""));
        for key in ["phonetic", "level", "definitions", "etymology", "tips", "declension"] {
            assert!(prompt.contains(key), "missing {}", key);
        }
        assert!(prompt.contains(NATIVE_LANGUAGE));
        assert!(prompt.contains("at least 2 definitions"));
    }

    #[test]
    fn test_english_card_prompt_has_no_grammar_tables() {
        let prompt = card_prompt(Language::English, "apple");
        assert!(!prompt.contains("declension"));
        assert!(!prompt.contains("conjugation"));
    }

    #[test]
    fn test_japanese_card_prompt_fields() {
        let prompt = card_prompt(Language::Japanese, "食べる");
        assert!(prompt.contains("conjugation"));
        assert!(prompt.contains("inflection"));
        assert!(!prompt.contains("declension"));
        assert!(prompt.contains("N5/N4/N3/N2/N1"));
    }

    #[test]
    fn test_recommendation_prompt_lists_recent_known_words() {
        let known: KnownWords = (0..60).map(|i| format!("word{}", i)).collect();
        let stats = LearningStats::from_count(60, None);
        let prompt = recommendation_prompt(Language::English, &known, &stats, 7);

        assert!(prompt.contains("recommend 7 English words"));
        assert!(prompt.contains("learned 60 words"));
        assert!(prompt.contains("A2-B1"));
        // Only the most recent 50 are listed
        assert!(prompt.contains("word10, word11"));
        assert!(prompt.contains("word59"));
        assert!(!prompt.contains("word9,"));
        assert!(prompt.contains("one word per line"));
    }

    #[test]
    fn test_recommendation_prompt_without_known_words() {
        let prompt =
            recommendation_prompt(Language::French, &KnownWords::new(), &LearningStats::default(), 3);
        assert!(prompt.contains("(none yet)"));
    }

    #[test]
    fn test_japanese_list_separator() {
        let prompt = custom_prompt(
            Language::Japanese,
            "food words",
            &words(&["本", "猫"]),
            5,
        );
        assert!(prompt.contains("本、猫"));
        assert!(prompt.contains("Learner request: food words"));
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(
            level_label(Language::German, ProficiencyLevel::Intermediate),
            "B1-B2 (intermediate)"
        );
        assert_eq!(
            level_label(Language::Japanese, ProficiencyLevel::Elementary),
            "N5-N4 (beginner)"
        );
        assert_eq!(
            level_label(Language::Japanese, ProficiencyLevel::UpperIntermediate),
            "N3-N2 (intermediate)"
        );
        assert_eq!(
            level_label(Language::Japanese, ProficiencyLevel::Proficient),
            "N2-N1 (advanced)"
        );
    }

    #[test]
    fn test_system_messages() {
        let card = card_system_message(Language::French);
        assert!(card.contains("French"));
        assert!(card.contains("JSON"));

        let rec = recommendation_system_message(Language::Japanese);
        assert!(rec.contains("Japanese"));
        assert!(rec.contains("one per line"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("verbs"), "Verbs");
        assert_eq!(capitalize(""), "");
    }
}
