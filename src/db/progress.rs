//! Learned-word tracking per language

use chrono::Utc;
use rusqlite::{params, Connection};

use crate::domain::{Language, LanguageProgress, LearningStats, ProficiencyLevel};

use super::collections::{format_timestamp, parse_timestamp};
use super::StoreResult;

/// Record words as learned. Words are lower-cased; repeats are ignored.
/// Returns how many words were new.
pub fn record_learned_words(
    conn: &Connection,
    language: Language,
    words: &[String],
) -> StoreResult<usize> {
    let now = format_timestamp(Utc::now());
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO learned_words (language, word, learned_at) VALUES (?1, ?2, ?3)",
        )?;
        for word in words {
            let word = word.trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            inserted += stmt.execute(params![language.as_str(), word, now])?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

/// Learned words in the order they were first recorded
pub fn get_learned_words(conn: &Connection, language: Language) -> StoreResult<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT word FROM learned_words WHERE language = ?1 ORDER BY rowid")?;
    let words = stmt
        .query_map(params![language.as_str()], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(words)
}

pub fn get_learning_stats(conn: &Connection, language: Language) -> StoreResult<LearningStats> {
    let (count, last): (i64, Option<String>) = conn.query_row(
        "SELECT COUNT(*), MAX(learned_at) FROM learned_words WHERE language = ?1",
        params![language.as_str()],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(LearningStats::from_count(
        count as usize,
        last.as_deref().and_then(parse_timestamp),
    ))
}

/// Progress for every catalog language, in catalog order
pub fn get_progress_overview(
    conn: &Connection,
) -> StoreResult<Vec<(Language, LanguageProgress)>> {
    Language::ALL
        .into_iter()
        .map(|language| {
            let learned_words = get_learned_words(conn, language)?;
            Ok((
                language,
                LanguageProgress {
                    level: ProficiencyLevel::from_word_count(learned_words.len()),
                    total_words: learned_words.len(),
                    learned_words,
                },
            ))
        })
        .collect()
}
