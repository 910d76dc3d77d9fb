//! Collection persistence: one row per collection, one row per card

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::card::generate_card_id;
use crate::domain::{Card, CardStatus, Collection, CollectionStats, Language};

use super::{StoreError, StoreResult};

pub fn insert_collection(conn: &Connection, collection: &Collection) -> StoreResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO collections (id, language, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            collection.id,
            collection.language.as_str(),
            format_timestamp(collection.created_at),
            collection.updated_at.map(format_timestamp),
        ],
    )?;
    write_cards(&tx, &collection.id, &collection.cards)?;
    tx.commit()?;
    Ok(())
}

/// Rewrite the collection row and all of its cards
pub fn save_collection(conn: &Connection, collection: &Collection) -> StoreResult<()> {
    let tx = conn.unchecked_transaction()?;
    let updated = tx.execute(
        "UPDATE collections SET language = ?2, updated_at = ?3 WHERE id = ?1",
        params![
            collection.id,
            collection.language.as_str(),
            collection.updated_at.map(format_timestamp),
        ],
    )?;
    if updated == 0 {
        return Err(StoreError::CollectionNotFound(collection.id.clone()));
    }
    tx.execute(
        "DELETE FROM collection_cards WHERE collection_id = ?1",
        params![collection.id],
    )?;
    write_cards(&tx, &collection.id, &collection.cards)?;
    tx.commit()?;
    Ok(())
}

fn write_cards(conn: &Connection, collection_id: &str, cards: &[Card]) -> StoreResult<()> {
    let mut stmt = conn.prepare(
        r#"
    INSERT INTO collection_cards (collection_id, position, card_id, word, status, body)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
    )?;
    for (position, card) in cards.iter().enumerate() {
        stmt.execute(params![
            collection_id,
            position as i64,
            card.id,
            card.word,
            card.status.as_str(),
            serde_json::to_string(card)?,
        ])?;
    }
    Ok(())
}

pub fn get_collection(conn: &Connection, id: &str) -> StoreResult<Option<Collection>> {
    let row = conn
        .query_row(
            "SELECT id, language, created_at, updated_at FROM collections WHERE id = ?1",
            params![id],
            row_to_header,
        )
        .optional()?;

    match row {
        Some(header) => Ok(Some(load_cards(conn, header)?)),
        None => Ok(None),
    }
}

/// All collections, newest first
pub fn list_collections(conn: &Connection) -> StoreResult<Vec<Collection>> {
    let mut stmt = conn.prepare(
        "SELECT id, language, created_at, updated_at FROM collections ORDER BY created_at DESC, rowid DESC",
    )?;
    let headers = stmt
        .query_map([], row_to_header)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    headers
        .into_iter()
        .map(|header| load_cards(conn, header))
        .collect()
}

pub fn delete_collection(conn: &Connection, id: &str) -> StoreResult<bool> {
    let deleted = conn.execute("DELETE FROM collections WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

/// Id of the most recently created collection for a language
pub fn latest_collection_id(conn: &Connection, language: Language) -> StoreResult<Option<String>> {
    let id = conn
        .query_row(
            r#"
    SELECT id FROM collections WHERE language = ?1
    ORDER BY created_at DESC, rowid DESC LIMIT 1
    "#,
            params![language.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Put `card` into the collection, replacing any card with the same word.
///
/// A replaced card keeps its id and creation time; a new card gets a fresh
/// id. Either way the card restarts in the learning state.
pub fn add_card(conn: &Connection, collection_id: &str, card: Card) -> StoreResult<Collection> {
    let mut collection = get_collection(conn, collection_id)?
        .ok_or_else(|| StoreError::CollectionNotFound(collection_id.to_string()))?;

    let language = collection.language;
    match collection.cards.iter_mut().find(|c| c.word == card.word) {
        Some(existing) => {
            let id = std::mem::take(&mut existing.id);
            let created_at = existing.created_at;
            *existing = Card {
                id,
                created_at,
                language,
                status: CardStatus::Learning,
                ..card
            };
        }
        None => {
            collection.cards.push(Card {
                id: generate_card_id(),
                language,
                status: CardStatus::Learning,
                created_at: Utc::now(),
                review_count: 0,
                ..card
            });
        }
    }

    collection.updated_at = Some(Utc::now());
    collection.recount();
    save_collection(conn, &collection)?;
    Ok(collection)
}

pub fn update_card_status(
    conn: &Connection,
    collection_id: &str,
    card_id: &str,
    status: CardStatus,
) -> StoreResult<Collection> {
    let mut collection = get_collection(conn, collection_id)?
        .ok_or_else(|| StoreError::CollectionNotFound(collection_id.to_string()))?;

    let index = collection
        .card_index(card_id)
        .ok_or_else(|| StoreError::CardNotFound(card_id.to_string()))?;
    collection.cards[index].mark_reviewed(status);
    collection.recount();

    save_collection(conn, &collection)?;
    Ok(collection)
}

/// Swap in fresh content for one card; the card keeps its id and status
pub fn replace_card(
    conn: &Connection,
    collection_id: &str,
    card_id: &str,
    fresh: Card,
) -> StoreResult<Collection> {
    let mut collection = get_collection(conn, collection_id)?
        .ok_or_else(|| StoreError::CollectionNotFound(collection_id.to_string()))?;

    let index = collection
        .card_index(card_id)
        .ok_or_else(|| StoreError::CardNotFound(card_id.to_string()))?;
    collection.cards[index].replace_content(fresh);
    collection.updated_at = Some(Utc::now());
    collection.recount();

    save_collection(conn, &collection)?;
    Ok(collection)
}

struct CollectionHeader {
    id: String,
    language: Language,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

fn row_to_header(row: &rusqlite::Row) -> rusqlite::Result<CollectionHeader> {
    let language: String = row.get(1)?;
    let created_at: String = row.get(2)?;
    let updated_at: Option<String> = row.get(3)?;

    Ok(CollectionHeader {
        id: row.get(0)?,
        language: Language::from_str(&language).unwrap_or_default(),
        created_at: parse_timestamp(&created_at).unwrap_or_else(Utc::now),
        updated_at: updated_at.as_deref().and_then(parse_timestamp),
    })
}

fn load_cards(conn: &Connection, header: CollectionHeader) -> StoreResult<Collection> {
    let mut stmt = conn.prepare(
        "SELECT body FROM collection_cards WHERE collection_id = ?1 ORDER BY position",
    )?;
    let bodies = stmt
        .query_map(params![header.id], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let cards = bodies
        .iter()
        .map(|body| serde_json::from_str::<Card>(body))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Collection {
        id: header.id,
        language: header.language,
        total_cards: cards.len(),
        stats: CollectionStats::from_cards(&cards),
        cards,
        created_at: header.created_at,
        updated_at: header.updated_at,
    })
}

/// Fixed-width so that text ordering matches time ordering
pub(crate) fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
