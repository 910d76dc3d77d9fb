use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS collections (
      id TEXT PRIMARY KEY,
      language TEXT NOT NULL,
      created_at TEXT NOT NULL,
      updated_at TEXT
    );

    -- Cards are stored whole as JSON; word and status are copied out for queries
    CREATE TABLE IF NOT EXISTS collection_cards (
      collection_id TEXT NOT NULL,
      position INTEGER NOT NULL,
      card_id TEXT NOT NULL,
      word TEXT NOT NULL,
      status TEXT NOT NULL DEFAULT 'learning',
      body TEXT NOT NULL,
      PRIMARY KEY (collection_id, position),
      FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS learned_words (
      language TEXT NOT NULL,
      word TEXT NOT NULL,
      learned_at TEXT NOT NULL,
      PRIMARY KEY (language, word)
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_collections_language ON collections(language);
    CREATE INDEX IF NOT EXISTS idx_collections_created_at ON collections(created_at);
    CREATE INDEX IF NOT EXISTS idx_collection_cards_card_id ON collection_cards(card_id);
    "#,
  )?;

  Ok(())
}
