//! Catalog store schema.

/// SQL schema for the catalog database.
///
/// Applied idempotently at open (CREATE IF NOT EXISTS throughout). The
/// UNIQUE constraint on `yacht_destination_links (yacht_id, destination_id)`
/// enforces at-most-one link per pair at the store layer; application code
/// uses `INSERT OR IGNORE` against it.
pub const SCHEMA_SQL: &str = r#"
-- Yachts: natural key is the slug
CREATE TABLE IF NOT EXISTS yachts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    hero_image TEXT,
    gallery TEXT NOT NULL DEFAULT '[]',
    summary TEXT,
    description TEXT NOT NULL,
    length_m REAL,
    cabins INTEGER,
    crew INTEGER,
    year INTEGER,
    cruising_speed_kn REAL,
    price_amount REAL,
    price_currency TEXT,
    created_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
);

-- Destinations: natural key is the slug
CREATE TABLE IF NOT EXISTS destinations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    slug TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    hero_image TEXT,
    gallery TEXT NOT NULL DEFAULT '[]',
    description TEXT NOT NULL,
    best_season TEXT,
    highlights TEXT NOT NULL DEFAULT '[]',
    created_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
);

-- Many-to-many join; the UNIQUE pair constraint is the duplicate guard
CREATE TABLE IF NOT EXISTS yacht_destination_links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    yacht_id INTEGER NOT NULL REFERENCES yachts(id),
    destination_id INTEGER NOT NULL REFERENCES destinations(id),
    UNIQUE(yacht_id, destination_id)
);

CREATE INDEX IF NOT EXISTS idx_links_yacht ON yacht_destination_links(yacht_id);
CREATE INDEX IF NOT EXISTS idx_links_destination ON yacht_destination_links(destination_id);

-- Transcoded assets; immutable, never updated or deleted by the pipeline
CREATE TABLE IF NOT EXISTS image_assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL,
    width INTEGER NOT NULL,
    height INTEGER NOT NULL,
    bytes INTEGER NOT NULL,
    mime TEXT NOT NULL,
    storage_path TEXT NOT NULL,
    alt TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
);
"#;
