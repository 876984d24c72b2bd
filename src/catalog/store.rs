//! SQLite-backed catalog store.
//!
//! Thin keyed lookup-or-create layer over sqlx. The pipeline depends only on
//! these semantics, not on SQLite specifically; everything engine-flavored
//! (WAL, busy timeout, `INSERT OR IGNORE`) stays inside this module.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};

use super::schema::SCHEMA_SQL;
use super::types::{ImageAsset, NewDestination, NewYacht};

/// Handle to the catalog database. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    /// Open (creating if missing) the catalog database at `path` and apply
    /// the schema.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .context("Failed to open catalog database")?;

        sqlx::query(SCHEMA_SQL)
            .execute(&pool)
            .await
            .context("Failed to initialize catalog schema")?;

        Ok(Self { pool })
    }

    /// In-memory store for tests.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;
        sqlx::query(SCHEMA_SQL)
            .execute(&pool)
            .await
            .context("Failed to initialize catalog schema")?;
        Ok(Self { pool })
    }

    /// Release the connection pool. Idempotent.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Row id of the yacht with this slug, if any.
    pub async fn yacht_id_by_slug(&self, slug: &str) -> Result<Option<i64>, sqlx::Error> {
        let row = sqlx::query("SELECT id FROM yachts WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<i64, _>("id")))
    }

    /// Row id of the destination with this slug, if any.
    pub async fn destination_id_by_slug(&self, slug: &str) -> Result<Option<i64>, sqlx::Error> {
        let row = sqlx::query("SELECT id FROM destinations WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<i64, _>("id")))
    }

    /// All destination slugs mapped to their row ids, for link resolution.
    pub async fn destination_slug_map(&self) -> Result<HashMap<String, i64>, sqlx::Error> {
        let rows = sqlx::query("SELECT slug, id FROM destinations")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.get::<String, _>("slug"), r.get::<i64, _>("id")))
            .collect())
    }

    /// Create a yacht row. Fails on a duplicate slug; callers check
    /// existence first and treat a duplicate here as a store-level fault.
    pub async fn insert_yacht(&self, yacht: &NewYacht) -> Result<i64, sqlx::Error> {
        let gallery_json =
            serde_json::to_string(&yacht.gallery).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let result = sqlx::query(
            r#"
            INSERT INTO yachts
                (slug, name, category, hero_image, gallery, summary, description,
                 length_m, cabins, crew, year, cruising_speed_kn,
                 price_amount, price_currency)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&yacht.slug)
        .bind(&yacht.name)
        .bind(yacht.category.as_str())
        .bind(&yacht.hero_image)
        .bind(gallery_json)
        .bind(&yacht.summary)
        .bind(&yacht.description)
        .bind(yacht.specs.length_m)
        .bind(yacht.specs.cabins)
        .bind(yacht.specs.crew)
        .bind(yacht.specs.year)
        .bind(yacht.specs.cruising_speed_kn)
        .bind(yacht.price.as_ref().map(|p| p.amount))
        .bind(yacht.price.as_ref().map(|p| p.currency.as_str()))
        .execute(&self.pool)
        .await?;
        debug!("Created yacht row for slug '{}'", yacht.slug);
        Ok(result.last_insert_rowid())
    }

    /// Create a destination row. Same duplicate contract as
    /// [`Self::insert_yacht`].
    pub async fn insert_destination(
        &self,
        destination: &NewDestination,
    ) -> Result<i64, sqlx::Error> {
        let gallery_json = serde_json::to_string(&destination.gallery)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let highlights_json = serde_json::to_string(&destination.highlights)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let result = sqlx::query(
            r#"
            INSERT INTO destinations
                (slug, name, hero_image, gallery, description, best_season, highlights)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&destination.slug)
        .bind(&destination.name)
        .bind(&destination.hero_image)
        .bind(gallery_json)
        .bind(&destination.description)
        .bind(&destination.best_season)
        .bind(highlights_json)
        .execute(&self.pool)
        .await?;
        debug!("Created destination row for slug '{}'", destination.slug);
        Ok(result.last_insert_rowid())
    }

    /// Record a transcoded asset.
    pub async fn insert_image_asset(&self, asset: &ImageAsset) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO image_assets
                (filename, url, width, height, bytes, mime, storage_path, alt)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&asset.filename)
        .bind(&asset.url)
        .bind(asset.width)
        .bind(asset.height)
        .bind(asset.bytes as i64)
        .bind(&asset.mime)
        .bind(&asset.storage_path)
        .bind(&asset.alt)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Link a yacht to a destination. The UNIQUE pair constraint absorbs
    /// repeats; returns true when a new link row was created.
    pub async fn link_yacht_destination(
        &self,
        yacht_id: i64,
        destination_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO yacht_destination_links (yacht_id, destination_id) VALUES (?, ?)",
        )
        .bind(yacht_id)
        .bind(destination_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a yacht's media columns. Only the fix-missing pass calls this;
    /// regular ingestion never updates existing rows.
    pub async fn update_yacht_media(
        &self,
        slug: &str,
        hero_image: Option<&str>,
        gallery: &[super::types::GalleryImage],
    ) -> Result<(), sqlx::Error> {
        let gallery_json =
            serde_json::to_string(gallery).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        sqlx::query("UPDATE yachts SET hero_image = ?, gallery = ? WHERE slug = ?")
            .bind(hero_image)
            .bind(gallery_json)
            .bind(slug)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Slugs of yachts whose gallery is still empty, for the fix-missing pass.
    pub async fn yacht_slugs_missing_gallery(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows = sqlx::query("SELECT slug FROM yachts WHERE gallery = '[]' ORDER BY slug")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.get::<String, _>("slug")).collect())
    }

    /// Number of stored image assets. Used by tests and run summaries.
    pub async fn image_asset_count(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM image_assets")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>("n"))
    }

    /// Number of link rows for one yacht.
    pub async fn link_count_for_yacht(&self, yacht_id: i64) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM yacht_destination_links WHERE yacht_id = ?",
        )
        .bind(yacht_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get::<i64, _>("n"))
    }

    /// Fetch a yacht's hero and gallery JSON, for tests and the fix-missing
    /// pass.
    pub async fn yacht_media(
        &self,
        slug: &str,
    ) -> Result<Option<(Option<String>, Vec<super::types::GalleryImage>)>, sqlx::Error> {
        let row = sqlx::query("SELECT hero_image, gallery FROM yachts WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(r) => {
                let hero: Option<String> = r.get("hero_image");
                let gallery_json: String = r.get("gallery");
                let gallery = serde_json::from_str(&gallery_json)
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
                Ok(Some((hero, gallery)))
            }
            None => Ok(None),
        }
    }

    /// Fetch a destination's description, for tests.
    pub async fn destination_description(
        &self,
        slug: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row = sqlx::query("SELECT description FROM destinations WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>("description")))
    }
}
