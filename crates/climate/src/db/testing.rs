//! Seeded in-memory SQLite stores for tests.

use crate::db::sqlite::SqliteClimateStore;
use sqlx::sqlite::SqlitePoolOptions;

/// A `(station, date, prcp, tobs)` measurement row.
pub type SeedRow<'a> = (&'a str, &'a str, Option<f64>, Option<f64>);

/// Single-connection in-memory pool; every connection to `:memory:` is a
/// separate database. Seeds three stations plus `rows` in order.
pub async fn seeded_store(rows: &[SeedRow<'_>]) -> SqliteClimateStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(
        "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);
         CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, latitude FLOAT, longitude FLOAT, elevation FLOAT);
         INSERT INTO station (station, name) VALUES ('USC00519397', 'WAIKIKI 717.2, HI US');
         INSERT INTO station (station, name) VALUES ('USC00513117', 'KANEOHE 838.1, HI US');
         INSERT INTO station (station, name) VALUES ('USC00519281', 'WAIHEE 837.5, HI US');",
    )
    .execute(&pool)
    .await
    .unwrap();

    for (station, date, prcp, tobs) in rows {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    SqliteClimateStore::from_pool(pool)
}
