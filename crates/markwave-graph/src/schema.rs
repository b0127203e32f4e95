//! Neo4j schema initialization (uniqueness constraints).

use anyhow::Result;
use neo4rs::Query;
use tracing::info;

use crate::GraphClient;

/// Cypher statements for schema initialization.
///
/// The `User.mobile` constraint is what makes the upsert `MERGE` safe under
/// concurrent submissions for the same new mobile: the store serializes the
/// two creates instead of this code doing a read-then-write.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT user_mobile IF NOT EXISTS FOR (u:User) REQUIRE u.mobile IS UNIQUE",
    "CREATE CONSTRAINT purchase_id IF NOT EXISTS FOR (p:Purchase) REQUIRE p.id IS UNIQUE",
];

/// Initialize Neo4j schema with constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!(
        "Neo4j schema initialized ({} statements)",
        SCHEMA_STATEMENTS.len()
    );
    Ok(())
}
