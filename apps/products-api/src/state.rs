//! Application state management

use mongodb::{Client, Database};

/// Store handles created once at startup and shared by every route.
#[derive(Clone)]
pub struct AppState {
    pub mongo_client: Client,
    pub db: Database,
}

impl AppState {
    pub fn new(mongo_client: Client, database: &str) -> Self {
        let db = mongo_client.database(database);
        Self { mongo_client, db }
    }
}
