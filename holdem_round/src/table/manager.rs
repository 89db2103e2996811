//! Table manager for spawning and managing multiple table actors.

use super::{
    TableId,
    actor::{TableActor, TableError, TableHandle, TableParts},
    config::TableConfig,
};
use crate::game::entities::Usd;
use std::{collections::HashMap, sync::Arc};
use tokio::{sync::RwLock, task::JoinHandle};

/// Table metadata for discovery
#[derive(Debug, Clone)]
pub struct TableMetadata {
    pub id: TableId,
    pub name: String,
    pub player_count: usize,
    pub max_players: usize,
    pub small_blind: Usd,
    pub big_blind: Usd,
    pub speed: String,
    pub is_active: bool,
    pub hands_played: u32,
}

struct ManagedTable {
    handle: TableHandle,
    task: JoinHandle<Result<(), TableError>>,
}

/// Table manager for managing multiple table instances. Every table runs
/// in its own task, so one table's waits never hold up another.
#[derive(Clone, Default)]
pub struct TableManager {
    /// Active tables
    tables: Arc<RwLock<HashMap<TableId, ManagedTable>>>,

    /// Next table ID
    next_table_id: Arc<RwLock<TableId>>,
}

impl TableManager {
    /// Create a new table manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the standard collaborators and spawn its actor
    pub async fn create_table(&self, config: TableConfig) -> Result<TableHandle, TableError> {
        let parts = TableParts::standard(&config);
        self.create_table_with_parts(config, parts).await
    }

    pub async fn create_table_with_parts(
        &self,
        config: TableConfig,
        parts: TableParts,
    ) -> Result<TableHandle, TableError> {
        config.validate()?;

        let table_id = {
            let mut next_id = self.next_table_id.write().await;
            *next_id += 1;
            *next_id
        };

        let name = config.name.clone();
        let (actor, handle) = TableActor::with_parts(table_id, config, parts);
        let task = tokio::spawn(actor.run());

        self.tables.write().await.insert(
            table_id,
            ManagedTable {
                handle: handle.clone(),
                task,
            },
        );

        log::info!("Created table {} '{}'", table_id, name);
        Ok(handle)
    }

    /// Get a table handle by ID
    pub async fn get_table(&self, table_id: TableId) -> Option<TableHandle> {
        let tables = self.tables.read().await;
        tables.get(&table_id).map(|table| table.handle.clone())
    }

    /// List every table that still answers
    pub async fn list_tables(&self) -> Vec<TableMetadata> {
        let handles: Vec<TableHandle> = {
            let tables = self.tables.read().await;
            tables.values().map(|table| table.handle.clone()).collect()
        };

        let mut metadata = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.state().await {
                Ok(state) => metadata.push(TableMetadata {
                    id: state.table_id,
                    name: state.table_name,
                    player_count: state.player_count,
                    max_players: state.max_players,
                    small_blind: state.small_blind,
                    big_blind: state.big_blind,
                    speed: state.speed,
                    is_active: state.is_active,
                    hands_played: state.hands_played,
                }),
                Err(e) => log::debug!("Skipping table {}: {}", handle.table_id(), e),
            }
        }
        metadata.sort_by_key(|table| table.id);
        metadata
    }

    /// Close a table and wait for its task to finish
    pub async fn close_table(&self, table_id: TableId) -> Result<(), TableError> {
        let table = self.tables.write().await.remove(&table_id);
        let Some(table) = table else {
            return Err(TableError::Closed);
        };
        Self::shutdown(table_id, table).await
    }

    /// Close every table, returning the first table error encountered
    pub async fn close_all(&self) -> Result<(), TableError> {
        let tables: Vec<(TableId, ManagedTable)> = self.tables.write().await.drain().collect();
        let mut first_error = None;
        for (table_id, table) in tables {
            if let Err(e) = Self::shutdown(table_id, table).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    async fn shutdown(table_id: TableId, table: ManagedTable) -> Result<(), TableError> {
        // A table that already stopped on its own reports through its task.
        if let Err(e) = table.handle.close().await {
            log::debug!("Table {} already stopped: {}", table_id, e);
        }
        match table.task.await {
            Ok(result) => result,
            Err(e) => {
                log::error!("Table {} task panicked: {}", table_id, e);
                Err(TableError::Closed)
            }
        }
    }

    /// Get count of active tables
    pub async fn active_table_count(&self) -> usize {
        self.tables.read().await.len()
    }
}
