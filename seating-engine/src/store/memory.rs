//! In-memory store
//!
//! Backs tests and offline sessions. Nodes are upserted by id; guests must
//! already be known (guests are created outside the engine).

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{Guest, TableNode};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{SeatingStore, StoreError, StoreResult};

#[derive(Debug)]
struct GuestRecord {
    event_id: String,
    guest: Guest,
}

/// `SeatingStore` held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    nodes: RwLock<HashMap<String, TableNode>>,
    guests: RwLock<HashMap<String, GuestRecord>>,
    failing: AtomicBool,
    node_writes: AtomicUsize,
    guest_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed guests for an event (they arrive from guest-list import in production)
    pub fn with_guests(self, event_id: &str, guests: impl IntoIterator<Item = Guest>) -> Self {
        {
            let mut map = self.guests.write();
            for guest in guests {
                map.insert(
                    guest.id.clone(),
                    GuestRecord {
                        event_id: event_id.to_string(),
                        guest,
                    },
                );
            }
        }
        self
    }

    pub fn with_nodes(self, nodes: impl IntoIterator<Item = TableNode>) -> Self {
        {
            let mut map = self.nodes.write();
            for node in nodes {
                map.insert(node.id.clone(), node);
            }
        }
        self
    }

    /// Make every write fail with [`StoreError::Unavailable`] until reset
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn node(&self, id: &str) -> Option<TableNode> {
        self.nodes.read().get(id).cloned()
    }

    pub fn guest(&self, id: &str) -> Option<Guest> {
        self.guests.read().get(id).map(|r| r.guest.clone())
    }

    /// Number of successful bulk node writes
    pub fn node_writes(&self) -> usize {
        self.node_writes.load(Ordering::SeqCst)
    }

    /// Number of successful bulk guest writes
    pub fn guest_writes(&self) -> usize {
        self.guest_writes.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SeatingStore for MemoryStore {
    async fn load_guests(&self, event_id: &str) -> StoreResult<Vec<Guest>> {
        self.check_available()?;
        let mut guests: Vec<Guest> = self
            .guests
            .read()
            .values()
            .filter(|r| r.event_id == event_id)
            .map(|r| r.guest.clone())
            .collect();
        guests.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(guests)
    }

    async fn load_table_nodes(&self, event_id: &str) -> StoreResult<Vec<TableNode>> {
        self.check_available()?;
        let mut nodes: Vec<TableNode> = self
            .nodes
            .read()
            .values()
            .filter(|n| n.event_id == event_id)
            .cloned()
            .collect();
        nodes.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));
        Ok(nodes)
    }

    async fn create_table_node(&self, node: &TableNode) -> StoreResult<()> {
        self.check_available()?;
        self.nodes.write().insert(node.id.clone(), node.clone());
        Ok(())
    }

    async fn update_table_nodes(&self, nodes: &[TableNode]) -> StoreResult<()> {
        self.check_available()?;
        let mut map = self.nodes.write();
        for node in nodes {
            map.insert(node.id.clone(), node.clone());
        }
        self.node_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_table_node(&self, id: &str) -> StoreResult<()> {
        self.check_available()?;
        self.nodes
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("table node {id}")))
    }

    async fn update_guests(&self, guests: &[Guest]) -> StoreResult<()> {
        self.check_available()?;
        let mut map = self.guests.write();
        if let Some(unknown) = guests.iter().find(|g| !map.contains_key(&g.id)) {
            return Err(StoreError::NotFound(format!("guest {}", unknown.id)));
        }
        for guest in guests {
            if let Some(record) = map.get_mut(&guest.id) {
                record.guest = guest.clone();
            }
        }
        self.guest_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete_guest(&self, id: &str) -> StoreResult<()> {
        self.check_available()?;
        self.guests
            .write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("guest {id}")))
    }
}
