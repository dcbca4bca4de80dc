use std::fmt;

use feruca::Collator;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, InventoryConfig};

const DEFAULT_CAPACITY: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl Item {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            name: name.into(),
            quantity: default_quantity(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("inventory is full ({capacity} slots)")]
    Full { capacity: usize },
    #[error("item {0} is already in the inventory")]
    DuplicateId(ItemId),
}

/// Bounded list of items, optionally kept sorted by name.
#[derive(Clone, Debug, Serialize)]
pub struct Inventory {
    capacity: usize,
    items: Vec<Item>,
    auto_sort: bool,
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            items: Vec::new(),
            auto_sort: true,
        }
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::invalid("inventory.capacity", "must be greater than zero"));
        }
        Ok(Self {
            capacity,
            ..Self::new()
        })
    }

    pub fn from_config(config: &InventoryConfig) -> Result<Self, ConfigError> {
        let mut inventory = Self::with_capacity(config.capacity)?;
        inventory.auto_sort = config.auto_sort;
        Ok(inventory)
    }

    /// Adds `item`, returning `false` if the inventory is full or already holds its id.
    pub fn add_item(&mut self, item: Item) -> bool {
        match self.try_add_item(item) {
            Ok(()) => true,
            Err(err) => {
                debug!(target: "gameplay.inventory", %err, "item rejected");
                false
            }
        }
    }

    pub fn try_add_item(&mut self, item: Item) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full {
                capacity: self.capacity,
            });
        }
        if self.contains(item.id) {
            return Err(InventoryError::DuplicateId(item.id));
        }
        self.items.push(item);
        if self.auto_sort {
            self.sort_items();
        }
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: ItemId) -> bool {
        self.take_item(item_id).is_some()
    }

    /// Removes the first item with `item_id` and hands it back.
    pub fn take_item(&mut self, item_id: ItemId) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == item_id)?;
        Some(self.items.remove(index))
    }

    /// Stable sort by name using the Unicode collation order of the root locale.
    pub fn sort_items(&mut self) {
        let mut collator = Collator::default();
        self.items
            .sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
    }

    /// Empties the inventory and returns how many items were dropped.
    pub fn clear_inventory(&mut self) -> usize {
        let dropped = self.items.len();
        self.items.clear();
        info!(target: "gameplay.inventory", dropped, "inventory cleared");
        dropped
    }

    pub fn get_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn auto_sort(&self) -> bool {
        self.auto_sort
    }

    /// Turning auto-sort on does not reorder existing items until the next add.
    pub fn set_auto_sort(&mut self, auto_sort: bool) {
        self.auto_sort = auto_sort;
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == item_id)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}
