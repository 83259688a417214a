use tracing::debug;

use bookswap_models::{Warrior, WarriorId};

use super::store::WarriorStore;

pub struct WarriorService;

impl WarriorService {
    pub fn list(store: &dyn WarriorStore) -> Vec<Warrior> {
        store.list()
    }

    /// Warriors matching `id`; empty when there is none.
    pub fn get(store: &dyn WarriorStore, id: WarriorId) -> Vec<Warrior> {
        store.find(id)
    }

    pub fn create(store: &dyn WarriorStore, warrior: Warrior) -> Warrior {
        store.push(warrior.clone());
        warrior
    }

    /// Swaps in `warrior` for the entries with `id` and returns the whole list.
    /// An unknown id leaves the list as it was.
    pub fn replace(store: &dyn WarriorStore, id: WarriorId, warrior: Warrior) -> Vec<Warrior> {
        if !store.replace(id, warrior) {
            debug!(warrior_id = id, "No warrior to replace");
        }
        store.list()
    }

    pub fn delete(store: &dyn WarriorStore, id: WarriorId) {
        if !store.remove(id) {
            debug!(warrior_id = id, "No warrior to delete");
        }
    }
}
