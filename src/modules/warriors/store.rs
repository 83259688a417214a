use parking_lot::RwLock;

use bookswap_models::{Achievement, Race, Warrior, WarriorBook, WarriorId};

/// Backing list for the warriors resource.
///
/// Order is insertion order. Ids are supplied by callers and are not required
/// to be unique.
pub trait WarriorStore: Send + Sync {
    fn list(&self) -> Vec<Warrior>;
    /// Every warrior carrying `id`, in list order
    fn find(&self, id: WarriorId) -> Vec<Warrior>;
    fn push(&self, warrior: Warrior);
    /// Drops every warrior with `id` and appends `warrior` at the end.
    /// Returns `false` and leaves the list untouched if `id` is absent.
    fn replace(&self, id: WarriorId, warrior: Warrior) -> bool;
    /// Removes the first warrior with `id`
    fn remove(&self, id: WarriorId) -> bool;
}

#[derive(Default)]
pub struct InMemoryWarriorStore {
    warriors: RwLock<Vec<Warrior>>,
}

impl InMemoryWarriorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the two sample warriors served on a fresh start.
    pub fn seeded() -> Self {
        Self {
            warriors: RwLock::new(sample_warriors()),
        }
    }
}

impl WarriorStore for InMemoryWarriorStore {
    fn list(&self) -> Vec<Warrior> {
        self.warriors.read().clone()
    }

    fn find(&self, id: WarriorId) -> Vec<Warrior> {
        self.warriors
            .read()
            .iter()
            .filter(|w| w.id == id)
            .cloned()
            .collect()
    }

    fn push(&self, warrior: Warrior) {
        self.warriors.write().push(warrior);
    }

    fn replace(&self, id: WarriorId, warrior: Warrior) -> bool {
        let mut warriors = self.warriors.write();
        let before = warriors.len();
        warriors.retain(|w| w.id != id);
        if warriors.len() == before {
            return false;
        }
        warriors.push(warrior);
        true
    }

    fn remove(&self, id: WarriorId) -> bool {
        let mut warriors = self.warriors.write();
        match warriors.iter().position(|w| w.id == id) {
            Some(index) => {
                warriors.remove(index);
                true
            }
            None => false,
        }
    }
}

fn sample_warriors() -> Vec<Warrior> {
    vec![
        Warrior {
            id: 1,
            race: Race::Admin,
            name: "Мартынов Дмитрий".to_string(),
            level: 12,
            achievement: Some(Achievement {
                id: 1,
                title: "Влиятельный человек".to_string(),
                description: "Add first book".to_string(),
            }),
            books: vec![
                WarriorBook {
                    id: 1,
                    name: "1984".to_string(),
                    description: "George Orwell".to_string(),
                },
                WarriorBook {
                    id: 2,
                    name: "The Picture of Dorian Gray".to_string(),
                    description: "Oscar Fingal O'Flahertie Wills Wilde".to_string(),
                },
            ],
        },
        Warrior {
            id: 2,
            race: Race::Moderator,
            name: "Андрей Косякин".to_string(),
            level: 12,
            achievement: Some(Achievement {
                id: 1,
                title: "Дельфист-гребец".to_string(),
                description: "Выполните первую проверку топика".to_string(),
            }),
            books: vec![],
        },
    ]
}
