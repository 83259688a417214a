use std::collections::HashSet;
use std::time::Instant;

use anyhow::Context;
use fake::Fake;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use rayon::prelude::*;

use bookswap_core::password::hash_password_with_cost;
use bookswap_db::Store;
use bookswap_models::{NewBook, NewUser, TagId};

pub const SEED_PASSWORD: &str = "password123";

/// Seeding uses a low bcrypt cost; real accounts use the default cost.
const SEED_BCRYPT_COST: u32 = 4;

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub users: usize,
    pub books_per_user: usize,
    pub tags: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 10,
            books_per_user: 3,
            tags: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub books: usize,
    pub tags: usize,
    pub links: usize,
}

pub struct UserSeed {
    pub username: String,
    pub bio: String,
    pub books: Vec<BookSeed>,
}

pub struct BookSeed {
    pub title: String,
    pub description: String,
}

/// Fills the store with fake users, their books and a shared tag set.
///
/// Every seeded user has the password [`SEED_PASSWORD`]. Each book gets up to
/// two tags.
pub async fn seed_store(store: &dyn Store, config: SeedConfig) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();

    println!("🌱 Starting seeding...");
    println!("   - Users: {}", config.users);
    println!("   - Books per user: {}", config.books_per_user);
    println!("   - Tags: {}", config.tags);

    let users = generate_users_parallel(config.users, config.books_per_user);
    let tag_names = generate_tag_names(config.tags);

    // One hash shared by every seeded user
    let password_hash = hash_password_with_cost(SEED_PASSWORD, SEED_BCRYPT_COST)
        .map_err(|e| e.error)
        .context("Failed to hash seed password")?;

    let mut summary = SeedSummary::default();

    let mut tag_ids: Vec<TagId> = Vec::with_capacity(tag_names.len());
    for name in &tag_names {
        let tag = store.create_tag(name).await?;
        tag_ids.push(tag.id);
    }
    summary.tags = tag_ids.len();

    for user_seed in users {
        let user = store
            .create_user(NewUser {
                username: user_seed.username,
                hashed_password: password_hash.clone(),
                bio: Some(user_seed.bio),
                preferences: None,
            })
            .await?;
        summary.users += 1;

        for book_seed in user_seed.books {
            let book = store
                .create_book(NewBook {
                    title: book_seed.title,
                    description: Some(book_seed.description),
                    owner_id: user.id,
                })
                .await?;
            summary.books += 1;

            for tag_id in pick_tags(&tag_ids, book.id) {
                let (_, created) = store.attach_tag(book.id, tag_id).await?;
                if created {
                    summary.links += 1;
                }
            }
        }
    }

    println!(
        "\n✅ Seeding complete! Created {} users, {} books, {} tags and {} links in {:?}",
        summary.users,
        summary.books,
        summary.tags,
        summary.links,
        start_time.elapsed()
    );
    println!("\n📝 Default password for all users: {}", SEED_PASSWORD);

    Ok(summary)
}

/// Empties every table. Accounts created outside the seeder go too.
pub async fn reset_store(store: &dyn Store) -> anyhow::Result<()> {
    println!("🧹 Deleting all users, books, tags and exchange requests...");
    store.clear().await?;
    println!("✅ Cleared");
    Ok(())
}

fn generate_users_parallel(count: usize, books_per_user: usize) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let base: String = Username().fake();
            UserSeed {
                // Index suffix keeps usernames unique
                username: format!("{}_{}", base.to_lowercase(), idx),
                bio: Sentence(3..8).fake(),
                books: (0..books_per_user).map(|_| generate_book()).collect(),
            }
        })
        .collect()
}

fn generate_book() -> BookSeed {
    let title: String = Sentence(1..4).fake();
    BookSeed {
        title: title.trim_end_matches('.').to_string(),
        description: Paragraph(1..2).fake(),
    }
}

fn generate_tag_names(count: usize) -> Vec<String> {
    let mut seen = HashSet::with_capacity(count);
    let mut names = Vec::with_capacity(count);
    let mut attempts = 0;

    while names.len() < count {
        let word: String = Word().fake();
        let name = if attempts < count * 4 {
            word
        } else {
            format!("{}-{}", word, names.len())
        };
        attempts += 1;
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }

    names
}

fn pick_tags(tag_ids: &[TagId], book_id: i64) -> Vec<TagId> {
    if tag_ids.is_empty() {
        return Vec::new();
    }
    let first = book_id.unsigned_abs() as usize % tag_ids.len();
    let second = (first + 1 + (0..tag_ids.len()).fake::<usize>()) % tag_ids.len();
    let mut picked = vec![tag_ids[first]];
    if second != first {
        picked.push(tag_ids[second]);
    }
    picked
}
