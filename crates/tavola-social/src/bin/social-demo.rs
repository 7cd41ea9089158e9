//! Social flow demo
//!
//! Runs the full like/comment flow against an in-memory store: aggregate
//! counts for a small menu, then load, like, and comment on one dish.

use tavola_profile::Prefs;
use tavola_social::{ItemSocial, LikeTotals, LogNotifier, MenuItem};
use tavola_store::MemoryStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_demo=info,tavola_social=info,tavola_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = std::env::var("TAVOLA_DATA_DIR").unwrap_or_else(|_| "./tavola-data".into());
    let mut prefs = Prefs::open(format!("{}/prefs.json", data_dir))?;

    let store = MemoryStore::new();
    let mut menu = vec![
        MenuItem {
            id: 5,
            name: "Filet Mignon".to_string(),
            description: "8oz beef tenderloin with red wine reduction".to_string(),
            price: "$38".to_string(),
            popular: true,
            like_count: 0,
            image: None,
        },
        MenuItem {
            id: 7,
            name: "Wild Mushroom Risotto".to_string(),
            description: "Creamy arborio rice with wild mushrooms".to_string(),
            price: "$24".to_string(),
            popular: false,
            like_count: 0,
            image: None,
        },
    ];

    // Menu view: one scan pre-seeds all displayed counts.
    let ids: Vec<u32> = menu.iter().map(|i| i.id).collect();
    let mut totals = LikeTotals::new();
    totals.refresh(&store, &ids).await;
    totals.apply_to(&mut menu);
    for item in &menu {
        tracing::info!(id = item.id, likes = item.like_count, "{}", item.name);
    }

    // Dish view: per-item synchronizer.
    let mut dish = ItemSocial::for_profile(store.clone(), LogNotifier, &mut prefs, 5)?
        .with_like_count(totals.count(5));
    dish.load().await;
    tracing::info!(
        has_liked = dish.has_liked(),
        likes = dish.like_count(),
        "loaded dish 5"
    );

    dish.toggle_like().await;
    dish.add_comment(&mut prefs, "Ana", "The best filet in town").await;

    tracing::info!(
        has_liked = dish.has_liked(),
        likes = dish.like_count(),
        comments = dish.comments().len(),
        "after like and comment"
    );

    totals.refresh(&store, &ids).await;
    tracing::info!(likes = totals.count(5), "dish 5 aggregate count");

    Ok(())
}
