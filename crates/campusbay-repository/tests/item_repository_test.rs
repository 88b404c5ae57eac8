//! Integration tests for the SQLite item repository.

mod common;

use campusbay_core::{CampusBayError, ItemId, PageRequest};
use campusbay_domain::{AvailabilityStatus, Category, ListingSort, StatusChange, StatusFilter};
use campusbay_repository::{ItemQuery, ItemRepository, MaintenanceRepository};
use chrono::{Duration, Utc};
use common::TestDatabase;

async fn sorted_ids(db: &TestDatabase, sort: ListingSort) -> Vec<ItemId> {
    let q = ItemQuery {
        sort,
        ..ItemQuery::default()
    };
    db.items
        .search(&q, PageRequest::first())
        .await
        .unwrap()
        .items
        .into_iter()
        .map(|i| i.id)
        .collect()
}

fn query(status: StatusFilter) -> ItemQuery {
    ItemQuery {
        status,
        ..ItemQuery::default()
    }
}

#[tokio::test]
async fn test_save_and_find_round_trips_fields() {
    let db = TestDatabase::new().await;
    let seller = db.user("Priya Sharma", "priya@college.edu").await;
    let mut item = db.item(&seller, "Casio fx-991EX", 650.0, Category::Stationery).await;
    item.images = vec!["/uploads/casio.png".to_string()];
    db.items.update(&item).await.unwrap();

    let found = db.items.find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Casio fx-991EX");
    assert_eq!(found.seller_id, seller.id);
    assert_eq!(found.category, Category::Stationery);
    assert_eq!(found.location, "Campus");
    assert_eq!(found.images, vec!["/uploads/casio.png".to_string()]);
    assert_eq!(found.availability_status(), AvailabilityStatus::Available);
    assert!((found.price - 650.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    assert!(db.items.find_by_id(ItemId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_item_requires_existing_seller() {
    let db = TestDatabase::new().await;
    let seller = db.user("Ghost", "ghost@college.edu").await;
    db.maintenance.clear_all().await.unwrap();

    let item = campusbay_domain::Item::list(
        seller.id,
        campusbay_domain::NewItem {
            title: "Orphan".to_string(),
            description: String::new(),
            price: 1.0,
            category: Category::General,
            location: None,
            images: Vec::new(),
        },
    );
    assert!(matches!(
        db.items.save(&item).await,
        Err(CampusBayError::Database(_))
    ));
}

#[tokio::test]
async fn test_search_defaults_to_available_only() {
    let db = TestDatabase::new().await;
    let seller = db.user("Rahul Verma", "rahul@college.edu").await;
    let sold = db.item(&seller, "OnePlus Nord CE 2", 15500.0, Category::Electronics).await;
    db.item(&seller, "Study Table", 2500.0, Category::Furniture).await;
    let reserved = db.item(&seller, "Yamaha F280", 6500.0, Category::General).await;

    db.items
        .transition_status(
            sold.id,
            StatusChange {
                from: AvailabilityStatus::Available,
                to: AvailabilityStatus::Sold,
            },
        )
        .await
        .unwrap();
    db.items
        .transition_status(
            reserved.id,
            StatusChange {
                from: AvailabilityStatus::Available,
                to: AvailabilityStatus::Reserved,
            },
        )
        .await
        .unwrap();

    let page = db
        .items
        .search(&query(StatusFilter::AvailableOnly), PageRequest::first())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].title, "Study Table");

    let page = db
        .items
        .search(&query(StatusFilter::Only(AvailabilityStatus::Sold)), PageRequest::first())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, sold.id);
    assert!(!page.items[0].is_available());

    let page = db
        .items
        .search(&query(StatusFilter::All), PageRequest::first())
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 3);
}

#[tokio::test]
async fn test_search_text_and_category() {
    let db = TestDatabase::new().await;
    let seller = db.user("Arjun", "arjun@college.edu").await;
    db.item(&seller, "Engineering Mathematics", 350.0, Category::Books).await;
    db.item(&seller, "Data Structures in C", 300.0, Category::Books).await;
    db.item(&seller, "Mathematics Set Square", 50.0, Category::Stationery).await;

    let text = ItemQuery {
        text: Some("MATHEMATICS".to_string()),
        ..ItemQuery::default()
    };
    let page = db.items.search(&text, PageRequest::first()).await.unwrap();
    assert_eq!(page.pagination.total, 2);

    let both = ItemQuery {
        text: Some("mathematics".to_string()),
        category: Some(Category::Books),
        ..ItemQuery::default()
    };
    let page = db.items.search(&both, PageRequest::first()).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Engineering Mathematics");

    // Description matches too.
    let description = ItemQuery {
        text: Some("good condition".to_string()),
        ..ItemQuery::default()
    };
    let page = db.items.search(&description, PageRequest::first()).await.unwrap();
    assert_eq!(page.pagination.total, 3);
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let db = TestDatabase::new().await;
    let seller = db.user("Élodie", "elodie@college.edu").await;
    let mut item = db.item(&seller, "ÉCONOMIE Générale", 400.0, Category::Books).await;
    db.item(&seller, "Учебник физики", 250.0, Category::Books).await;

    let search = |text: &str| ItemQuery {
        text: Some(text.to_string()),
        ..ItemQuery::default()
    };

    let page = db.items.search(&search("économie"), PageRequest::first()).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    let page = db.items.search(&search("УЧЕБНИК"), PageRequest::first()).await.unwrap();
    assert_eq!(page.pagination.total, 1);

    // Edits refresh the searchable text.
    item.title = "Microéconomie".to_string();
    item.description = String::new();
    assert!(db.items.update(&item).await.unwrap());
    let page = db.items.search(&search("générale"), PageRequest::first()).await.unwrap();
    assert_eq!(page.pagination.total, 0);
    let page = db.items.search(&search("MICROÉCONOMIE"), PageRequest::first()).await.unwrap();
    assert_eq!(page.items[0].id, item.id);
}

#[tokio::test]
async fn test_search_wildcards_match_literally() {
    let db = TestDatabase::new().await;
    let seller = db.user("Sneha", "sneha@college.edu").await;
    db.item(&seller, "Lab coat", 200.0, Category::Fashion).await;

    let text = ItemQuery {
        text: Some("%".to_string()),
        ..ItemQuery::default()
    };
    let page = db.items.search(&text, PageRequest::first()).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_search_sorting() {
    let db = TestDatabase::new().await;
    let seller = db.user("Aditya", "aditya@college.edu").await;
    let mut cheap = db.item(&seller, "Pencil box", 80.0, Category::Stationery).await;
    let mut pricey = db.item(&seller, "Laptop stand", 1200.0, Category::Electronics).await;
    let middle = db.item(&seller, "Desk lamp", 400.0, Category::Furniture).await;

    // Give the rows distinct ages: cheap is oldest, middle newest.
    cheap.created_at = Utc::now() - Duration::hours(2);
    pricey.created_at = Utc::now() - Duration::hours(1);
    for item in [&cheap, &pricey] {
        sqlx::query("UPDATE items SET created_at = ? WHERE id = ?")
            .bind(item.created_at)
            .bind(item.id.to_string())
            .execute(db.pool.inner())
            .await
            .unwrap();
    }
    for _ in 0..3 {
        db.items.increment_views(pricey.id).await.unwrap();
    }

    assert_eq!(sorted_ids(&db, ListingSort::Newest).await, vec![middle.id, pricey.id, cheap.id]);
    assert_eq!(sorted_ids(&db, ListingSort::Oldest).await, vec![cheap.id, pricey.id, middle.id]);
    assert_eq!(sorted_ids(&db, ListingSort::PriceLow).await, vec![cheap.id, middle.id, pricey.id]);
    assert_eq!(sorted_ids(&db, ListingSort::PriceHigh).await, vec![pricey.id, middle.id, cheap.id]);
    assert_eq!(sorted_ids(&db, ListingSort::Popular).await[0], pricey.id);
}

#[tokio::test]
async fn test_search_pagination() {
    let db = TestDatabase::new().await;
    let seller = db.user("Kavya", "kavya@college.edu").await;
    for i in 0..5 {
        db.item(&seller, &format!("Notebook {i}"), 40.0, Category::Stationery).await;
    }

    let page = db
        .items
        .search(&ItemQuery::default(), PageRequest::new(2, 2))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 5);
    assert_eq!(page.pagination.pages, 3);
    assert_eq!(page.pagination.page, 2);

    let last = db
        .items
        .search(&ItemQuery::default(), PageRequest::new(3, 2))
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
}

#[tokio::test]
async fn test_transition_status_is_compare_and_set() {
    let db = TestDatabase::new().await;
    let seller = db.user("Meera", "meera@college.edu").await;
    let item = db.item(&seller, "Cycle", 3000.0, Category::General).await;

    let sell = StatusChange {
        from: AvailabilityStatus::Available,
        to: AvailabilityStatus::Sold,
    };
    assert!(db.items.transition_status(item.id, sell).await.unwrap());
    // A second writer deciding against the stale AVAILABLE status loses.
    assert!(!db.items.transition_status(item.id, sell).await.unwrap());

    let stored = db.items.find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(stored.availability_status(), AvailabilityStatus::Sold);

    let is_available: bool = sqlx::query_scalar("SELECT is_available FROM items WHERE id = ?")
        .bind(item.id.to_string())
        .fetch_one(db.pool.inner())
        .await
        .unwrap();
    assert!(!is_available);
}

#[tokio::test]
async fn test_concurrent_purchases_single_winner() {
    let db = std::sync::Arc::new(TestDatabase::new().await);
    let seller = db.user("Nikhil", "nikhil@college.edu").await;
    let item = db.item(&seller, "Mini fridge", 4500.0, Category::Electronics).await;

    let purchase = StatusChange {
        from: AvailabilityStatus::Available,
        to: AvailabilityStatus::Sold,
    };
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let db = db.clone();
            tokio::spawn(async move { db.items.transition_status(item.id, purchase).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_soft_delete_hides_item_everywhere() {
    let db = TestDatabase::new().await;
    let seller = db.user("Ishaan", "ishaan@college.edu").await;
    let item = db.item(&seller, "Hoodie", 700.0, Category::Fashion).await;

    assert!(db.items.soft_delete(item.id).await.unwrap());
    assert!(!db.items.soft_delete(item.id).await.unwrap());

    assert!(db.items.find_by_id(item.id).await.unwrap().is_none());
    assert!(db.items.find_by_ids(&[item.id]).await.unwrap().is_empty());
    assert!(!db.items.increment_views(item.id).await.unwrap());
    assert!(!db.items.update(&item).await.unwrap());
    assert!(!db
        .items
        .transition_status(
            item.id,
            StatusChange {
                from: AvailabilityStatus::Available,
                to: AvailabilityStatus::Sold,
            },
        )
        .await
        .unwrap());

    let all = db
        .items
        .search(&query(StatusFilter::All), PageRequest::first())
        .await
        .unwrap();
    assert!(all.items.is_empty());
    assert_eq!(db.items.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_by_seller_includes_every_status() {
    let db = TestDatabase::new().await;
    let seller = db.user("Divya", "divya@college.edu").await;
    let other = db.user("Karan", "karan@college.edu").await;
    let sold = db.item(&seller, "Kettle", 500.0, Category::General).await;
    db.item(&seller, "Iron", 600.0, Category::General).await;
    db.item(&other, "Mattress", 1500.0, Category::Furniture).await;

    db.items
        .transition_status(
            sold.id,
            StatusChange {
                from: AvailabilityStatus::Available,
                to: AvailabilityStatus::Sold,
            },
        )
        .await
        .unwrap();

    let mine = db
        .items
        .find_by_seller(seller.id, PageRequest::first())
        .await
        .unwrap();
    assert_eq!(mine.pagination.total, 2);
    assert!(mine.items.iter().all(|i| i.seller_id == seller.id));
}

#[tokio::test]
async fn test_increment_views() {
    let db = TestDatabase::new().await;
    let seller = db.user("Rohan", "rohan@college.edu").await;
    let item = db.item(&seller, "Headphones", 900.0, Category::Electronics).await;

    db.items.increment_views(item.id).await.unwrap();
    db.items.increment_views(item.id).await.unwrap();

    let found = db.items.find_by_id(item.id).await.unwrap().unwrap();
    assert_eq!(found.view_count, 2);
}
