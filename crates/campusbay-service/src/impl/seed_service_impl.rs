//! Development seeding implementation.

use crate::cache::CacheInterface;
use crate::seed_service::{SeedReport, SeedService};
use crate::user_summaries::evict_all;
use async_trait::async_trait;
use campusbay_core::{CampusBayError, CampusBayResult};
use campusbay_domain::{Category, Email, Item, NewItem, User};
use campusbay_repository::{ClearReport, ItemRepository, MaintenanceRepository, UserRepository};
use campusbay_security::PasswordHasherInterface;
use shaku::Component;
use std::sync::Arc;
use tracing::{info, warn};

/// Password shared by every sample account.
pub const SAMPLE_PASSWORD: &str = "Password@123";

const SAMPLE_COLLEGE: &str = "BMS College of Engineering";

const SAMPLE_USERS: &[(&str, &str)] = &[
    ("Priya Sharma", "priya.sharma@bmsce.ac.in"),
    ("Rahul Verma", "rahul.verma@bmsce.ac.in"),
    ("Ananya Patel", "ananya.patel@bmsce.ac.in"),
    ("Arjun Singh", "arjun.singh@bmsce.ac.in"),
    ("Sneha Reddy", "sneha.reddy@bmsce.ac.in"),
    ("Vikram Rao", "vikram.rao@bmsce.ac.in"),
    ("Kavya Iyer", "kavya.iyer@bmsce.ac.in"),
    ("Aditya Kumar", "aditya.kumar@bmsce.ac.in"),
];

struct SampleItem {
    title: &'static str,
    description: &'static str,
    price: f64,
    category: Category,
    location: &'static str,
}

macro_rules! sample {
    ($title:expr, $description:expr, $price:expr, $category:ident, $location:expr) => {
        SampleItem {
            title: $title,
            description: $description,
            price: $price,
            category: Category::$category,
            location: $location,
        }
    };
}

const SAMPLE_ITEMS: &[SampleItem] = &[
    sample!("Engineering Mathematics by BS Grewal", "Complete textbook with solved examples. Excellent condition, minimal highlighting.", 350.0, Books, "Main Gate"),
    sample!("Data Structures in C - Tanenbaum", "CS semester 3 textbook. Good condition with some notes.", 280.0, Books, "Library Block"),
    sample!("NCERT Physics Class 12", "Barely used, perfect for JEE revision.", 180.0, Books, "Hostel 2"),
    sample!("Digital Electronics - Morris Mano", "4th sem ECE textbook. Clean copy.", 320.0, Books, "ECE Block"),
    sample!("OnePlus Nord CE 2", "8GB RAM, 128GB storage. Excellent condition, 11 months old. Charger included.", 15500.0, Electronics, "Hostel 1"),
    sample!("Realme Buds Air 3", "Brand new, sealed pack. Won in college fest.", 2800.0, Electronics, "Main Gate"),
    sample!("HP Laptop i5 10th Gen", "8GB RAM, 512GB SSD. Perfect for coding and projects. 2 years old.", 32000.0, Electronics, "Boys Hostel"),
    sample!("JBL Go 3 Speaker", "Portable Bluetooth speaker. 6 months old, great sound quality.", 1800.0, Electronics, "Library"),
    sample!("Logitech Wireless Mouse", "M235 model, barely used. Battery included.", 450.0, Electronics, "IT Block"),
    sample!("College Uniform Set", "2 shirts + 2 trousers (M size). Well maintained.", 800.0, Fashion, "Hostel 3"),
    sample!("Printed Kurta for Girls", "Cotton kurta, size L. Perfect for college culturals.", 550.0, Fashion, "Girls Hostel"),
    sample!("Formal Shoes - Bata", "Black formal shoes, size 9. Worn only 3-4 times.", 900.0, Fashion, "Main Block"),
    sample!("Denim Jacket - Levis", "Light blue denim jacket, size M. Trendy and comfortable.", 1200.0, Fashion, "Canteen Area"),
    sample!("Scientific Calculator Casio fx-991EX", "Perfect for exams, all functions working. With cover.", 650.0, Stationery, "Admin Block"),
    sample!("DS Class Notes", "Toppers Handwritten Notes.", 250.0, Stationery, "Stationary Shop"),
    sample!("Parker Pen Set", "Blue and black Parker pens with refills. Premium quality.", 380.0, Stationery, "Library"),
    sample!("Engineering Drawing Set", "Complete set with compass, protractor, scales. Rarely used.", 420.0, Stationery, "Mechanical Block"),
    sample!("Study Table with Chair", "Wooden study table + revolving chair. Perfect for hostel room.", 2500.0, Furniture, "Hostel room"),
    sample!("Book Shelf - 4 Tier", "Metal bookshelf, holds 50+ books. Compact design.", 1200.0, Furniture, "Hostel 2"),
    sample!("Mattress Single Bed", "Foam mattress 6 inch thick. Clean and well maintained.", 1800.0, Furniture, "Hostel Market"),
    sample!("Wall Clock Digital", "Large display digital wall clock with alarm. Battery operated.", 350.0, Furniture, "Hostel 1"),
    sample!("Guitar - Yamaha F280", "Acoustic guitar in excellent condition. Comes with bag and picks.", 6500.0, General, "Music Room"),
    sample!("Badminton Racket Yonex", "Professional racket with cover. Barely used.", 1100.0, General, "Sports Complex"),
    sample!("Cycle - Hero Sprint", "21 gear cycle, 2 years old. Well maintained.", 4200.0, General, "Cycle Stand"),
    sample!("Water Bottle Milton 1L", "Insulated water bottle, keeps water cold for 24hrs.", 280.0, General, "BMSETH Mess"),
];

/// Seeding service component.
#[derive(Component)]
#[shaku(interface = SeedService)]
pub struct SeedServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    item_repository: Arc<dyn ItemRepository>,
    #[shaku(inject)]
    maintenance_repository: Arc<dyn MaintenanceRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl SeedServiceComponent {
    async fn evict_summaries(&self) {
        if let Err(e) = evict_all(self.cache.as_ref()).await {
            warn!("Failed to evict cached user summaries: {}", e);
        }
    }

    async fn seed_users(&self) -> CampusBayResult<Vec<User>> {
        let password_hash = self.password_hasher.hash(SAMPLE_PASSWORD)?;
        let mut users = Vec::with_capacity(SAMPLE_USERS.len());

        for (name, email) in SAMPLE_USERS {
            let email = Email::new(*email).map_err(|e| CampusBayError::internal(e.to_string()))?;
            let domain = email.domain().to_string();
            // Sample accounts are trusted regardless of the configured college domain.
            let user = User::register(
                (*name).to_string(),
                email,
                password_hash.clone(),
                Some(SAMPLE_COLLEGE.to_string()),
                &domain,
            );
            users.push(self.user_repository.save(&user).await?);
        }
        Ok(users)
    }
}

#[async_trait]
impl SeedService for SeedServiceComponent {
    async fn seed(&self) -> CampusBayResult<SeedReport> {
        info!("Seeding sample marketplace data");

        self.maintenance_repository.clear_all().await?;
        let users = self.seed_users().await?;

        for (index, sample) in SAMPLE_ITEMS.iter().enumerate() {
            let seller = &users[index % users.len()];
            let item = Item::list(
                seller.id,
                NewItem {
                    title: sample.title.to_string(),
                    description: sample.description.to_string(),
                    price: sample.price,
                    category: sample.category,
                    location: Some(sample.location.to_string()),
                    images: vec![format!("/uploads/{}_logo.png", sample.category.as_str().to_lowercase())],
                },
            );
            self.item_repository.save(&item).await?;
        }

        self.evict_summaries().await;

        let report = SeedReport {
            users: users.len(),
            items: SAMPLE_ITEMS.len(),
        };
        info!(?report, "Seeding complete");
        Ok(report)
    }

    async fn clear(&self) -> CampusBayResult<ClearReport> {
        let report = self.maintenance_repository.clear_all().await?;
        self.evict_summaries().await;
        Ok(report)
    }
}

impl std::fmt::Debug for SeedServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedServiceComponent").finish_non_exhaustive()
    }
}
