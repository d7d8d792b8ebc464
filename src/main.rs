use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_analytics::{
    load_books_from_reader, load_members_from_reader, AnalyticsConfig, LibraryAnalytics, VERSION,
};

/// Optional overrides for ranking sizes and the report destination
const CONFIG_PATH: &str = "library_analytics.json";

const BOOKS_CSV: &str = "\
book_id,title,author,isbn
B001,The Great Gatsby,F. Scott Fitzgerald,978-0-7432-7356-5
B002,1984,George Orwell,978-0-452-28423-4
B003,To Kill a Mockingbird,Harper Lee,978-0-06-112008-4
B004,Pride and Prejudice,Jane Austen,978-0-14-143951-8
B005,The Catcher in the Rye,J.D. Salinger,978-0-316-76948-0
";

const MEMBERS_CSV: &str = "\
member_id,name,email
M001,Alice Johnson,alice@example.com
M002,Bob Smith,bob@example.com
M003,Carol Davis,carol@example.com
";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_analytics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    let mut analytics = LibraryAnalytics::new();

    // 1. Catalog + members
    analytics.import_books(load_books_from_reader(BOOKS_CSV.as_bytes())?);
    analytics.import_members(load_members_from_reader(MEMBERS_CSV.as_bytes())?);

    // 2. Checkouts
    let checkouts = [
        ("M001", "B001", 5),
        ("M001", "B002", 10),
        ("M002", "B001", 6),
        ("M002", "B003", 12),
        ("M003", "B004", 8),
        ("M001", "B004", 15),
    ];
    for (member_id, book_id, day) in checkouts {
        let checkout_date = Utc
            .with_ymd_and_hms(2025, 12, day, 0, 0, 0)
            .single()
            .context("Invalid checkout date")?;
        analytics.process_checkout(member_id, book_id, checkout_date);
    }

    println!("{}", "=".repeat(60));
    println!("LIBRARY BOOK USAGE ANALYTICS SYSTEM v{}", VERSION);
    println!("{}", "=".repeat(60));

    println!("\n📊 Usage Statistics:");
    println!("  {}", analytics.get_usage_statistics().summary());

    println!("\n📚 Most Popular Books:");
    for (i, book) in analytics
        .get_most_popular_books(config.display_limit)
        .iter()
        .enumerate()
    {
        println!("  {}. {}", i + 1, book.summary());
    }

    println!("\n👥 Most Active Members:");
    for (i, member) in analytics
        .get_most_active_members(config.display_limit)
        .iter()
        .enumerate()
    {
        println!("  {}. {}", i + 1, member.summary());
    }

    // 3. Export
    let report_file = analytics.export_report_with(&config)?;
    println!(
        "\n✅ Analytics report exported to: {}",
        report_file.display()
    );
    println!("{}", "=".repeat(60));

    Ok(())
}

fn load_config() -> Result<AnalyticsConfig> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        AnalyticsConfig::from_file(path)
    } else {
        Ok(AnalyticsConfig::default())
    }
}
