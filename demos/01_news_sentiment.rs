use stockpulse_rs::{FeedStatus, PulseClient, Ticker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Build a client from NEWS_API_KEY and friends (a .env file is honored).
    let client = PulseClient::builder_from_env()?.build()?;
    if !client.has_news_key() {
        println!("NEWS_API_KEY is not set; feeds will be empty.");
    }

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "INFY.NS".to_string());
    let ticker = Ticker::new(&client, &symbol);

    // 2. Relevance-filtered news with a sentiment tally.
    let report = ticker.news_sentiment().await;
    let now = chrono::Utc::now();
    println!("--- News for {} ({:?}) ---", report.feed.symbol, report.feed.status);
    if report.feed.status == FeedStatus::Fallback {
        println!("(no company-specific coverage; showing broad market news)");
    }
    for article in &report.feed.articles {
        println!(
            "[{}] {} - {}",
            article.age_label(now),
            article.title,
            article.source_name
        );
    }

    let t = report.tally;
    println!(
        "\nPositive: {}  Negative: {}  Neutral: {}  Total: {}",
        t.positive, t.negative, t.neutral, t.total
    );
    match t.overall() {
        Some(o) => println!("Overall: {:+.1}% ({})", o.score, o.label),
        None => println!("Overall: no data"),
    }

    // 3. Ownership from the NSE disclosure.
    println!("\n--- Shareholding ---");
    match ticker.shareholding().await {
        Ok(Some(b)) => {
            println!("Promoters: {:.2}%", b.promoters);
            println!("Foreign institutions: {:.2}%", b.foreign_institutions);
            println!("Domestic institutions: {:.2}%", b.domestic_institutions);
            println!("Retail: {:.2}%", b.retail);
        }
        Ok(None) => println!("NSE reported no categories."),
        Err(e) => println!("Shareholding unavailable: {e}"),
    }

    let split = ticker.promoter_split().await;
    println!(
        "Promoters {:.2}% / public {:.2}%{}",
        split.promoters,
        split.public,
        if split.live { "" } else { " (no source available)" }
    );

    // 4. Key figures and statement history from Yahoo.
    println!("\n--- Fundamentals ---");
    match ticker.fundamentals().await {
        Ok(f) if f.is_empty() => println!("No key figures reported."),
        Ok(f) => {
            if let Some(cap) = f.market_cap {
                println!("Market cap: {cap:.0}");
            }
            if let Some(pe) = f.pe {
                println!("P/E: {pe:.2}");
            }
            if let Some(roe) = f.roe {
                println!("ROE: {roe:.2}%");
            }
        }
        Err(e) => println!("Fundamentals unavailable: {e}"),
    }
    if let Ok(Some(history)) = ticker.financials().await {
        for year in history.years() {
            println!(
                "FY{year}: revenue {:?} cr, profit {:?} cr",
                history.revenue.get(&year),
                history.profit.get(&year)
            );
        }
    }

    Ok(())
}
