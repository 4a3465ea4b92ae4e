use stockpulse_rs::{FeedStatus, NewsBuilder, PulseClient};

use crate::common::live_enabled;

#[tokio::test]
#[ignore]
async fn live_news_for_flagship_symbol() {
    if !live_enabled() {
        return;
    }

    let client = PulseClient::builder_from_env().unwrap().build().unwrap();
    if !client.has_news_key() {
        eprintln!("NEWS_API_KEY not set; skipping");
        return;
    }

    let feed = NewsBuilder::new(&client, "INFY").count(5).fetch().await;

    assert_eq!(feed.symbol, "INFY");
    assert!(feed.len() <= 5);
    if feed.status == FeedStatus::Empty {
        assert!(feed.is_empty());
    } else {
        assert!(feed.articles.iter().all(|a| !a.title.is_empty()));
    }
}
