// tests/providers_http_feed.rs
use feed_ingest::ingest::normalize::{clean_html, entry_date};
use feed_ingest::ingest::providers::{parse_feed, HttpFeedFetcher};
use feed_ingest::ingest::types::{Category, FeedFetcher, Source};
use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RSS_XML: &str = include_str!("fixtures/hashrate_rss.xml");
const ATOM_XML: &str = include_str!("fixtures/galaxy_atom.xml");

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn rss_fixture_parses_in_feed_order() {
    let items = parse_feed(RSS_XML).expect("rss parse ok");
    assert_eq!(items.len(), 3);

    let titles: Vec<_> = items.iter().map(|e| e.title.as_deref().unwrap()).collect();
    assert_eq!(
        titles,
        vec![
            "Bitcoin Hashrate Hits New High",
            "Weekly Newsletter #42",
            "Hashprice Outlook: Q3"
        ]
    );

    let first = &items[0];
    assert_eq!(
        first.link.as_deref(),
        Some("https://hashrateindex.com/blog/bitcoin-hashrate-new-high/")
    );
    // description wins over content:encoded
    assert_eq!(
        clean_html(first.summary.as_deref().unwrap()),
        "Miners are adding capacity ahead of the summer."
    );
    assert_eq!(entry_date(first), date(2025, 6, 10));
    assert_eq!(entry_date(&items[1]), date(2025, 6, 9));
    assert_eq!(entry_date(&items[2]), date(2025, 5, 1));
    assert_eq!(
        clean_html(items[2].summary.as_deref().unwrap()),
        "Hashprice projections for the quarter."
    );
}

#[test]
fn atom_fixture_parses_links_summaries_and_dates() {
    let items = parse_feed(ATOM_XML).expect("atom parse ok");
    assert_eq!(items.len(), 2);

    let a = &items[0];
    assert_eq!(a.title.as_deref(), Some("Spot ETF Flows & the Basis Trade"));
    assert_eq!(a.published.as_deref(), Some("2025-06-09T20:00:00+00:00"));
    assert_eq!(
        a.link.as_deref(),
        Some("https://www.galaxy.com/research/etf-flows-basis")
    );
    // published (converted to UTC) beats updated
    assert_eq!(entry_date(a), date(2025, 6, 9));
    assert_eq!(
        clean_html(a.summary.as_deref().unwrap()),
        "Institutional inflows resumed."
    );

    let b = &items[1];
    // no published: updated stands in
    assert_eq!(entry_date(b), date(2025, 6, 8));
    assert_eq!(clean_html(b.summary.as_deref().unwrap()), "Supply grew 4%.");
}

#[tokio::test]
async fn http_fetcher_downloads_and_parses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/feed/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(RSS_XML),
        )
        .mount(&server)
        .await;

    let src = Source::new(
        "Hashrate Index",
        &format!("{}/blog/feed/", server.uri()),
        Category::Mining,
    );
    let items = HttpFeedFetcher::new().fetch(&src).await.expect("fetch ok");
    assert_eq!(items.len(), 3);
}

#[tokio::test]
async fn http_fetcher_errors_on_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let src = Source::new("Down", &format!("{}/feed", server.uri()), Category::Macro);
    assert!(HttpFeedFetcher::new().fetch(&src).await.is_err());
}

#[tokio::test]
async fn http_fetcher_errors_on_html_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>Moved</body></html>"),
        )
        .mount(&server)
        .await;

    let src = Source::new("Moved", &format!("{}/feed", server.uri()), Category::Ta);
    let err = HttpFeedFetcher::new().fetch(&src).await.unwrap_err();
    assert!(format!("{err:#}").contains("not a feed document"));
}

#[tokio::test]
async fn http_fetcher_errors_on_unreachable_host() {
    let src = Source::new("Nowhere", "http://127.0.0.1:9/feed", Category::Flow);
    let fetcher = HttpFeedFetcher::new().with_timeout(2);
    assert!(fetcher.fetch(&src).await.is_err());
}
