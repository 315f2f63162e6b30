pub mod feed_xml;
pub mod http_feed;

pub use feed_xml::parse_feed;
pub use http_feed::HttpFeedFetcher;
