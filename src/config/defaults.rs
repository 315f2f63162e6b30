// src/config/defaults.rs
//! Built-in source list, keyword list and chart-capable set, used when no
//! feeds file is found.

use crate::ingest::types::{Category, Source};

pub fn sources() -> Vec<Source> {
    use Category::*;
    vec![
        // Macro + Bitcoin
        Source::new("Crypto is Macro Now", "https://www.cryptoismacro.com/feed", Macro),
        Source::new("Lyn Alden", "https://www.lynalden.com/feed/", Macro),
        Source::new("Bitwise CIO Memo", "https://bitwiseinvestments.substack.com/feed", Macro),
        Source::new("Benjamin Cowen", "https://intothecryptoverse.substack.com/feed", Macro),
        Source::new("Onramp Bitcoin", "https://onrampbitcoin.com/feed", Macro),
        // Narrative newsletters
        Source::new("Pantera Letter", "https://panteracapital.com/feed/", Macro),
        Source::new("Milk Road", "https://milkroad.com/feed", Macro),
        Source::new("CoinSnacks", "https://coinsnacks.com/feed", Macro),
        // Mining / hashrate
        Source::new("TheMinerMag", "https://theminermag.com/feed/", Mining),
        Source::new("Hashrate Index", "https://hashrateindex.com/blog/feed/", Mining),
        // Institutional flow
        Source::new("CoinShares Blog", "https://blog.coinshares.com/feed", Flow),
        // Research / ETF reports
        Source::new("21Shares Research", "https://www.21shares.com/feed", Macro),
        Source::new("Galaxy Research", "https://www.galaxy.com/research/feed/", Research),
        Source::new("Messari Research", "https://messari.io/feed", Research),
        // Chart-driven TA
        Source::new("Darkex Weekly TA", "https://academy.darkex.com/feed", Ta),
        Source::new(
            "CoinDesk Charts",
            "https://data.coindesk.com/chart-of-the-week/feed",
            Ta,
        ),
    ]
}

pub fn keywords() -> Vec<String> {
    [
        // BTC / mining
        "bitcoin", "btc", "satoshi",
        "hashrate", "hash price", "hashprice", "mining", "miner",
        "halving", "block reward", "difficulty", "hash ribbon", "capitulation",
        // macro
        "macro", "liquidity", "m2", "m3", "money supply",
        "fed", "federal reserve", "interest rate", "yield curve",
        "treasury", "bond", "real yield",
        "dollar", "usd", "dxy", "inflation", "cpi", "ppi",
        // flows / institutions
        "etf", "spot etf", "fund flow", "inflow", "outflow",
        "institutional", "hedge fund", "asset manager",
        // crypto market
        "crypto", "cryptocurrency", "digital asset", "blockchain",
        "defi", "stablecoin", "altcoin", "on-chain",
        // cycle / sentiment
        "cycle", "bull", "bear", "risk-on", "risk-off", "liquidity cycle",
        // zh-TW
        "比特幣", "礦工", "挖礦", "減半", "現貨 etf", "宏觀", "流動性", "聯準會",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn chart_sources() -> Vec<String> {
    [
        "TheMinerMag",
        "Hashrate Index",
        "CoinShares Blog",
        "21Shares Research",
        "Galaxy Research",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
