// tests/ingest_normalize.rs
use chrono::NaiveDate;
use feed_ingest::ingest::normalize::{clean_html, normalize, NO_TITLE};
use feed_ingest::ingest::types::{Category, RawEntry, Record, Source};

fn src() -> Source {
    Source::new("Lyn Alden", "https://lynalden.test/feed", Category::Macro)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

#[test]
fn empty_is_ok() {
    assert_eq!(clean_html(""), "");
}

#[test]
fn strips_nested_tags() {
    assert_eq!(clean_html("<p>Hello <b>World</b></p>"), "Hello World");
    assert_eq!(
        clean_html(r#"<a href="https://x.test">link</a> text<br/>"#),
        "link text"
    );
}

#[test]
fn length_cap_applies() {
    let s = format!("<p>{}</p>", "x".repeat(2_000));
    assert_eq!(clean_html(&s).chars().count(), 500);
    let zh = "流動性".repeat(400);
    assert_eq!(clean_html(&zh).chars().count(), 500);
}

#[test]
fn every_missing_field_combination_normalizes() {
    let some = |s: &str| Some(s.to_string());
    for mask in 0u8..32 {
        let raw = RawEntry {
            title: (mask & 1 != 0).then(|| "T".to_string()),
            summary: if mask & 2 != 0 { some("<i>S</i>") } else { None },
            link: if mask & 4 != 0 { some("https://l.test") } else { None },
            published: if mask & 8 != 0 { some("nonsense") } else { None },
            updated: if mask & 16 != 0 { some("") } else { None },
        };
        let n = normalize(&raw, &src(), false, today());
        assert_eq!(n.date, today(), "mask {mask}");
        assert_eq!(n.title, if mask & 1 != 0 { "T" } else { NO_TITLE });
        assert_eq!(n.summary, if mask & 2 != 0 { "S" } else { "" });
    }
}

#[test]
fn record_limits_are_separate_from_summary_cap() {
    let raw = RawEntry {
        title: Some("t".repeat(3_000)),
        summary: Some("s".repeat(3_000)),
        ..Default::default()
    };
    let n = normalize(&raw, &src(), false, today());
    assert_eq!(n.title.chars().count(), 3_000);
    assert_eq!(n.summary.chars().count(), 500);

    let r = Record::from_entry(&n);
    assert_eq!(r.title.chars().count(), 2_000);
    assert_eq!(r.summary.chars().count(), 500);
}
