//! Post and thread text (es-MX).

use chrono::{DateTime, Utc};
use fnshop_core::{format_item_line, format_price, rarity_label, FlatItem};

/// Hard cap per tweet, below the platform limit to leave room for edits.
pub const MAX_TWEET_CHARS: usize = 270;

/// Items whose price equals this are highlighted in the thread.
pub const HIGHLIGHT_PRICE: u32 = 1500;

/// Thread length in item lines.
pub const HIGHLIGHT_COUNT: usize = 5;

/// Item names listed in the Facebook message.
pub const FACEBOOK_HEADLINES: usize = 6;

const FACEBOOK_FOOTER: &str =
    "Precios en V-Bucks, rareza y rotación diaria aquí mismo todos los días. 🎮🔥";

const TWEET_FOOTER: &str = "Catálogo completo + precios diarios en mi Facebook 📲";

/// Facebook feed message: dated title, the first few item names, footer.
#[must_use]
pub fn facebook_message(now: DateTime<Utc>, items: &[FlatItem]) -> String {
    let names = items
        .iter()
        .take(FACEBOOK_HEADLINES)
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(" · ");

    format!(
        "🛒 Tienda de Fortnite - {}\n\n{names}\n\n{FACEBOOK_FOOTER}",
        now.format("%d %b %Y")
    )
}

/// Caption attached to each uploaded photo.
#[must_use]
pub fn photo_caption(item: &FlatItem) -> String {
    format!(
        "{} — {} ({})",
        item.name,
        format_price(item.price),
        rarity_label(item.rarity)
    )
}

/// Items priced at [`HIGHLIGHT_PRICE`] first, topped up in shop order until
/// there are [`HIGHLIGHT_COUNT`].
#[must_use]
pub fn highlights(items: &[FlatItem]) -> Vec<&FlatItem> {
    let (featured, rest): (Vec<&FlatItem>, Vec<&FlatItem>) = items
        .iter()
        .partition(|i| i.price == Some(HIGHLIGHT_PRICE));

    featured
        .into_iter()
        .chain(rest)
        .take(HIGHLIGHT_COUNT)
        .collect()
}

#[must_use]
pub fn tweet_header(now: DateTime<Utc>) -> String {
    format!(
        "🛍 Tienda de Fortnite ({}) 🎮 {}\nYa salió la tienda de hoy con TODOS los objetos y rareza.\n",
        now.format("%d/%m/%Y"),
        now.format("%H:%M")
    )
}

/// Footer pointing at the Facebook page, with its URL when configured.
#[must_use]
pub fn tweet_footer(page_url: Option<&str>) -> String {
    match page_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => format!("{TWEET_FOOTER}\n{url}"),
        None => TWEET_FOOTER.to_owned(),
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Splits a thread into tweets of at most `max_chars` characters.
///
/// The first tweet is header and footer together. Lines follow, packed
/// greedily one per row; a line that alone exceeds the limit is truncated.
/// Trailing whitespace is trimmed from every tweet and blank tweets are
/// never emitted.
#[must_use]
pub fn chunk_lines_into_tweets(
    header: &str,
    lines: &[String],
    footer: &str,
    max_chars: usize,
) -> Vec<String> {
    let first = format!("{}\n\n{}", header.trim_end(), footer.trim_end());
    let mut tweets = vec![truncate_chars(&first, max_chars)];

    let mut current = String::new();
    let mut current_len = 0usize;
    for line in lines {
        let row = format!("{}\n", truncate_chars(line, max_chars.saturating_sub(1)));
        let row_len = row.chars().count();

        if current_len + row_len > max_chars && !current.trim().is_empty() {
            tweets.push(current.trim_end().to_owned());
            current.clear();
            current_len = 0;
        }
        current.push_str(&row);
        current_len += row_len;
    }

    if !current.trim().is_empty() {
        tweets.push(current.trim_end().to_owned());
    }
    tweets
}

/// Full thread for the current shop.
#[must_use]
pub fn twitter_thread(now: DateTime<Utc>, items: &[FlatItem], page_url: Option<&str>) -> Vec<String> {
    let lines: Vec<String> = highlights(items)
        .into_iter()
        .map(format_item_line)
        .collect();
    chunk_lines_into_tweets(
        &tweet_header(now),
        &lines,
        &tweet_footer(page_url),
        MAX_TWEET_CHARS,
    )
}
