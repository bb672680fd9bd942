//! Pure presentation: a refresh state plus a terminal width in, a rendered
//! frame out. No clock, no I/O, no terminal queries — the watch loop
//! samples the width at render time and passes it in, so a resize landing
//! between trigger and completion picks up the current width.

use comfy_table::Cell;
use console::style;

use crate::cli::controller::RefreshState;
use crate::cli::{format, ui};
use crate::core::market::{GlobalSummary, MarketEnvelope, NormalizedCoin};

/// Column threshold at which the remainder switches from stacked cards to
/// the full table.
pub const WIDE_LAYOUT_MIN_COLS: u16 = 100;

/// Coins shown in the top strip before the remainder listing.
pub const STRIP_COINS: usize = 3;

const STRIP_PLACEHOLDERS: usize = 3;
const GRID_PLACEHOLDERS: usize = 8;
const STRIP_COL_WIDTH: usize = 26;

pub const NO_DATA_MESSAGE: &str = "No cryptocurrency data available. Please try again later.";

/// Ticker symbol from the raw pair label: "BTC/USD" yields "BTC". Labels
/// without a "/" (including coerced non-string labels) yield "N/A".
pub fn coin_symbol(label: &str) -> &str {
    match label.split_once('/') {
        Some((symbol, _)) => symbol,
        None => "N/A",
    }
}

fn display_name(coin: &NormalizedCoin) -> &str {
    if coin.name.is_empty() {
        "N/A"
    } else {
        &coin.name
    }
}

pub fn render(state: &RefreshState, width: u16) -> String {
    match state {
        RefreshState::Idle | RefreshState::Loading => render_loading(),
        RefreshState::Populated { envelope, currency } => {
            render_populated(envelope, currency, width)
        }
        RefreshState::Failed { message } => render_failed(message),
    }
}

/// Fixed-count skeleton frame: 3 strip cards and 8 grid bars. Shown before
/// every fetch so stale data is never on screen while a load is pending.
fn render_loading() -> String {
    let mut frame = String::new();
    frame.push_str(&ui::style_text(
        "Loading market data...",
        ui::StyleType::Subtle,
    ));
    frame.push_str("\n\n");

    let card_bar = "\u{2593}".repeat(16);
    let strip_line = vec![card_bar; STRIP_PLACEHOLDERS].join("   ");
    frame.push_str(&ui::style_text(&strip_line, ui::StyleType::Subtle));
    frame.push_str("\n\n");

    for _ in 0..GRID_PLACEHOLDERS {
        let grid_bar = "\u{2591}".repeat(40);
        frame.push_str(&ui::style_text(&grid_bar, ui::StyleType::Subtle));
        frame.push('\n');
    }
    frame
}

fn render_totals(global: &GlobalSummary, currency: &str) -> String {
    let cap_text = format::format_currency(global.total_market_cap, currency);
    let cap_style = if global.total_market_cap.is_some() {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Error
    };
    let volume_text = format::format_currency(global.total_24h_volume, currency);
    let volume_style = if global.total_24h_volume.is_some() {
        ui::StyleType::TotalValue
    } else {
        ui::StyleType::Error
    };

    format!(
        "{} {}    {} {}\n",
        ui::style_text("Total Market Cap:", ui::StyleType::TotalLabel),
        ui::style_text(&cap_text, cap_style),
        ui::style_text("24h Volume:", ui::StyleType::TotalLabel),
        ui::style_text(&volume_text, volume_style),
    )
}

/// The first coins as side-by-side cards: name + symbol, price, 24h change.
fn render_strip(coins: &[NormalizedCoin], currency: &str) -> String {
    let pad = |text: &str| format!("{text:<width$}", width = STRIP_COL_WIDTH);

    let mut title_line = String::new();
    let mut price_line = String::new();
    let mut change_line = String::new();
    for coin in coins {
        let title = format!("{} ({})", display_name(coin), coin_symbol(&coin.label));
        title_line.push_str(&style(pad(&title)).bold().to_string());
        price_line.push_str(&pad(&format::format_currency(coin.price, currency)));

        let change = pad(&format::format_change(coin.change24h));
        let styled_change = match coin.change24h.filter(|c| c.is_finite()) {
            Some(c) if c > 0.0 => style(change).green(),
            Some(c) if c < 0.0 => style(change).red(),
            _ => style(change).dim(),
        };
        change_line.push_str(&styled_change.to_string());
    }

    format!("{title_line}\n{price_line}\n{change_line}\n")
}

/// Wide layout: the remainder as a ranked table, numbering continuing
/// after the strip.
fn render_table(coins: &[NormalizedCoin], currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Coin"),
        ui::header_cell("Price"),
        ui::header_cell("24h Change"),
        ui::header_cell("Market Cap"),
        ui::header_cell("Volume 24h"),
    ]);

    for (index, coin) in coins.iter().enumerate() {
        table.add_row(vec![
            Cell::new(STRIP_COINS + index + 1),
            Cell::new(format!(
                "{} ({})",
                display_name(coin),
                coin_symbol(&coin.label)
            )),
            ui::money_cell(coin.price, currency),
            ui::change_cell(coin.change24h),
            ui::money_cell(coin.market_cap, currency),
            ui::money_cell(coin.volume24h, currency),
        ]);
    }

    table.to_string()
}

/// Narrow layout: the remainder as stacked compact cards.
fn render_cards(coins: &[NormalizedCoin], currency: &str) -> String {
    let mut out = String::new();
    for coin in coins {
        out.push_str(&format!(
            "{} ({})\n  {}  {}\n",
            ui::style_text(display_name(coin), ui::StyleType::TotalLabel),
            coin_symbol(&coin.label),
            format::format_currency(coin.price, currency),
            ui::style_change(coin.change24h),
        ));
    }
    out
}

fn render_populated(envelope: &MarketEnvelope, currency: &str, width: u16) -> String {
    if envelope.coins.is_empty() {
        return format!("\n{NO_DATA_MESSAGE}\n");
    }

    let mut frame = String::new();
    frame.push_str(&ui::style_text(
        &format!("Market Overview ({})", currency.to_uppercase()),
        ui::StyleType::Title,
    ));
    frame.push_str("\n\n");
    frame.push_str(&render_totals(&envelope.global, currency));
    frame.push('\n');

    let strip_len = envelope.coins.len().min(STRIP_COINS);
    frame.push_str(&render_strip(&envelope.coins[..strip_len], currency));

    let rest = &envelope.coins[strip_len..];
    if !rest.is_empty() {
        frame.push('\n');
        // Width is sampled at render time, not at trigger time.
        if width >= WIDE_LAYOUT_MIN_COLS {
            frame.push_str(&render_table(rest, currency));
        } else {
            frame.push_str(&render_cards(rest, currency));
        }
        frame.push('\n');
    }
    frame
}

fn render_failed(message: &str) -> String {
    let mut frame = String::new();
    frame.push_str(&render_totals(&GlobalSummary::default(), "usd"));
    frame.push('\n');
    frame.push_str(&ui::style_text(message, ui::StyleType::Error));
    frame.push('\n');
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(name: &str, label: &str, price: Option<f64>, change: Option<f64>) -> NormalizedCoin {
        NormalizedCoin {
            name: name.to_string(),
            label: label.to_string(),
            price,
            change24h: change,
            market_cap: Some(1_000_000.0),
            volume24h: Some(500_000.0),
            image_url: None,
        }
    }

    fn populated(coins: Vec<NormalizedCoin>) -> RefreshState {
        RefreshState::Populated {
            envelope: MarketEnvelope {
                coins,
                global: GlobalSummary {
                    total_market_cap: Some(2_500_000_000_000.0),
                    total_24h_volume: Some(90_000_000_000.0),
                },
            },
            currency: "usd".to_string(),
        }
    }

    fn plain(frame: &str) -> String {
        console::strip_ansi_codes(frame).to_string()
    }

    #[test]
    fn test_symbol_extraction() {
        assert_eq!(coin_symbol("BTC/USD"), "BTC");
        assert_eq!(coin_symbol("ETH/EUR"), "ETH");
        assert_eq!(coin_symbol("123"), "N/A");
        assert_eq!(coin_symbol(""), "N/A");
    }

    #[test]
    fn test_loading_frame_has_fixed_placeholder_counts() {
        let frame = plain(&render(&RefreshState::Loading, 120));
        let strip_bar = "\u{2593}".repeat(16);
        let grid_bar = "\u{2591}".repeat(40);
        assert_eq!(frame.matches(&strip_bar).count(), 3);
        assert_eq!(frame.matches(&grid_bar).count(), 8);
    }

    #[test]
    fn test_idle_renders_like_loading() {
        assert_eq!(
            plain(&render(&RefreshState::Idle, 80)),
            plain(&render(&RefreshState::Loading, 80))
        );
    }

    #[test]
    fn test_empty_coins_shows_no_data_message() {
        let state = RefreshState::Populated {
            envelope: MarketEnvelope::default(),
            currency: "usd".to_string(),
        };
        let frame = plain(&render(&state, 120));
        assert!(frame.contains(NO_DATA_MESSAGE));
        // Summary region hidden along with the listing
        assert!(!frame.contains("Total Market Cap"));
    }

    #[test]
    fn test_populated_shows_totals_and_strip() {
        let state = populated(vec![
            coin("Bitcoin", "BTC/USD", Some(68123.45), Some(2.15)),
            coin("Ethereum", "ETH/USD", Some(3200.0), Some(-1.2)),
        ]);
        let frame = plain(&render(&state, 120));

        assert!(frame.contains("Market Overview (USD)"));
        assert!(frame.contains("$2,500,000,000,000.00"));
        assert!(frame.contains("$90,000,000,000.00"));
        assert!(frame.contains("Bitcoin (BTC)"));
        assert!(frame.contains("$68,123.45"));
        assert!(frame.contains("+2.15%"));
        // Two coins only: everything fits in the strip, no remainder table.
        assert!(!frame.contains("24h Change"));
    }

    #[test]
    fn test_wide_layout_renders_remainder_as_ranked_table() {
        let coins = (1..=5)
            .map(|i| coin(&format!("Coin{i}"), "C/USD", Some(i as f64), Some(0.5)))
            .collect();
        let frame = plain(&render(&populated(coins), 120));

        // Table headers present, rank continues after the 3-coin strip.
        assert!(frame.contains("24h Change"));
        assert!(frame.contains("Volume 24h"));
        assert!(frame.contains("Coin4 (C)"));
        assert!(frame.contains(" 4 "));
        assert!(frame.contains(" 5 "));
        // Strip coins do not repeat in the table.
        assert_eq!(frame.matches("Coin1 (C)").count(), 1);
    }

    #[test]
    fn test_narrow_layout_renders_remainder_as_cards() {
        let coins = (1..=5)
            .map(|i| coin(&format!("Coin{i}"), "C/USD", Some(i as f64), Some(0.5)))
            .collect();
        let frame = plain(&render(&populated(coins), 80));

        assert!(frame.contains("Coin4 (C)"));
        // No table chrome in the card layout.
        assert!(!frame.contains("Volume 24h"));
        assert!(!frame.contains("\u{2502}"));
    }

    #[test]
    fn test_malformed_price_renders_na() {
        let state = populated(vec![
            coin("Bitcoin", "BTC/USD", Some(68123.45), Some(2.15)),
            coin("Junkcoin", "JNK/USD", None, None),
        ]);
        let frame = plain(&render(&state, 120));

        assert!(frame.contains("$68,123.45"));
        assert!(frame.contains("N/A"));
    }

    #[test]
    fn test_null_totals_render_na() {
        let state = RefreshState::Populated {
            envelope: MarketEnvelope {
                coins: vec![coin("Bitcoin", "BTC/USD", Some(1.0), None)],
                global: GlobalSummary::default(),
            },
            currency: "usd".to_string(),
        };
        let frame = plain(&render(&state, 120));
        assert!(frame.contains("Total Market Cap: N/A"));
        assert!(frame.contains("24h Volume: N/A"));
    }

    #[test]
    fn test_failed_shows_message_and_na_totals() {
        let state = RefreshState::Failed {
            message: "proxy unreachable".to_string(),
        };
        let frame = plain(&render(&state, 120));

        assert!(frame.contains("proxy unreachable"));
        assert!(frame.contains("Total Market Cap: N/A"));
        assert!(frame.contains("24h Volume: N/A"));
    }

    #[test]
    fn test_currency_follows_populated_state() {
        let state = RefreshState::Populated {
            envelope: MarketEnvelope {
                coins: vec![coin("Bitcoin", "BTC/EUR", Some(60000.0), None)],
                global: GlobalSummary {
                    total_market_cap: Some(1000.0),
                    total_24h_volume: None,
                },
            },
            currency: "eur".to_string(),
        };
        let frame = plain(&render(&state, 120));
        assert!(frame.contains("Market Overview (EUR)"));
        assert!(frame.contains("\u{20ac}1,000.00"));
    }
}
