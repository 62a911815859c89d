use std::fmt::Write;

use crate::api::{SubscriptionOutcome, RESYNC_PACING};
use crate::app::{AppContext, BotbiError, Result};
use crate::domain::{Article, HomeSections, MarketData, MarketKind, Section};

pub async fn show_news(ctx: &AppContext, all: bool) -> Result<()> {
    let feed = ctx.client.fetch_feed().await?;
    if feed.articles.is_empty() {
        println!("No news yet");
        return Ok(());
    }
    print!("{}", format_news(&feed.articles, all));
    Ok(())
}

pub async fn show_markets(ctx: &AppContext) -> Result<()> {
    let feed = ctx.client.fetch_feed().await?;
    print!("{}", format_markets(&feed.markets));
    Ok(())
}

pub async fn sync(ctx: &AppContext) -> Result<()> {
    println!(
        "Syncing with Botbi AI (starting in {}s)...",
        RESYNC_PACING.as_secs()
    );
    let report = ctx.client.trigger_resync().await?;
    println!(
        "Sync complete. {} new articles.",
        report.new_article_count
    );
    Ok(())
}

pub async fn subscribe(ctx: &AppContext, email: &str) -> Result<()> {
    match ctx.client.submit_subscription(email).await? {
        SubscriptionOutcome::Sent => {
            println!("Email sent successfully!");
            Ok(())
        }
        SubscriptionOutcome::Rejected(message) => Err(BotbiError::Application(message)),
    }
}

/// Home selection per section, or every article with `all`.
pub fn format_news(articles: &[Article], all: bool) -> String {
    let mut out = String::new();

    if all {
        for (i, article) in articles.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. [{}] {}", i + 1, article.category, article.title);
        }
        return out;
    }

    let sections = HomeSections::partition(articles);
    for section in [Section::Technology, Section::Business] {
        let Some(group) = sections.group(section) else {
            continue;
        };
        let Some(hero) = group.hero else {
            continue;
        };

        let _ = writeln!(out, "== {} ==", section.title());
        let _ = writeln!(out, "* {}", hero.title);
        if !hero.display_summary().is_empty() {
            let _ = writeln!(out, "  {}", hero.display_summary());
        }
        for article in &group.secondary {
            let _ = writeln!(out, "  - {}", article.title);
        }
        if group.hidden() > 0 {
            let _ = writeln!(out, "  (+{} more)", group.hidden());
        }
        out.push('\n');
    }
    out
}

pub fn format_markets(markets: &MarketData) -> String {
    let mut out = String::new();
    for (kind, title) in [(MarketKind::Equity, "Stocks"), (MarketKind::Crypto, "Crypto")] {
        let _ = writeln!(out, "{}", title);
        let quotes = markets.quotes(kind);
        if quotes.is_empty() {
            let _ = writeln!(out, "  (no data)");
        }
        for quote in quotes {
            let _ = writeln!(
                out,
                "  {:<8} {:>14} {:>9}",
                quote.symbol,
                quote.format_price(kind),
                quote.format_change()
            );
        }
    }
    out
}
