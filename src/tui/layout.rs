use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use crate::config::{ColorConfig, Config};
use crate::controller::{Severity, SubscribeStatus, SyncPhase};
use crate::domain::{
    Article, Category, CategoryGroup, MarketKind, MarketQuote, Section, SECONDARY_LIMIT,
};
use crate::tui::app::{Focus, MenuEntry, TuiApp};
use crate::tui::event::Action;

const SKELETON: char = '░';
const PLACEHOLDER_ROWS: usize = 3;
const SUMMARY_LINES: usize = 2;

pub fn render(frame: &mut Frame, app: &mut TuiApp, config: &Config) {
    let colors = &config.colors;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], colors);

    if app.router.is_home() {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[1]);
        render_news_pane(frame, app, panes[0], colors);
        render_markets_pane(frame, app, panes[1], colors);
    } else {
        render_detail(frame, app, chunks[1], colors);
    }

    render_status_bar(frame, app, chunks[2], config);

    if app.menu_open {
        render_menu(frame, app, chunks[1], colors);
    }
    if app.newsletter_open {
        render_newsletter_modal(frame, app, chunks[1], colors);
    }
    if app.actions.is_syncing() {
        let area = frame.area();
        render_sync_overlay(frame, app, area, colors);
    }
    render_toast(frame, app, chunks[1], colors);
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let mut spans = vec![Span::styled(
        " BOTBI news ",
        Style::default()
            .fg(colors.selection_fg)
            .bg(colors.accent)
            .add_modifier(Modifier::BOLD),
    )];

    let location = match app.router.article() {
        Some(article) => format!(" {} ", article.category),
        None => " Home ".to_string(),
    };
    spans.push(Span::styled(location, Style::default().fg(colors.muted)));

    if app.feed.is_loading() {
        spans.push(Span::styled(
            "Loading...",
            Style::default().fg(colors.accent),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn section_color(section: Section, colors: &ColorConfig) -> Color {
    match section {
        Section::Technology => colors.technology,
        Section::Business => colors.business,
        Section::Top | Section::Markets => colors.accent,
    }
}

fn category_color(category: &Category, colors: &ColorConfig) -> Color {
    if Section::Technology.includes(category) {
        colors.technology
    } else if Section::Business.includes(category) {
        colors.business
    } else {
        colors.muted
    }
}

/// Lines of the news pane plus where each anchor and the selection landed.
struct NewsView {
    lines: Vec<Line<'static>>,
    anchors: Vec<(Section, usize)>,
    selected: Option<(usize, usize)>,
}

fn build_news_view(app: &TuiApp, width: usize, colors: &ColorConfig) -> NewsView {
    let mut view = NewsView {
        lines: Vec::new(),
        anchors: Vec::new(),
        selected: None,
    };
    let sections = app.sections();
    // Until a cycle succeeds there is nothing to show but placeholders.
    let placeholders = app.feed.is_loading() || !app.feed.has_data();
    let mut entry = 0;

    for section in [Section::Technology, Section::Business] {
        let color = section_color(section, colors);
        view.anchors.push((section, view.lines.len()));
        view.lines.push(Line::from(Span::styled(
            format!("── {} ", section.title().to_uppercase()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));

        if placeholders {
            push_skeleton(&mut view.lines, width, colors);
            continue;
        }

        let Some(group) = sections.group(section) else {
            continue;
        };
        if group.is_empty() {
            view.lines.push(Line::from(Span::styled(
                "  No news in this section yet.",
                Style::default().fg(colors.muted),
            )));
            view.lines.push(Line::from(""));
            continue;
        }

        push_group(
            &mut view,
            group,
            &mut entry,
            app.home_index,
            width,
            app.focus,
            colors,
        );
    }

    view
}

fn push_group(
    view: &mut NewsView,
    group: &CategoryGroup<'_>,
    entry: &mut usize,
    selected_entry: usize,
    width: usize,
    focus: Focus,
    colors: &ColorConfig,
) {
    let selected_style = if focus == Focus::News {
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    for (position, article) in group.rendered().enumerate() {
        let is_selected = *entry == selected_entry;
        let start = view.lines.len();
        let marker = if is_selected { "> " } else { "  " };

        let mut block = if position == 0 {
            hero_lines(article, marker, width, colors)
        } else {
            secondary_lines(article, marker, width, colors)
        };

        if is_selected {
            if let Some(first) = block.first_mut() {
                *first = std::mem::take(first).style(selected_style);
            }
            view.selected = Some((start, block.len()));
        }
        view.lines.append(&mut block);
        *entry += 1;
    }

    if group.hidden() > 0 {
        view.lines.push(Line::from(Span::styled(
            format!("  +{} more", group.hidden()),
            Style::default().fg(colors.muted),
        )));
    }
    view.lines.push(Line::from(""));
}

fn hero_lines(
    article: &Article,
    marker: &str,
    width: usize,
    colors: &ColorConfig,
) -> Vec<Line<'static>> {
    let mut meta = vec![Span::styled(
        format!("[{}]", article.category),
        Style::default().fg(category_color(&article.category, colors)),
    )];
    if let Some(date) = article.published_at {
        meta.push(Span::styled(
            format!(" {}", date.format("%d/%m/%Y")),
            Style::default().fg(colors.muted),
        ));
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}{}", marker, truncate(&article.title, width.saturating_sub(2))),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(
            std::iter::once(Span::raw("  "))
                .chain(meta)
                .collect::<Vec<_>>(),
        ),
    ];

    let summary = strip_html(article.display_summary());
    for line in wrap_lines(&summary, width.saturating_sub(2), SUMMARY_LINES) {
        lines.push(Line::from(format!("  {}", line)));
    }
    lines
}

fn secondary_lines(
    article: &Article,
    marker: &str,
    width: usize,
    colors: &ColorConfig,
) -> Vec<Line<'static>> {
    let label = format!("[{}]", article.category);
    let summary = strip_html(article.display_summary());
    let room = width.saturating_sub(label.chars().count() + 5);

    let mut meta = vec![
        Span::raw("    "),
        Span::styled(
            label,
            Style::default().fg(category_color(&article.category, colors)),
        ),
    ];
    if !summary.is_empty() && room > 0 {
        meta.push(Span::styled(
            format!(" {}", truncate(&summary, room)),
            Style::default().fg(colors.muted),
        ));
    }

    vec![
        Line::from(format!(
            "{}• {}",
            marker,
            truncate(&article.title, width.saturating_sub(4))
        )),
        Line::from(meta),
    ]
}

fn push_skeleton(lines: &mut Vec<Line<'static>>, width: usize, colors: &ColorConfig) {
    let style = Style::default().fg(colors.muted);
    let bar = |len: usize| Line::from(Span::styled(format!("  {}", skeleton_bar(len)), style));

    lines.push(bar(width * 3 / 4));
    lines.push(bar(width / 3));
    for _ in 0..SUMMARY_LINES {
        lines.push(bar(width.saturating_sub(4)));
    }
    for i in 0..SECONDARY_LIMIT {
        lines.push(bar((width / 2).saturating_sub((i % 3) * 4)));
    }
    lines.push(Line::from(""));
}

fn skeleton_bar(len: usize) -> String {
    SKELETON.to_string().repeat(len.max(4))
}

fn render_news_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let width = area.width.saturating_sub(2) as usize;
    let height = area.height.saturating_sub(2) as usize;
    let view = build_news_view(app, width, colors);

    if let Some(anchor) = app.pending_anchor.take() {
        match anchor {
            Section::Top => app.news_scroll = 0,
            Section::Markets => {}
            section => {
                if let Some((_, line)) = view.anchors.iter().find(|(s, _)| *s == section) {
                    app.news_scroll = *line as u16;
                }
            }
        }
    } else if let Some((start, len)) = view.selected {
        let scroll = app.news_scroll as usize;
        if start < scroll {
            app.news_scroll = start.saturating_sub(1) as u16;
        } else if start + len > scroll + height {
            app.news_scroll = (start + len).saturating_sub(height) as u16;
        }
    }

    let border = if app.focus == Focus::News {
        colors.active_border
    } else {
        colors.inactive_border
    };
    let block = Block::default()
        .title(format!(" News ({}) ", app.feed.articles().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let paragraph = Paragraph::new(view.lines)
        .block(block)
        .scroll((app.news_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_markets_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let border = if app.focus == Focus::Markets {
        colors.active_border
    } else {
        colors.inactive_border
    };
    let markets = app.feed.markets();
    for (kind, title, area) in [
        (MarketKind::Equity, " Stocks ", chunks[0]),
        (MarketKind::Crypto, " Crypto ", chunks[1]),
    ] {
        render_quote_table(frame, title, markets.quotes(kind), kind, area, border, colors);
    }
}

fn render_quote_table(
    frame: &mut Frame,
    title: &str,
    quotes: &[MarketQuote],
    kind: MarketKind,
    area: Rect,
    border: Color,
    colors: &ColorConfig,
) {
    let rows: Vec<Row> = if quotes.is_empty() {
        let muted = Style::default().fg(colors.muted);
        (0..PLACEHOLDER_ROWS)
            .map(|_| Row::new(["···", "···", "···"]).style(muted))
            .collect()
    } else {
        quotes
            .iter()
            .map(|quote| {
                let change_color = if quote.is_gain() { colors.gain } else { colors.loss };
                Row::new([
                    Cell::from(quote.symbol.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from(quote.format_price(kind)),
                    Cell::from(quote.format_change()).style(Style::default().fg(change_color)),
                ])
            })
            .collect()
    };

    let header = Row::new(["Symbol", "Price", "Change"])
        .style(Style::default().fg(colors.muted).add_modifier(Modifier::UNDERLINED));
    let widths = [
        Constraint::Length(8),
        Constraint::Min(10),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(table, area);
}

fn render_detail(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let Some(article) = app.router.article() else {
        return;
    };
    let accent = Style::default().fg(colors.accent).add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(colors.muted);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", article.category),
            Style::default()
                .fg(colors.selection_fg)
                .bg(category_color(&article.category, colors)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            article.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Botbi AI analysis", accent)),
    ];
    for paragraph in strip_html(article.display_summary())
        .split('\n')
        .filter(|p| !p.trim().is_empty())
    {
        lines.push(Line::from(paragraph.to_string()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Original text", accent)));
    match article.original_excerpt() {
        Some(excerpt) => lines.push(Line::from(format!("{}...", strip_html(&excerpt)))),
        None => lines.push(Line::from(Span::styled("Content not available", muted))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from("─".repeat(area.width.saturating_sub(2) as usize)));
    if let Some(date) = article.published_at {
        lines.push(Line::from(Span::styled(
            format!("Published: {}", date.format("%Y-%m-%d %H:%M")),
            muted,
        )));
    }
    if let Some(url) = &article.source_url {
        lines.push(Line::from(Span::styled(
            format!("Source: {}", url),
            Style::default().fg(colors.accent),
        )));
    }

    let block = Block::default()
        .title(" Article ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_menu(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let height = (MenuEntry::ALL.len() as u16 + 4).min(area.height);
    let popup = Rect::new(area.x, area.y, area.width.min(34), height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Menu ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = MenuEntry::ALL
        .iter()
        .map(|entry| ListItem::new(entry.label()))
        .collect();
    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(app.menu_index));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let status = format!("● {} articles processed", app.feed.articles().len());
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(colors.gain)),
        chunks[1],
    );
}

fn render_newsletter_modal(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let popup = centered_rect(52, 8, area);
    frame.render_widget(Clear, popup);

    let (button, button_style) = match app.actions.subscribe_status() {
        SubscribeStatus::Idle => ("[Enter] Subscribe", Style::default().fg(colors.accent)),
        SubscribeStatus::Submitting => ("Sending...", Style::default().fg(colors.muted)),
        SubscribeStatus::Success => ("Sent!", Style::default().fg(colors.toast_success)),
        SubscribeStatus::Error => ("Failed. Try again", Style::default().fg(colors.toast_error)),
    };

    let lines = vec![
        Line::from("Get today's top stories in your inbox."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Email: ", Style::default().fg(colors.muted)),
            Span::raw(app.email_input.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(button, button_style.add_modifier(Modifier::BOLD)),
            Span::styled("  [Esc] Close", Style::default().fg(colors.muted)),
        ]),
    ];

    let block = Block::default()
        .title(" Newsletter ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_sync_overlay(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    frame.render_widget(Clear, area);

    let detail = match app.actions.sync_phase() {
        SyncPhase::Refreshing => "Loading the new articles...",
        SyncPhase::Requesting | SyncPhase::Idle => "Botbi AI is reading today's news...",
    };
    let popup = centered_rect(46, 5, area);
    let lines = vec![
        Line::from(Span::styled(
            "Syncing with Botbi AI",
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(detail, Style::default().fg(colors.muted))),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(colors.accent)));
    frame.render_widget(paragraph, popup);
}

fn render_toast(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let Some(toast) = app.toasts.current() else {
        return;
    };
    let color = match toast.severity {
        Severity::Success => colors.toast_success,
        Severity::Error => colors.toast_error,
    };

    let width = u16::try_from(toast.text.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.width);
    let popup = Rect::new(area.right().saturating_sub(width), area.y, width, area.height.min(3));
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(toast.text.clone())
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
    frame.render_widget(paragraph, popup);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, config: &Config) {
    let keys = &config.keybindings;
    let status = if app.actions.is_syncing() {
        format!("Syncing...  {}:Quit", keys.hint(Action::Quit))
    } else if app.newsletter_open {
        "Type your email  Enter:Subscribe  Esc:Close".to_string()
    } else if app.menu_open {
        format!(
            "{}/{}:Nav  {}:Select  {}:Close",
            keys.hint(Action::MoveDown),
            keys.hint(Action::MoveUp),
            keys.hint(Action::Select),
            keys.hint(Action::Dismiss),
        )
    } else if app.router.is_home() {
        format!(
            "{}/{}:Nav  {}:Open  {}/{}/{}:Jump  {}:Menu  {}:Newsletter  {}:Sync  {}:Quit",
            keys.hint(Action::MoveDown),
            keys.hint(Action::MoveUp),
            keys.hint(Action::Select),
            keys.hint(Action::JumpTo(Section::Technology)),
            keys.hint(Action::JumpTo(Section::Business)),
            keys.hint(Action::JumpTo(Section::Markets)),
            keys.hint(Action::ToggleMenu),
            keys.hint(Action::Newsletter),
            keys.hint(Action::Resync),
            keys.hint(Action::Quit),
        )
    } else {
        format!(
            "{}/{}:Scroll  {}:Back  {}:Open source  {}:Menu  {}:Quit",
            keys.hint(Action::MoveDown),
            keys.hint(Action::MoveUp),
            keys.hint(Action::Back),
            keys.hint(Action::OpenInBrowser),
            keys.hint(Action::ToggleMenu),
            keys.hint(Action::Quit),
        )
    };

    let paragraph = Paragraph::new(status).style(
        Style::default()
            .fg(config.colors.status_fg)
            .bg(config.colors.status_bg),
    );
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Cuts `text` to `width` characters, ending in `…` when shortened.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Greedy word wrap capped at `max_lines`; the last line is truncated.
fn wrap_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut words = text.split_whitespace().peekable();

    while let Some(word) = words.next() {
        let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
        if !current.is_empty() && current.chars().count() + needed > width {
            if lines.len() + 1 == max_lines {
                current.push(' ');
                current.push_str(word);
                for rest in words.by_ref() {
                    current.push(' ');
                    current.push_str(rest);
                }
                break;
            }
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() && lines.len() < max_lines {
        lines.push(truncate(&current, width));
    }
    lines
}

/// Drops tags and collapses whitespace, keeping blank-line paragraph breaks.
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            '\n' if !in_tag && result.ends_with('\n') => {
                result.push('\n');
                last_was_space = true;
            }
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        result.push(if c == '\n' { '\n' } else { ' ' });
                        last_was_space = true;
                    }
                } else {
                    result.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeedSnapshot;
    use crate::domain::MarketData;
    use crate::tui::event::{AppMessage, Command, FetchReason};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn draw(app: &mut TuiApp) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let config = Config::default();
        terminal.draw(|frame| render(frame, app, &config)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn loaded(articles: Vec<Article>, markets: MarketData) -> TuiApp {
        let mut app = TuiApp::new();
        let cycle = match app.start().as_slice() {
            [Command::FetchFeed { cycle, .. }] => *cycle,
            other => panic!("expected a single fetch, got {:?}", other),
        };
        app.handle_message(
            AppMessage::FeedLoaded {
                cycle,
                reason: FetchReason::Startup,
                result: Ok(FeedSnapshot::new(articles, markets)),
            },
            Instant::now(),
        );
        app
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Tecnología avanzada", 10), "Tecnologí…");
    }

    #[test]
    fn test_wrap_lines_caps_and_truncates() {
        let lines = wrap_lines("one two three four five six", 9, 2);
        assert_eq!(lines, vec!["one two", "three fo…"]);
        assert!(wrap_lines("", 10, 2).is_empty());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello  <b>world</b></p>"), "Hello world");
    }

    #[test]
    fn test_home_renders_groups_and_markets() {
        let mut articles = vec![Article::new("Quantum chips", Category::Technology)];
        articles.push(Article::new("Bank rates", Category::Business));
        let markets = MarketData {
            equities: vec![MarketQuote::new("AAPL", 224.5, 1.25)],
            crypto: vec![],
        };
        let mut app = loaded(articles, markets);

        let screen = draw(&mut app);
        assert!(screen.contains("TECHNOLOGY"));
        assert!(screen.contains("Quantum chips"));
        assert!(screen.contains("Bank rates"));
        assert!(screen.contains("+1.25%"));
        assert!(screen.contains("···"));
    }

    #[test]
    fn test_loading_shows_skeletons() {
        let mut app = TuiApp::new();
        app.start();
        let screen = draw(&mut app);
        assert!(screen.contains(SKELETON));
        assert!(screen.contains("Loading..."));
    }

    #[test]
    fn test_failed_first_load_keeps_placeholders() {
        let mut app = TuiApp::new();
        let cycle = match app.start().as_slice() {
            [Command::FetchFeed { cycle, .. }] => *cycle,
            other => panic!("expected a single fetch, got {:?}", other),
        };
        app.handle_message(
            AppMessage::FeedLoaded {
                cycle,
                reason: FetchReason::Startup,
                result: Err(crate::app::BotbiError::Other("down".into())),
            },
            Instant::now(),
        );

        let screen = draw(&mut app);
        assert!(screen.contains(SKELETON));
        assert!(!screen.contains("No news in this section yet."));
    }

    #[test]
    fn test_secondary_items_show_category_and_summary() {
        let mut hero = Article::new("Quantum chips", Category::Technology);
        hero.ai_summary = Some("Hero summary".into());
        let mut second = Article::new("Robot arms", Category::Technology);
        second.ai_summary = Some("<p>Factories adopt cheaper robots</p>".into());
        let mut app = loaded(vec![hero, second], MarketData::default());

        let screen = draw(&mut app);
        let row = screen
            .lines()
            .skip_while(|line| !line.contains("• Robot arms"))
            .nth(1)
            .unwrap();
        assert!(row.contains("[Technology]"));
        assert!(row.contains("Factories adopt cheaper robots"));
    }

    #[test]
    fn test_huge_toast_does_not_overflow() {
        let mut app = loaded(vec![Article::new("Quantum chips", Category::Technology)], MarketData::default());
        app.toasts.error("x".repeat(70_000), Instant::now());
        let screen = draw(&mut app);
        assert!(screen.contains("xxxx"));
    }

    #[test]
    fn test_detail_without_original_text() {
        let mut app = loaded(vec![Article::new("Quantum chips", Category::Technology)], MarketData::default());
        app.open_selected();
        let screen = draw(&mut app);
        assert!(screen.contains("Botbi AI analysis"));
        assert!(screen.contains("Content not available"));
    }

    #[test]
    fn test_sync_overlay_covers_screen() {
        let mut app = loaded(vec![Article::new("Quantum chips", Category::Technology)], MarketData::default());
        app.start_resync();
        let screen = draw(&mut app);
        assert!(screen.contains("Syncing with Botbi AI"));
        assert!(!screen.contains("Quantum chips"));
    }
}
