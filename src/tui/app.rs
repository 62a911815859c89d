use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{validate_email, SubscriptionOutcome};
use crate::app::BotbiError;
use crate::config::KeybindingConfig;
use crate::controller::{ActionController, SubscribeReset, ToastController};
use crate::domain::{Article, HomeSections, Section};
use crate::store::FeedStore;
use crate::tui::event::{Action, AppMessage, Command, FetchReason};
use crate::tui::router::{Route, RoutePath, Router};

const LOAD_ERROR: &str = "Error loading news. Try reloading.";
const SYNC_ERROR: &str = "Error syncing with AI.";
const SYNC_REJECTED: &str = "Sync rejected by server.";
const INVALID_EMAIL: &str = "Please enter a valid email address.";
const EMAIL_SENT: &str = "Email sent successfully!";
const UNREACHABLE: &str = "Could not reach the server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    News,
    Markets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Jump(Section),
    Newsletter,
    Refresh,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 6] = [
        MenuEntry::Jump(Section::Top),
        MenuEntry::Jump(Section::Technology),
        MenuEntry::Jump(Section::Business),
        MenuEntry::Jump(Section::Markets),
        MenuEntry::Newsletter,
        MenuEntry::Refresh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Jump(section) => section.title(),
            MenuEntry::Newsletter => "Subscribe to newsletter",
            MenuEntry::Refresh => "Refresh news",
        }
    }
}

/// All UI state. Input and background results come in, [`Command`]s for the
/// runtime go out; nothing here touches the network or the terminal.
pub struct TuiApp {
    pub feed: FeedStore,
    pub toasts: ToastController,
    pub actions: ActionController,
    pub router: Router,
    pub focus: Focus,
    pub menu_open: bool,
    pub menu_index: usize,
    pub newsletter_open: bool,
    pub email_input: String,
    /// Cursor into [`HomeSections::entries`].
    pub home_index: usize,
    /// First visible line of the news pane, kept in sync by the renderer.
    pub news_scroll: u16,
    /// Set by a jump, consumed by the renderer to scroll the anchor to the top.
    pub pending_anchor: Option<Section>,
    pub detail_scroll: u16,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            feed: FeedStore::new(),
            toasts: ToastController::new(),
            actions: ActionController::new(),
            router: Router::new(),
            focus: Focus::News,
            menu_open: false,
            menu_index: 0,
            newsletter_open: false,
            email_input: String::new(),
            home_index: 0,
            news_scroll: 0,
            pending_anchor: None,
            detail_scroll: 0,
            should_quit: false,
        }
    }

    /// Initial load.
    pub fn start(&mut self) -> Vec<Command> {
        let cycle = self.feed.begin_refresh();
        vec![Command::FetchFeed {
            cycle,
            reason: FetchReason::Startup,
        }]
    }

    pub fn navigate(&mut self, path: RoutePath) {
        self.router.navigate(path, None);
        self.detail_scroll = 0;
    }

    pub fn sections(&self) -> HomeSections<'_> {
        HomeSections::partition(self.feed.articles())
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.sections()
            .entries()
            .get(self.home_index)
            .map(|(_, article)| *article)
    }

    pub fn selected_menu_entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.menu_index.min(MenuEntry::ALL.len() - 1)]
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        keys: &KeybindingConfig,
        now: Instant,
    ) -> Vec<Command> {
        let action = keys.get_action(&key);

        // The sync overlay swallows everything but quit.
        if self.actions.is_syncing() {
            if action == Action::Quit {
                self.should_quit = true;
            }
            return Vec::new();
        }

        if self.newsletter_open {
            return self.handle_modal_key(key, now);
        }

        if self.menu_open {
            return self.handle_menu_action(action);
        }

        self.handle_action(action, now)
    }

    fn handle_modal_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.close_overlays(),
            KeyCode::Enter => return self.submit_newsletter(now),
            KeyCode::Backspace => {
                self.email_input.pop();
            }
            KeyCode::Char(c) if !ctrl => self.email_input.push(c),
            _ => {}
        }
        Vec::new()
    }

    fn handle_menu_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.menu_index = self.menu_index.saturating_sub(1),
            Action::MoveDown => {
                self.menu_index = (self.menu_index + 1).min(MenuEntry::ALL.len() - 1)
            }
            Action::Select => return self.activate_menu_entry(self.selected_menu_entry()),
            Action::Dismiss | Action::ToggleMenu | Action::Back => self.menu_open = false,
            Action::JumpTo(section) => self.jump(section),
            Action::Resync => return self.start_resync(),
            Action::Newsletter => self.open_newsletter(),
            Action::OpenInBrowser | Action::None => {}
        }
        Vec::new()
    }

    fn activate_menu_entry(&mut self, entry: MenuEntry) -> Vec<Command> {
        match entry {
            MenuEntry::Jump(section) => self.jump(section),
            MenuEntry::Newsletter => self.open_newsletter(),
            MenuEntry::Refresh => return self.start_resync(),
        }
        Vec::new()
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) -> Vec<Command> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),
            Action::Select => self.open_selected(),
            Action::Back => self.back(),
            Action::Dismiss => {
                if self.toasts.current().is_some() {
                    self.toasts.dismiss();
                } else {
                    self.back();
                }
            }
            Action::OpenInBrowser => return self.open_in_browser(now),
            Action::ToggleMenu => {
                self.menu_open = true;
                self.menu_index = 0;
            }
            Action::Resync => return self.start_resync(),
            Action::Newsletter => self.open_newsletter(),
            Action::JumpTo(section) => self.jump(section),
            Action::None => {}
        }
        Vec::new()
    }

    fn move_up(&mut self) {
        if self.router.is_home() {
            self.focus = Focus::News;
            self.home_index = self.home_index.saturating_sub(1);
        } else {
            self.detail_scroll = self.detail_scroll.saturating_sub(1);
        }
    }

    fn move_down(&mut self) {
        if self.router.is_home() {
            self.focus = Focus::News;
            let count = self.sections().entry_count();
            if count > 0 && self.home_index < count - 1 {
                self.home_index += 1;
            }
        } else {
            self.detail_scroll = self.detail_scroll.saturating_add(1);
        }
    }

    fn back(&mut self) {
        if self.router.back() {
            self.detail_scroll = 0;
        }
    }

    /// Opens the detail view for the highlighted home entry.
    pub fn open_selected(&mut self) {
        if !self.router.is_home() || self.focus != Focus::News {
            return;
        }
        if let Some(article) = self.selected_article().cloned() {
            tracing::debug!("Opening article {:?}", article.title);
            self.router.open(article);
            self.detail_scroll = 0;
        }
    }

    fn open_in_browser(&mut self, now: Instant) -> Vec<Command> {
        let article = match self.router.current() {
            Route::Detail(article) => Some(article.as_ref()),
            Route::Home => self.selected_article(),
        };
        let Some(article) = article else {
            return Vec::new();
        };
        match article.source_url.clone() {
            Some(url) => vec![Command::OpenUrl(url)],
            None => {
                self.toasts.error("No source link for this article.", now);
                Vec::new()
            }
        }
    }

    /// Scrolls the home view to an anchor. Returns home first if needed.
    pub fn jump(&mut self, section: Section) {
        self.menu_open = false;
        if !self.router.is_home() {
            self.navigate(RoutePath::Home);
        }
        self.pending_anchor = Some(section);
        if section == Section::Markets {
            self.focus = Focus::Markets;
            return;
        }
        self.focus = Focus::News;
        if let Some(index) = self.sections().first_entry_of(section) {
            self.home_index = index;
        }
    }

    fn open_newsletter(&mut self) {
        self.menu_open = false;
        self.newsletter_open = true;
    }

    /// Esc closes the newsletter modal and the menu together.
    pub fn close_overlays(&mut self) {
        self.newsletter_open = false;
        self.menu_open = false;
    }

    pub fn start_resync(&mut self) -> Vec<Command> {
        if !self.actions.begin_resync() {
            return Vec::new();
        }
        self.menu_open = false;
        tracing::info!("Resync requested");
        vec![Command::Resync]
    }

    pub fn submit_newsletter(&mut self, now: Instant) -> Vec<Command> {
        if !self.actions.can_subscribe() {
            return Vec::new();
        }
        let email = match validate_email(&self.email_input) {
            Ok(email) => email.to_string(),
            Err(_) => {
                self.toasts.error(INVALID_EMAIL, now);
                return Vec::new();
            }
        };
        self.actions.begin_subscribe();
        vec![Command::Subscribe(email)]
    }

    pub fn handle_message(&mut self, message: AppMessage, now: Instant) -> Vec<Command> {
        match message {
            AppMessage::FeedLoaded {
                cycle,
                reason,
                result,
            } => {
                if let Err(e) = self.feed.finish_refresh(cycle, result) {
                    tracing::warn!("Feed refresh failed: {}", e);
                    self.toasts.error(LOAD_ERROR, now);
                }
                self.clamp_selection();

                if let FetchReason::AfterSync(report) = reason {
                    self.toasts.success(
                        format!(
                            "Sync complete. {} new articles.",
                            report.new_article_count
                        ),
                        now,
                    );
                    self.actions.finish_resync();
                }
                Vec::new()
            }
            AppMessage::ResyncFinished(Ok(report)) => {
                self.actions.resync_accepted();
                let cycle = self.feed.begin_refresh();
                vec![Command::FetchFeed {
                    cycle,
                    reason: FetchReason::AfterSync(report),
                }]
            }
            AppMessage::ResyncFinished(Err(e)) => {
                tracing::warn!("Resync failed: {}", e);
                self.actions.finish_resync();
                let text = match e {
                    BotbiError::Application(_) => SYNC_REJECTED,
                    _ => SYNC_ERROR,
                };
                self.toasts.error(text, now);
                Vec::new()
            }
            AppMessage::SubscribeFinished(Ok(SubscriptionOutcome::Sent)) => {
                self.actions.subscribe_succeeded(now);
                self.toasts.success(EMAIL_SENT, now);
                Vec::new()
            }
            AppMessage::SubscribeFinished(Ok(SubscriptionOutcome::Rejected(message))) => {
                self.actions.subscribe_failed(now);
                self.toasts.error(format!("Error: {}", message), now);
                Vec::new()
            }
            AppMessage::SubscribeFinished(Err(e)) => {
                tracing::warn!("Subscription failed: {}", e);
                self.actions.subscribe_failed(now);
                let text = match &e {
                    BotbiError::Validation(_) => INVALID_EMAIL.to_string(),
                    e if e.is_network() => UNREACHABLE.to_string(),
                    e => format!("Error: {}", e),
                };
                self.toasts.error(text, now);
                Vec::new()
            }
            AppMessage::BrowserFailed(reason) => {
                self.toasts
                    .error(format!("Failed to open browser: {}", reason), now);
                Vec::new()
            }
        }
    }

    /// Expires the toast and the subscribe-status reset.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.tick(now);
        if let Some(SubscribeReset::AfterSuccess) = self.actions.tick(now) {
            self.newsletter_open = false;
            self.email_input.clear();
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.sections().entry_count();
        if self.home_index >= count {
            self.home_index = count.saturating_sub(1);
        }
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::SyncReport;
    use crate::controller::{Severity, SubscribeStatus, SUBSCRIBE_RESET, TOAST_DURATION};
    use crate::domain::{Category, FeedSnapshot, MarketData};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut TuiApp, keys: &KeybindingConfig, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)), keys, now);
        }
    }

    fn cycle_of(commands: &[Command]) -> u64 {
        match commands {
            [Command::FetchFeed { cycle, .. }] => *cycle,
            other => panic!("expected a single fetch, got {:?}", other),
        }
    }

    fn loaded_app(articles: Vec<Article>) -> TuiApp {
        let mut app = TuiApp::new();
        let cycle = cycle_of(&app.start());
        app.handle_message(
            AppMessage::FeedLoaded {
                cycle,
                reason: FetchReason::Startup,
                result: Ok(FeedSnapshot::new(articles, MarketData::default())),
            },
            Instant::now(),
        );
        app
    }

    fn mixed_articles() -> Vec<Article> {
        let mut articles: Vec<Article> = (0..3)
            .map(|i| Article::new(format!("tech {}", i), Category::Technology))
            .collect();
        articles.push(Article::new("biz 0", Category::Business));
        articles.push(Article::new("eco 0", Category::Economy));
        articles
    }

    #[test]
    fn test_start_requests_feed() {
        let mut app = TuiApp::new();
        assert_eq!(
            app.start(),
            vec![Command::FetchFeed {
                cycle: 1,
                reason: FetchReason::Startup,
            }]
        );
        assert!(app.feed.is_loading());
    }

    #[test]
    fn test_failed_load_keeps_data_and_shows_toast() {
        let mut app = loaded_app(mixed_articles());
        let cycle = app.feed.begin_refresh();
        app.handle_message(
            AppMessage::FeedLoaded {
                cycle,
                reason: FetchReason::Startup,
                result: Err(BotbiError::Timeout(Duration::from_secs(8))),
            },
            Instant::now(),
        );

        assert_eq!(app.feed.articles().len(), 5);
        assert!(!app.feed.is_loading());
        let toast = app.toasts.current().unwrap();
        assert_eq!(toast.text, LOAD_ERROR);
        assert_eq!(toast.severity, Severity::Error);
    }

    #[test]
    fn test_select_opens_detail_and_back_returns() {
        let keys = KeybindingConfig::default();
        let now = Instant::now();
        let mut app = loaded_app(mixed_articles());

        app.handle_key(press(KeyCode::Down), &keys, now);
        app.handle_key(press(KeyCode::Enter), &keys, now);
        assert_eq!(app.router.article().unwrap().title, "tech 1");

        app.handle_key(press(KeyCode::Esc), &keys, now);
        assert!(app.router.is_home());
        assert_eq!(app.home_index, 1);
    }

    #[test]
    fn test_detail_route_without_article_lands_home() {
        let mut app = TuiApp::new();
        app.navigate(RoutePath::Article);
        assert!(app.router.is_home());
        assert_eq!(app.router.depth(), 1);
    }

    #[test]
    fn test_jump_to_business_anchor() {
        let mut app = loaded_app(mixed_articles());
        app.jump(Section::Business);
        assert_eq!(app.home_index, 3);
        assert_eq!(app.selected_article().unwrap().title, "biz 0");
        assert_eq!(app.pending_anchor, Some(Section::Business));

        app.jump(Section::Markets);
        assert_eq!(app.focus, Focus::Markets);
    }

    #[test]
    fn test_escape_closes_modal_and_menu() {
        let keys = KeybindingConfig::default();
        let now = Instant::now();
        let mut app = TuiApp::new();
        app.menu_open = true;
        app.newsletter_open = true;

        app.handle_key(press(KeyCode::Esc), &keys, now);
        assert!(!app.newsletter_open);
        assert!(!app.menu_open);
    }

    #[test]
    fn test_menu_refresh_closes_menu_and_requests_resync() {
        let keys = KeybindingConfig::default();
        let now = Instant::now();
        let mut app = TuiApp::new();
        app.handle_key(press(KeyCode::Char('m')), &keys, now);
        assert!(app.menu_open);

        for _ in 0..MenuEntry::ALL.len() {
            app.handle_key(press(KeyCode::Down), &keys, now);
        }
        assert_eq!(app.selected_menu_entry(), MenuEntry::Refresh);

        let commands = app.handle_key(press(KeyCode::Enter), &keys, now);
        assert_eq!(commands, vec![Command::Resync]);
        assert!(!app.menu_open);
        assert!(app.actions.is_syncing());
    }

    #[test]
    fn test_overlay_blocks_input_while_syncing() {
        let keys = KeybindingConfig::default();
        let now = Instant::now();
        let mut app = loaded_app(mixed_articles());
        app.start_resync();

        assert!(app.handle_key(press(KeyCode::Char('R')), &keys, now).is_empty());
        app.handle_key(press(KeyCode::Enter), &keys, now);
        assert!(app.router.is_home());

        app.handle_key(press(KeyCode::Char('q')), &keys, now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_resync_flow_refreshes_once_then_toasts_count() {
        let now = Instant::now();
        let mut app = loaded_app(mixed_articles());
        assert_eq!(app.start_resync(), vec![Command::Resync]);

        let report = SyncReport {
            new_article_count: 5,
        };
        let commands = app.handle_message(AppMessage::ResyncFinished(Ok(report)), now);
        assert_eq!(
            commands,
            vec![Command::FetchFeed {
                cycle: 2,
                reason: FetchReason::AfterSync(report),
            }]
        );
        assert!(app.actions.is_syncing());

        app.handle_message(
            AppMessage::FeedLoaded {
                cycle: 2,
                reason: FetchReason::AfterSync(report),
                result: Ok(FeedSnapshot::new(mixed_articles(), MarketData::default())),
            },
            now,
        );
        assert!(!app.actions.is_syncing());
        assert!(app.toasts.current().unwrap().text.contains('5'));
    }

    #[test]
    fn test_startup_fetch_landing_after_sync_refresh_is_ignored() {
        let now = Instant::now();
        let mut app = TuiApp::new();
        let startup = cycle_of(&app.start());
        app.start_resync();

        let report = SyncReport {
            new_article_count: 5,
        };
        let refresh = cycle_of(&app.handle_message(AppMessage::ResyncFinished(Ok(report)), now));
        app.handle_message(
            AppMessage::FeedLoaded {
                cycle: refresh,
                reason: FetchReason::AfterSync(report),
                result: Ok(FeedSnapshot::new(
                    vec![Article::new("fresh", Category::Technology)],
                    MarketData::default(),
                )),
            },
            now,
        );
        app.handle_message(
            AppMessage::FeedLoaded {
                cycle: startup,
                reason: FetchReason::Startup,
                result: Ok(FeedSnapshot::new(
                    vec![Article::new("stale", Category::Technology)],
                    MarketData::default(),
                )),
            },
            now,
        );

        assert_eq!(app.feed.articles()[0].title, "fresh");
        assert!(!app.feed.is_loading());
        assert!(!app.actions.is_syncing());
        assert!(app.toasts.current().unwrap().text.contains('5'));
    }

    #[test]
    fn test_late_startup_failure_after_sync_refresh_raises_no_error() {
        let now = Instant::now();
        let mut app = TuiApp::new();
        let startup = cycle_of(&app.start());
        app.start_resync();

        let report = SyncReport {
            new_article_count: 2,
        };
        let refresh = cycle_of(&app.handle_message(AppMessage::ResyncFinished(Ok(report)), now));
        app.handle_message(
            AppMessage::FeedLoaded {
                cycle: refresh,
                reason: FetchReason::AfterSync(report),
                result: Ok(FeedSnapshot::new(mixed_articles(), MarketData::default())),
            },
            now,
        );
        app.handle_message(
            AppMessage::FeedLoaded {
                cycle: startup,
                reason: FetchReason::Startup,
                result: Err(BotbiError::Timeout(Duration::from_secs(8))),
            },
            now,
        );

        let toast = app.toasts.current().unwrap();
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(app.feed.articles().len(), 5);
    }

    #[test]
    fn test_rejected_resync_shows_error() {
        let now = Instant::now();
        let mut app = TuiApp::new();
        app.start_resync();
        app.handle_message(
            AppMessage::ResyncFinished(Err(BotbiError::Application("busy".into()))),
            now,
        );
        assert!(!app.actions.is_syncing());
        assert_eq!(app.toasts.current().unwrap().text, SYNC_REJECTED);
    }

    #[test]
    fn test_invalid_email_toasts_without_request() {
        let keys = KeybindingConfig::default();
        let now = Instant::now();
        let mut app = TuiApp::new();
        app.handle_key(press(KeyCode::Char('n')), &keys, now);
        type_text(&mut app, &keys, "not-an-email", now);

        let commands = app.handle_key(press(KeyCode::Enter), &keys, now);
        assert!(commands.is_empty());
        assert_eq!(app.toasts.current().unwrap().text, INVALID_EMAIL);
        assert_eq!(app.actions.subscribe_status(), SubscribeStatus::Idle);
        assert!(app.newsletter_open);
    }

    #[test]
    fn test_successful_subscription_closes_modal_after_reset() {
        let keys = KeybindingConfig::default();
        let now = Instant::now();
        let mut app = TuiApp::new();
        app.handle_key(press(KeyCode::Char('n')), &keys, now);
        type_text(&mut app, &keys, "reader@example.com", now);

        let commands = app.handle_key(press(KeyCode::Enter), &keys, now);
        assert_eq!(
            commands,
            vec![Command::Subscribe("reader@example.com".into())]
        );
        assert_eq!(app.actions.subscribe_status(), SubscribeStatus::Submitting);
        assert!(app.handle_key(press(KeyCode::Enter), &keys, now).is_empty());

        app.handle_message(
            AppMessage::SubscribeFinished(Ok(SubscriptionOutcome::Sent)),
            now,
        );
        assert_eq!(app.actions.subscribe_status(), SubscribeStatus::Success);
        assert_eq!(app.toasts.current().unwrap().text, EMAIL_SENT);

        app.tick(now + SUBSCRIBE_RESET - Duration::from_millis(1));
        assert!(app.newsletter_open);

        app.tick(now + SUBSCRIBE_RESET);
        assert_eq!(app.actions.subscribe_status(), SubscribeStatus::Idle);
        assert!(!app.newsletter_open);
        assert!(app.email_input.is_empty());

        app.tick(now + TOAST_DURATION);
        assert!(app.toasts.current().is_none());
    }

    #[test]
    fn test_rejected_subscription_keeps_modal_open() {
        let now = Instant::now();
        let mut app = TuiApp::new();
        app.newsletter_open = true;
        app.email_input = "reader@example.com".into();
        app.submit_newsletter(now);

        app.handle_message(
            AppMessage::SubscribeFinished(Ok(SubscriptionOutcome::Rejected(
                "No hay noticias.".into(),
            ))),
            now,
        );
        assert_eq!(app.toasts.current().unwrap().text, "Error: No hay noticias.");

        app.tick(now + SUBSCRIBE_RESET);
        assert_eq!(app.actions.subscribe_status(), SubscribeStatus::Idle);
        assert!(app.newsletter_open);
        assert_eq!(app.email_input, "reader@example.com");
    }

    #[test]
    fn test_open_in_browser_uses_source_url() {
        let keys = KeybindingConfig::default();
        let now = Instant::now();
        let mut article = Article::new("linked", Category::Technology);
        article.source_url = Some("https://example.com/a".into());
        let mut app = loaded_app(vec![article, Article::new("plain", Category::Technology)]);

        let commands = app.handle_key(press(KeyCode::Char('o')), &keys, now);
        assert_eq!(
            commands,
            vec![Command::OpenUrl("https://example.com/a".into())]
        );

        app.handle_key(press(KeyCode::Down), &keys, now);
        assert!(app.handle_key(press(KeyCode::Char('o')), &keys, now).is_empty());
        assert_eq!(app.toasts.current().unwrap().severity, Severity::Error);
    }
}
