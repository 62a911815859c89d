use std::str::FromStr;

use crate::app::BotbiError;
use crate::domain::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePath {
    Home,
    Article,
}

impl FromStr for RoutePath {
    type Err = BotbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('/') {
            "" => Ok(RoutePath::Home),
            "/article" | "/noticia" => Ok(RoutePath::Article),
            other => Err(BotbiError::Other(format!("Unknown route: {}", other))),
        }
    }
}

/// A resolved view. The detail view owns the article it was opened with.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Detail(Box<Article>),
}

static HOME: Route = Route::Home;

/// Navigation history. The bottom entry is always home.
#[derive(Debug)]
pub struct Router {
    history: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            history: vec![Route::Home],
        }
    }

    pub fn current(&self) -> &Route {
        self.history.last().unwrap_or(&HOME)
    }

    pub fn is_home(&self) -> bool {
        matches!(self.current(), Route::Home)
    }

    pub fn article(&self) -> Option<&Article> {
        match self.current() {
            Route::Detail(article) => Some(article),
            Route::Home => None,
        }
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Detail without an article silently lands on home instead.
    pub fn navigate(&mut self, path: RoutePath, state: Option<Article>) -> &Route {
        match (path, state) {
            (RoutePath::Article, Some(article)) => {
                self.history.push(Route::Detail(Box::new(article)));
            }
            (RoutePath::Article, None) => {
                tracing::debug!("Detail route without article, redirecting home");
                self.go_home();
            }
            (RoutePath::Home, _) => self.go_home(),
        }
        self.current()
    }

    pub fn open(&mut self, article: Article) -> &Route {
        self.navigate(RoutePath::Article, Some(article))
    }

    fn go_home(&mut self) {
        self.history.truncate(1);
    }

    /// Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
