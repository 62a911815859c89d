pub mod app;
pub mod event;
pub mod layout;
pub mod router;
pub mod runtime;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::config::Config;

use self::app::TuiApp;
use self::event::{AppEvent, EventHandler};
use self::router::RoutePath;
use self::runtime::Runtime;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>, route: RoutePath) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config, route).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    ctx: Arc<AppContext>,
    config: Arc<Config>,
    route: RoutePath,
) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(TICK_RATE);
    let (mut runtime, mut messages) = Runtime::new(ctx.client.clone());

    tui_app.navigate(route);
    runtime.dispatch(tui_app.start());

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let commands = tui_app.handle_key(key, &config.keybindings, Instant::now());
                runtime.dispatch(commands);
            }
            AppEvent::Tick => {}
        }

        while let Ok(message) = messages.try_recv() {
            let commands = tui_app.handle_message(message, Instant::now());
            runtime.dispatch(commands);
        }
        tui_app.tick(Instant::now());

        if tui_app.should_quit {
            break;
        }
    }

    tracing::info!("Shutting down, {} tasks still running", runtime.in_flight());
    runtime.shutdown();
    Ok(())
}
