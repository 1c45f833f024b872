//! Scrollable list demo.
//!
//! A fake feed with five pages of twenty items. Every fetch takes a moment,
//! and every fourth page request fails so the recovery path can be seen.
//!
//! Keys: `↑/↓` move, `G` jumps to the end (loading the next page), `r`
//! refreshes, `?` toggles help, `q` quits.
//!
//! Set `SCROLLABLE_LIST_LOG=/tmp/list.log` to write logs to a file; the
//! filter is taken from `RUST_LOG` and defaults to `debug`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, Program};
use bubbletea_scrollable_list::prelude::*;
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const PAGE_SIZE: usize = 20;
const PAGES: usize = 5;
const LATENCY: Duration = Duration::from_millis(800);

/// Paged feed backed by a counter.
struct Feed {
    next_page: AtomicUsize,
    requests: AtomicUsize,
}

impl Feed {
    fn new() -> Self {
        Self {
            next_page: AtomicUsize::new(1),
            requests: AtomicUsize::new(0),
        }
    }

    fn page(page: usize) -> Vec<String> {
        let start = page * PAGE_SIZE;
        (start..start + PAGE_SIZE)
            .map(|n| format!("Item {}", n + 1))
            .collect()
    }
}

#[async_trait]
impl DataSource<String> for Feed {
    async fn load_more(&self) -> Result<Vec<String>, SourceError> {
        tokio::time::sleep(LATENCY).await;
        if self.requests.fetch_add(1, Ordering::SeqCst) % 4 == 3 {
            return Err(SourceError::msg("feed temporarily unavailable"));
        }
        let page = self.next_page.load(Ordering::SeqCst);
        if page >= PAGES {
            return Ok(Vec::new());
        }
        self.next_page.store(page + 1, Ordering::SeqCst);
        Ok(Self::page(page))
    }

    async fn refresh(&self) -> Result<Vec<String>, SourceError> {
        tokio::time::sleep(LATENCY).await;
        self.next_page.store(1, Ordering::SeqCst);
        Ok(Self::page(0))
    }
}

/// Green title bar and a brighter "Loading…" row.
fn feed_styles() -> ListStyles {
    let mut styles = ListStyles::default();
    styles.title = Style::new()
        .background(Color::from("#25A065"))
        .foreground(Color::from("#FFFDF5"))
        .padding(0, 1, 0, 1);
    styles.loading_more = Style::new()
        .foreground(AdaptiveColor {
            Light: "#1A7A4C",
            Dark: "#5FD7A0",
        })
        .padding_left(2);
    styles
}

struct App {
    list: ScrollableList<String>,
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let mut list = ScrollableList::new(Feed::page(0), Feed::new(), DefaultDelegate::new(), 80, 24)
            .with_title("Feed")
            .with_styles(feed_styles());
        let cmd = list.init();
        (Self { list }, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            let ctrl_c = key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if key.key == KeyCode::Char('q') || ctrl_c {
                return Some(bubbletea_rs::quit());
            }
        }
        self.list.update(msg)
    }

    fn view(&self) -> String {
        self.list.view()
    }
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let Ok(path) = std::env::var("SCROLLABLE_LIST_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    info!("starting scrollable list demo");

    let program = Program::<App>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
