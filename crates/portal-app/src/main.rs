//! Headless shell for the school portal.
//!
//! Wires the file-backed data layer, file-backed session storage, the
//! page-shell cache, and a recording host into the router, then drives
//! it from a small REPL:
//!
//! - `/some/path` navigates (external URLs are passed through)
//! - `:login <name>|<national id>|<password>` submits the login form
//! - `:logout` clears the session and goes home
//! - `:back` / `:forward` walk history
//! - `:restore` simulates a page-cache restoration
//! - `:reload` refetches the app shell through the shell cache
//! - `:tick` advances the clock widgets
//! - `:quit` exits

mod fetcher;
mod host;
mod shell_cache;

use std::io::{BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use futures::executor::block_on;

use fetcher::FileFetcher;
use host::ShellHost;
use portal_core::{
    CachedSource, EventKind, FileStorage, FormData, Interception, PortalConfig, Router,
    SessionStore, SystemClock, ViewHost,
};
use portal_views::build_registry;
use portal_views::login::FORM_ID;
use shell_cache::{CacheDecision, RequestMode, ShellCache};

/// The app shell document every top-level navigation receives.
const SHELL_DOC: &str = "<!doctype html><html><body><main id=\"app\"></main></body></html>";

const ORIGIN: &str = "https://portal.example";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PortalConfig::load_or_default(Path::new("portal.toml"))?;
    log::info!("Starting {} shell", config.site_title);

    let start = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());

    let cache = ShellCache::new();
    cache.activate(SHELL_DOC);
    match cache.handle(RequestMode::Navigate) {
        CacheDecision::Serve(_) => log::info!("app shell served from the page cache"),
        CacheDecision::PassThrough => log::info!("app shell fetched from the network"),
    }

    let host = Rc::new(ShellHost::new(ORIGIN, &start));
    let data = Rc::new(CachedSource::new(Box::new(FileFetcher::new(
        &config.data_dir,
    ))));
    let session = Rc::new(SessionStore::new(Box::new(FileStorage::new(
        &config.storage_dir,
    ))));
    let router = Rc::new(Router::new(
        build_registry(),
        session,
        data,
        Rc::clone(&host) as Rc<dyn portal_core::ViewHost>,
        Rc::new(SystemClock),
    ));

    block_on(router.boot());
    print_page(&host);

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" => break,
            ":tick" => router.tick(),
            ":restore" => block_on(router.on_page_restore()),
            ":reload" => {
                match cache.handle(RequestMode::Navigate) {
                    CacheDecision::Serve(_) => log::info!("shell served from the page cache"),
                    CacheDecision::PassThrough => log::info!("shell fetched from the network"),
                }
                block_on(router.boot());
            },
            ":back" => {
                if host.history_back() {
                    block_on(router.on_pop_state());
                } else {
                    println!("(at the beginning of history)");
                }
            },
            ":forward" => {
                if host.history_forward() {
                    block_on(router.on_pop_state());
                } else {
                    println!("(at the end of history)");
                }
            },
            ":logout" => {
                router.session().clear();
                block_on(router.push("/"));
            },
            _ if line.starts_with(":login ") => {
                let rest = line.trim_start_matches(":login ").trim();
                let mut parts = rest.splitn(3, '|');
                let mut form = FormData::new();
                form.insert("full_name".into(), parts.next().unwrap_or("").trim().into());
                form.insert("national_id".into(), parts.next().unwrap_or("").trim().into());
                form.insert("password".into(), parts.next().unwrap_or("").into());
                if !block_on(router.dispatch(FORM_ID, EventKind::Submit, form)) {
                    println!("(no login form on this page)");
                }
            },
            target => {
                if block_on(router.on_link_click(target)) == Interception::Passed {
                    println!("(external link, not intercepted: {target})");
                }
            },
        }

        router.tick();
        print_page(&host);
    }

    Ok(())
}

fn print_page(host: &ShellHost) {
    println!("=== {} ===", host.location().target());
    println!("{}", host.content());
}
