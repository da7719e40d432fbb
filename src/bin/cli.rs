//! tab-links
//!
//! Terminal popup over the active browser tab: lists its links, filters them,
//! and copies, opens or highlights them.

use clap::{Parser, ValueEnum};
use std::io::Write;
use tab_links::clipboard::SystemClipboard;
use tab_links::host::TerminalPrompter;
use tab_links::links::{DEFAULT_POPUP_ORIGIN, filter_links};
use tab_links::popup::command::HELP;
use tab_links::popup::{Command, parse_command};
use tab_links::render::TerminalView;
use tab_links::{
    BrowserSession, Category, ConnectionOptions, Flow, LaunchOptions, OriginPolicy, Popup, PopupConfig, PopupContext,
    PopupEvent,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OriginMode {
    /// Internal means same origin as the popup itself (historic behavior)
    Popup,
    /// Internal means same origin as the inspected page
    Page,
}

#[derive(Parser)]
#[command(name = "tab-links")]
#[command(version)]
#[command(about = "List, filter and act on the links of the active browser tab", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<String>,

    /// WebSocket endpoint of a running browser to attach to instead of launching one
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Load this URL in the active tab first
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Initial category filter
    #[arg(long, short = 'f', default_value = "all")]
    filter: Category,

    /// Initial search text
    #[arg(long, short = 's', default_value = "")]
    search: String,

    /// What "internal" is compared against
    #[arg(long, value_enum, default_value = "popup")]
    origin_policy: OriginMode,

    /// Origin of the popup for --origin-policy popup
    #[arg(long, default_value = DEFAULT_POPUP_ORIGIN)]
    popup_origin: String,

    /// Print the filtered list and exit
    #[arg(long)]
    list: bool,

    /// With --list, print JSON instead of text
    #[arg(long, requires = "list")]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let session = match &cli.ws_endpoint {
        Some(endpoint) => BrowserSession::connect(ConnectionOptions::new(endpoint.clone()))?,
        None => {
            let mut options = LaunchOptions::new().headless(!cli.headed);
            if let Some(path) = &cli.executable_path {
                options = options.chrome_path(path);
            }
            if let Some(dir) = &cli.user_data_dir {
                options = options.user_data_dir(dir);
            }
            BrowserSession::launch(options)?
        }
    };

    if let Some(url) = &cli.url {
        session.navigate(url)?;
    }

    let policy = match cli.origin_policy {
        OriginMode::Popup => OriginPolicy::Popup { origin: cli.popup_origin.clone() },
        OriginMode::Page => OriginPolicy::Page,
    };
    let config = PopupConfig::new().origin_policy(policy);

    if cli.list {
        return print_list(&session, &config, &cli);
    }

    let mut view = TerminalView::new(std::io::stdout());
    let mut popup = Popup::open(&session, &config, &mut view)?;
    let mut clipboard = SystemClipboard::new();
    let mut prompter = TerminalPrompter::stdio();

    let mut pending = Vec::new();
    if cli.filter != Category::All {
        pending.push(PopupEvent::SetCategory(cli.filter));
    }
    if !cli.search.is_empty() {
        pending.push(PopupEvent::SetSearch(cli.search.clone()));
    }
    for event in pending {
        let mut context = PopupContext { host: &session, clipboard: &mut clipboard, prompter: &mut prompter, view: &mut view };
        popup.handle(event, &mut context);
    }

    // Only a page that answered with its links takes commands
    if popup.session().is_none() {
        return Ok(());
    }

    loop {
        {
            let out = prompter.output();
            let _ = write!(out, "> ");
            let _ = out.flush();
        }
        let Some(line) = prompter.read_line() else { break };
        if line.trim().is_empty() {
            continue;
        }

        let event = match parse_command(&line) {
            Ok(Command::Event(event)) => event,
            Ok(Command::Help) => {
                let _ = writeln!(prompter.output(), "{}", HELP);
                continue;
            }
            Ok(Command::Quit) => break,
            Err(e) => {
                let _ = writeln!(prompter.output(), "{} (type 'help')", e);
                continue;
            }
        };

        let mut context = PopupContext { host: &session, clipboard: &mut clipboard, prompter: &mut prompter, view: &mut view };
        if popup.handle(event, &mut context) == Flow::Close {
            break;
        }
    }

    Ok(())
}

fn print_list(session: &BrowserSession, config: &PopupConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = tab_links::render::MemoryView::default();
    let popup = Popup::open(session, config, &mut view)?;

    let state = match &popup {
        Popup::Ready(state) => state,
        Popup::Denied { message } => {
            eprintln!("{}", message);
            return Ok(());
        }
        Popup::Empty { .. } => return Ok(()),
    };

    let origin = config.origin_policy.matcher(&state.active_tab().url);
    let links = filter_links(state.links(), cli.filter, &cli.search, &origin);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&links)?);
    } else {
        for link in &links {
            println!("{}\t{}", link.href, link.label());
        }
    }

    Ok(())
}
