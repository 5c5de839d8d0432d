#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    terminal::main()
}

/// The browser build starts from the library's `wasm_bindgen(start)` hook.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, stdout};

    use clap::Parser;
    use crossterm::execute;
    use crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    };
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;
    use reqwest::Url;

    use obfuscate_preview::config::{Cli, Config};
    use obfuscate_preview::dom::{PageOptions, obfuscation_form_page};
    use obfuscate_preview::logging;
    use obfuscate_preview::preview::HttpTransport;
    use obfuscate_preview::tui::{App, AppError};

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn main() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::parse();
        let (config, origin) = prepare(&cli)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("preview-io")
            .enable_all()
            .build()
            .map_err(AppError::from)?;

        let mut transport = HttpTransport::new(origin);
        if let Some(cookie) = &config.session_cookie {
            transport = transport.with_session_cookie(cookie.clone());
        }
        let page = obfuscation_form_page(&PageOptions {
            path: config.page_path.clone(),
            csrf_token: config.csrf_token.clone(),
            group: cli.group.clone().unwrap_or_default(),
            ..PageOptions::default()
        });

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

        let mut app = App::new(page, transport, runtime.handle().clone());
        let result = app.run(&mut terminal);

        let restore_result = restore_terminal();
        tracing::info!("exiting");
        match result {
            Err(e) => Err(e.into()),
            Ok(()) => restore_result.map_err(Into::into),
        }
    }

    /// Loads settings and starts file logging before the terminal is taken over.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn prepare(cli: &Cli) -> Result<(Config, Url), AppError> {
        let config = cli.load_config()?;
        let log_path = logging::init(&config.log_filter)?;
        let origin = config.origin()?;
        tracing::info!(
            log = %log_path.display(),
            server = %origin,
            page = %config.page_path,
            "starting"
        );
        Ok((config, origin))
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn restore_terminal() -> Result<(), io::Error> {
        let raw_result = disable_raw_mode();
        let screen_result = execute!(stdout(), LeaveAlternateScreen);
        raw_result.and(screen_result)
    }
}
