use crate::browser::config::{ConnectionOptions, LaunchOptions};
use crate::error::{BrowserError, Result};
use crate::host::{BrowserHost, TabId, TabInfo};
use crate::page::PageRequest;
use headless_chrome::protocol::cdp::Target::CreateTarget;
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // The highlight sequence ends in window.open from a page timer, which has no user gesture
        launch_opts.args.push(OsStr::new("--disable-popup-blocking"));

        // Set the browser's idle timeout to 1 hour (default is 30 seconds) so an idle popup session survives
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| BrowserError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::debug!("Launched browser (headless: {})", options.headless);
        Ok(Self { browser })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url.clone(), Duration::from_millis(options.timeout))
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        log::debug!("Connected to browser at {}", options.ws_url);
        Ok(Self { browser })
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // First pass: visible and focused (strongest signal)
        if let Some(tab) = Self::first_matching(&tabs, "document.visibilityState === 'visible' && document.hasFocus()") {
            return Ok(tab);
        }

        // Second pass: visible only
        if let Some(tab) = Self::first_matching(&tabs, "document.visibilityState === 'visible'") {
            return Ok(tab);
        }

        Err(BrowserError::TabOperationFailed("No active tab found".to_string()))
    }

    fn first_matching(tabs: &[Arc<Tab>], probe: &str) -> Option<Arc<Tab>> {
        tabs.iter()
            .find(|tab| match tab.evaluate(probe, false) {
                Ok(remote_object) => remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false),
                Err(e) => {
                    log::debug!("Failed to check tab status: {}", e);
                    false
                }
            })
            .cloned()
    }

    /// Find a tab by its target id
    pub fn tab_by_id(&self, id: &TabId) -> Result<Arc<Tab>> {
        self.get_tabs()?
            .into_iter()
            .find(|tab| *tab.get_target_id() == id.0)
            .ok_or_else(|| BrowserError::TabOperationFailed(format!("Tab {} is gone", id)))
    }

    /// Navigate the active tab to a URL and wait for it to load
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.get_active_tab()?
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }
}

impl BrowserHost for BrowserSession {
    fn active_tab(&self) -> Result<TabInfo> {
        let tab = self.get_active_tab()?;
        Ok(TabInfo { id: TabId(tab.get_target_id().clone()), url: tab.get_url() })
    }

    fn execute(&self, tab: &TabId, request: &PageRequest) -> Result<serde_json::Value> {
        let script = request.to_script()?;
        log::debug!("Injecting {} into tab {}", request.name(), tab);

        let result = self
            .tab_by_id(tab)?
            .evaluate(&script, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("{} failed: {}", request.name(), e)))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    fn create_tab(&self, url: &str, active: bool) -> Result<()> {
        // Target.createTarget opens in the foreground unless background is set
        let target = CreateTarget {
            url: url.to_string(),
            left: None,
            top: None,
            width: None,
            height: None,
            window_state: None,
            browser_context_id: None,
            enable_begin_frame_control: None,
            new_window: None,
            background: Some(!active),
            for_tab: None,
            hidden: None,
        };

        let tab = self
            .browser
            .new_tab_with_options(target)
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to create tab for {}: {}", url, e)))?;

        if active {
            tab.activate()
                .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to activate tab: {}", e)))?;
        }

        Ok(())
    }
}
