//! Chromium page session over the Chrome `DevTools` Protocol.
//!
//! With the `browser` feature this drives a real Chromium through
//! chromiumoxide. Without it, [`ChromiumSession::launch`] fails with
//! [`ScrapeError::BrowserUnavailable`] so callers still compile.

#[cfg(not(feature = "browser"))]
use crate::driver::{ElementHandle, PageSession, SessionConfig};
#[cfg(not(feature = "browser"))]
use crate::locator::Locator;
use crate::result::{ScrapeError, ScrapeResult};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Blink switch that stops image downloads
pub const IMAGES_DISABLED_ARG: &str = "--blink-settings=imagesEnabled=false";

/// How long `close` waits for the CDP handler to drain
pub const HANDLER_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Await the handler task, aborting it once `grace` runs out.
///
/// Returns `true` if the task finished on its own.
#[cfg_attr(not(feature = "browser"), allow(dead_code))]
async fn await_handler(mut handle: JoinHandle<()>, grace: Duration) -> bool {
    if tokio::time::timeout(grace, &mut handle).await.is_ok() {
        return true;
    }
    handle.abort();
    tracing::debug!(grace = ?grace, "handler did not stop, aborted");
    false
}

#[cfg_attr(not(feature = "browser"), allow(dead_code))]
fn script_error(e: impl std::fmt::Display) -> ScrapeError {
    ScrapeError::script(e.to_string())
}

#[cfg(feature = "browser")]
mod cdp {
    use super::*;
    use crate::driver::{ElementHandle, PageSession, SessionConfig};
    use crate::locator::Locator;
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    /// Page session backed by one Chromium process and one tab
    #[derive(Debug)]
    pub struct ChromiumSession {
        browser: Arc<Mutex<CdpBrowser>>,
        page: Arc<Mutex<CdpPage>>,
        handle: Option<JoinHandle<()>>,
        url: String,
        closed: bool,
    }

    impl ChromiumSession {
        /// Launch Chromium and open a blank tab
        ///
        /// # Errors
        ///
        /// Returns error if the browser cannot be launched or the tab cannot
        /// be opened
        pub async fn launch(config: SessionConfig) -> ScrapeResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .request_timeout(config.navigation_timeout);

            if !config.headless {
                builder = builder.with_head();
            }
            if !config.sandbox {
                builder = builder.no_sandbox();
            }
            if config.disable_images {
                builder = builder.arg(IMAGES_DISABLED_ARG);
            }
            if let Some(ref path) = config.executable_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| ScrapeError::BrowserLaunch { message })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| ScrapeError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ScrapeError::page(e.to_string()))?;
            if let Some(ref ua) = config.user_agent {
                page.set_user_agent(ua)
                    .await
                    .map_err(|e| ScrapeError::page(e.to_string()))?;
            }

            tracing::debug!(
                headless = config.headless,
                images = !config.disable_images,
                "browser launched"
            );

            Ok(Self {
                browser: Arc::new(Mutex::new(browser)),
                page: Arc::new(Mutex::new(page)),
                handle: Some(handle),
                url: String::from("about:blank"),
                closed: false,
            })
        }
    }

    #[async_trait]
    impl PageSession for ChromiumSession {
        async fn navigate(&mut self, url: &str) -> ScrapeResult<()> {
            let page = self.page.lock().await;
            page.goto(url)
                .await
                .map_err(|e| ScrapeError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
            drop(page);
            tracing::debug!(url, "navigated");
            self.url = url.to_string();
            Ok(())
        }

        async fn resolve_many(&self, locator: &Locator) -> ScrapeResult<Vec<ElementHandle>> {
            let page = self.page.lock().await;
            page.evaluate(locator.to_collect_script())
                .await
                .map_err(script_error)?
                .into_value::<Vec<ElementHandle>>()
                .map_err(script_error)
        }

        fn current_url(&self) -> &str {
            &self.url
        }

        async fn close(&mut self) -> ScrapeResult<()> {
            if self.closed {
                return Ok(());
            }
            self.closed = true;

            let result = {
                let mut browser = self.browser.lock().await;
                match browser.close().await {
                    Ok(_) => browser.wait().await.map(|_| ()).map_err(ScrapeError::from),
                    Err(e) => Err(ScrapeError::page(e.to_string())),
                }
            };
            if let Some(handle) = self.handle.take() {
                await_handler(handle, HANDLER_SHUTDOWN_GRACE).await;
            }
            tracing::debug!("browser closed");
            result
        }
    }

    impl Drop for ChromiumSession {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.abort();
            }
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::ChromiumSession;

/// Placeholder session for builds without a browser backend
#[cfg(not(feature = "browser"))]
#[derive(Debug)]
pub struct ChromiumSession {
    _private: (),
}

#[cfg(not(feature = "browser"))]
impl ChromiumSession {
    /// Always fails: this build has no browser backend
    ///
    /// # Errors
    ///
    /// Always returns [`ScrapeError::BrowserUnavailable`]
    pub async fn launch(_config: SessionConfig) -> ScrapeResult<Self> {
        Err(ScrapeError::BrowserUnavailable)
    }
}

#[cfg(not(feature = "browser"))]
#[async_trait::async_trait]
impl PageSession for ChromiumSession {
    async fn navigate(&mut self, _url: &str) -> ScrapeResult<()> {
        Err(ScrapeError::BrowserUnavailable)
    }

    async fn resolve_many(&self, _locator: &Locator) -> ScrapeResult<Vec<ElementHandle>> {
        Err(ScrapeError::BrowserUnavailable)
    }

    fn current_url(&self) -> &str {
        "about:blank"
    }

    async fn close(&mut self) -> ScrapeResult<()> {
        Ok(())
    }
}
