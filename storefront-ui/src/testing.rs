//! Fixtures shared by the controller unit tests.

use crate::api::MockApiClient;
use crate::browser::MemoryBrowser;
use crate::config::StorefrontConfig;
use crate::context::Storefront;
use crate::notify::RecordingNotifier;
use crate::schedule::ManualScheduler;
use std::rc::Rc;

pub const CSRF_COOKIE: &str = "sessionid=s1; csrftoken=abc123";

/// In-memory capabilities, kept concrete so tests can inspect them.
pub struct Harness {
    pub browser: Rc<MemoryBrowser>,
    pub scheduler: Rc<ManualScheduler>,
    pub notifier: Rc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            browser: Rc::new(MemoryBrowser::new().with_cookies(CSRF_COOKIE)),
            scheduler: Rc::new(ManualScheduler::new()),
            notifier: Rc::new(RecordingNotifier::new()),
        }
    }

    pub fn storefront(&self, api: MockApiClient) -> Rc<Storefront> {
        self.storefront_with(StorefrontConfig::default(), api)
    }

    pub fn storefront_with(&self, config: StorefrontConfig, api: MockApiClient) -> Rc<Storefront> {
        Rc::new(
            Storefront::new(
                config,
                Rc::new(api),
                self.browser.clone(),
                self.scheduler.clone(),
            )
            .with_notifier(self.notifier.clone()),
        )
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifier
            .notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }
}
