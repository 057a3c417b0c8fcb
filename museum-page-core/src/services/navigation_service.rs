//! 导航状态服务
//!
//! Tracks which navigation link is active from the scroll position and handles in-page anchor
//! clicks.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::error::CoreError;
use crate::services::ServiceContext;
use crate::types::ScrollBehavior;
use crate::utils::Throttle;

#[derive(Default)]
struct TrackerState {
    /// Href of the active link
    active: Option<String>,
    last_scroll_offset: f64,
    throttle: Option<Throttle>,
    navbar_missing_logged: bool,
}

/// 导航状态跟踪器
///
/// One instance per page. Only the scroll and anchor handlers mutate its state.
pub struct NavigationTracker {
    ctx: Arc<ServiceContext>,
    state: Mutex<TrackerState>,
}

impl NavigationTracker {
    /// 创建导航跟踪器
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let throttle = ctx
            .config
            .scroll_throttle_ms
            .map(|ms| Throttle::new(Duration::from_millis(ms)));
        Self {
            ctx,
            state: Mutex::new(TrackerState {
                throttle,
                ..TrackerState::default()
            }),
        }
    }

    /// Href of the active link, if any
    pub fn active_link(&self) -> Option<String> {
        self.state.lock().active.clone()
    }

    /// Scroll offset seen by the last processed scroll event
    pub fn last_scroll_offset(&self) -> f64 {
        self.state.lock().last_scroll_offset
    }

    /// 处理滚动事件
    ///
    /// Returns `false` when the event was dropped by the throttle.
    ///
    /// # Arguments
    /// * `timestamp_ms` - Event timestamp, only used for throttling
    pub fn on_scroll(&self, timestamp_ms: f64) -> bool {
        let offset = {
            let mut state = self.state.lock();
            if let Some(throttle) = state.throttle.as_mut() {
                if !throttle.allow(timestamp_ms) {
                    return false;
                }
            }
            let offset = self.ctx.page.scroll_offset();
            state.last_scroll_offset = offset;
            offset
        };

        self.update_navbar(offset);
        self.update_active_section(offset);
        true
    }

    /// Activate the link of the section containing `offset + probe offset`.
    ///
    /// When no section contains the probe, the previously active link stays active.
    /// Returns the href activated by this call.
    pub fn update_active_section(&self, offset: f64) -> Option<String> {
        let probe = offset + self.ctx.config.scroll_probe_offset;
        // Sections do not overlap; with a malformed layout the last match wins.
        let Some(section) = self
            .ctx
            .page
            .sections()
            .into_iter()
            .rev()
            .find(|s| s.contains(probe))
        else {
            log::trace!("No section contains scroll probe {probe}, keeping active link");
            return None;
        };

        let href = section.href();
        self.activate(&href);
        Some(href)
    }

    /// Mark the link with `href` active and every other link inactive.
    ///
    /// An href without a link clears all links.
    pub fn activate(&self, href: &str) {
        let mut state = self.state.lock();
        if state.active.as_deref() == Some(href) {
            return;
        }

        let links = self.ctx.page.nav_link_hrefs();
        for link in &links {
            self.ctx.page.set_nav_link_active(link, false);
        }

        if links.iter().any(|l| l == href) {
            self.ctx.page.set_nav_link_active(href, true);
            log::debug!("Active navigation link: {href}");
            state.active = Some(href.to_string());
        } else {
            log::debug!("No navigation link for {href}, all links cleared");
            state.active = None;
        }
    }

    /// 处理页内锚点点击
    ///
    /// Scrolls smoothly to the target, leaving room for the fixed header, and activates the
    /// link. Returns whether the click was handled; unhandled clicks keep the default browser
    /// navigation.
    pub fn on_anchor_click(&self, href: &str) -> bool {
        let Some(target_id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return false;
        };
        let Some(target_top) = self.ctx.page.element_top(target_id) else {
            log::debug!("Anchor target {href} not found, leaving click to the browser");
            return false;
        };

        let top = target_top - self.ctx.config.header_offset;
        self.ctx.page.scroll_to(top, ScrollBehavior::Smooth);
        self.activate(href);
        true
    }

    fn update_navbar(&self, offset: f64) {
        let scrolled = offset > self.ctx.config.navbar_scrolled_threshold;
        match self.ctx.page.set_navbar_scrolled(scrolled) {
            Ok(()) => {}
            Err(CoreError::ElementNotFound(_)) => {
                let mut state = self.state.lock();
                if !state.navbar_missing_logged {
                    log::debug!("Page has no navbar, skipping scrolled styling");
                    state.navbar_missing_logged = true;
                }
            }
            Err(e) => log::warn!("Failed to update navbar: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::test_utils::{create_test_context, museum_page};
    use crate::traits::{InMemoryPage, Page, TokioTimer};

    fn tracker_for(page: &InMemoryPage, config: PageConfig) -> NavigationTracker {
        let ctx = ServiceContext::simulated(Arc::new(page.clone()), Arc::new(TokioTimer), config);
        NavigationTracker::new(Arc::new(ctx))
    }

    fn two_section_page() -> InMemoryPage {
        InMemoryPage::new()
            .with_section("a", 0.0, 100.0)
            .with_section("b", 100.0, 200.0)
            .with_nav_link("#a")
            .with_nav_link("#b")
    }

    #[test]
    fn probe_position_selects_section() {
        let page = two_section_page();
        let config = PageConfig {
            scroll_probe_offset: 0.0,
            ..PageConfig::default()
        };
        let tracker = tracker_for(&page, config);

        page.set_scroll_offset(50.0);
        tracker.on_scroll(0.0);
        assert_eq!(page.active_nav_links(), vec!["#a".to_string()]);

        page.set_scroll_offset(150.0);
        tracker.on_scroll(1.0);
        assert_eq!(page.active_nav_links(), vec!["#b".to_string()]);
    }

    #[test]
    fn default_probe_sits_100px_below_viewport_top() {
        let page = two_section_page();
        let tracker = tracker_for(&page, PageConfig::default());

        page.set_scroll_offset(0.0);
        tracker.on_scroll(0.0);
        assert_eq!(page.active_nav_links(), vec!["#b".to_string()]);

        // 200 + 100 is past B's end: B stays active.
        page.set_scroll_offset(200.0);
        tracker.on_scroll(1.0);
        assert_eq!(page.active_nav_links(), vec!["#b".to_string()]);
    }

    #[test]
    fn scrolling_through_sections_keeps_single_active_link() {
        let (ctx, page, _) = create_test_context();
        let tracker = NavigationTracker::new(ctx);

        for (offset, expected) in [
            (0.0, "#home"),
            (550.0, "#collections"),
            (1350.0, "#visit"),
            (1900.0, "#contact"),
            (100.0, "#home"),
        ] {
            page.set_scroll_offset(offset);
            tracker.on_scroll(offset);
            assert_eq!(page.active_nav_links(), vec![expected.to_string()]);
            assert_eq!(tracker.active_link().as_deref(), Some(expected));
        }
    }

    #[test]
    fn position_outside_sections_keeps_previous_link() {
        let (ctx, page, _) = create_test_context();
        let tracker = NavigationTracker::new(ctx);

        page.set_scroll_offset(2500.0);
        tracker.on_scroll(0.0);
        assert_eq!(tracker.active_link().as_deref(), Some("#contact"));

        // Probe at 5100: below the last section.
        page.set_scroll_offset(5000.0);
        tracker.on_scroll(1.0);
        assert_eq!(page.active_nav_links(), vec!["#contact".to_string()]);
        assert!((tracker.last_scroll_offset() - 5000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn navbar_scrolled_past_threshold() {
        let (ctx, page, _) = create_test_context();
        let tracker = NavigationTracker::new(ctx);

        page.set_scroll_offset(50.0);
        tracker.on_scroll(0.0);
        assert_eq!(page.navbar_scrolled(), Some(false));

        page.set_scroll_offset(51.0);
        tracker.on_scroll(1.0);
        assert_eq!(page.navbar_scrolled(), Some(true));
    }

    #[test]
    fn page_without_navbar_still_tracks_sections() {
        let page = InMemoryPage::new()
            .with_section("a", 0.0, 500.0)
            .with_nav_link("#a");
        let tracker = tracker_for(&page, PageConfig::default());
        page.set_scroll_offset(200.0);
        assert!(tracker.on_scroll(0.0));
        assert_eq!(tracker.active_link().as_deref(), Some("#a"));
    }

    #[test]
    fn throttle_drops_rapid_events() {
        let page = museum_page();
        let config = PageConfig {
            scroll_throttle_ms: Some(100),
            ..PageConfig::default()
        };
        let tracker = tracker_for(&page, config);

        page.set_scroll_offset(0.0);
        assert!(tracker.on_scroll(0.0));
        page.set_scroll_offset(1350.0);
        assert!(!tracker.on_scroll(16.0));
        assert_eq!(tracker.active_link().as_deref(), Some("#home"));

        assert!(tracker.on_scroll(120.0));
        assert_eq!(tracker.active_link().as_deref(), Some("#visit"));
    }

    #[test]
    fn anchor_click_scrolls_below_header_and_activates() {
        let (ctx, page, _) = create_test_context();
        let tracker = NavigationTracker::new(ctx);

        assert!(tracker.on_anchor_click("#visit"));
        assert_eq!(
            page.scroll_requests(),
            vec![(1320.0, ScrollBehavior::Smooth)]
        );
        assert_eq!(page.active_nav_links(), vec!["#visit".to_string()]);
    }

    #[test]
    fn anchor_click_to_unknown_target_is_not_handled() {
        let (ctx, page, _) = create_test_context();
        let tracker = NavigationTracker::new(ctx);

        assert!(!tracker.on_anchor_click("#gift-shop"));
        assert!(!tracker.on_anchor_click("#"));
        assert!(!tracker.on_anchor_click("/tickets"));
        assert!(page.scroll_requests().is_empty());
    }

    #[test]
    fn anchor_to_element_without_link_clears_links() {
        let page = museum_page().with_element("main-content", 40.0);
        let tracker = tracker_for(&page, PageConfig::default());

        tracker.activate("#home");
        assert!(tracker.on_anchor_click("#main-content"));
        assert!(page.active_nav_links().is_empty());
        assert_eq!(tracker.active_link(), None);
        assert!(page.scroll_offset().abs() < f64::EPSILON);
    }
}
