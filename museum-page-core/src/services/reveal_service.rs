//! 滚动显现效果服务
//!
//! Elements start hidden and fade in the first time they become visible. Cards sharing a row
//! get increasing transition delays so they appear one after another.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::CoreResult;
use crate::services::ServiceContext;

/// 滚动显现效果服务
pub struct RevealService {
    ctx: Arc<ServiceContext>,
    /// Keys prepared but not yet revealed
    pending: Mutex<HashSet<String>>,
}

impl RevealService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Number of elements still waiting to be revealed
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// 隐藏所有待显现元素
    ///
    /// Returns the keys the platform must watch for visibility. An element the page refuses
    /// to hide is left visible and not watched.
    pub fn prepare(&self) -> Vec<String> {
        let page = &self.ctx.page;
        let step = self.ctx.config.reveal_stagger();

        let mut keys = Vec::new();
        for target in page.reveal_targets() {
            match page.prepare_reveal(&target.key, target.stagger_delay(step)) {
                Ok(()) => keys.push(target.key),
                Err(e) => log::warn!("Leaving {} visible: {e}", target.key),
            }
        }

        self.pending.lock().extend(keys.iter().cloned());
        log::debug!("Prepared {} reveal element(s)", keys.len());
        keys
    }

    /// 元素进入视口
    ///
    /// Reveals the element the first time; later calls are no-ops. Returns whether it was
    /// revealed now.
    pub fn on_visible(&self, key: &str) -> CoreResult<bool> {
        if !self.pending.lock().remove(key) {
            return Ok(false);
        }
        self.ctx.page.reveal(key)?;
        log::trace!("Revealed {key}");
        Ok(true)
    }
}
