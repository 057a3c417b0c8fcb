//! 会员对话框服务

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::Dialog;

const CHOOSE_PREFIX: &str = "Choose";

/// Tier named by a membership button label (`"Choose Family"` → `"Family"`)
pub fn tier_from_label(label: &str) -> CoreResult<String> {
    let label = label.trim();
    let tier = label
        .strip_prefix(CHOOSE_PREFIX)
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        .unwrap_or(label)
        .trim();
    if tier.is_empty() {
        return Err(CoreError::ValidationError(format!(
            "Membership button label '{label}' names no tier"
        )));
    }
    Ok(tier.to_string())
}

/// CSS transform of a membership card
///
/// Cards lift on hover; the featured card keeps its enlarged scale in both states.
pub fn card_transform(featured: bool, hovered: bool) -> &'static str {
    match (featured, hovered) {
        (true, true) => "scale(1.08) translateY(-5px)",
        (true, false) => "scale(1.05)",
        (false, true) => "translateY(-10px)",
        (false, false) => "translateY(0)",
    }
}

/// 会员对话框服务
pub struct MembershipService {
    ctx: Arc<ServiceContext>,
    selected: Mutex<Option<String>>,
}

impl MembershipService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            selected: Mutex::new(None),
        }
    }

    /// Tier of the open dialog
    pub fn selected_tier(&self) -> Option<String> {
        self.selected.lock().clone()
    }

    /// 选择会员等级并打开对话框
    ///
    /// # Arguments
    /// * `label` - Text of the clicked membership button
    pub fn choose(&self, label: &str) -> CoreResult<Dialog> {
        let tier = tier_from_label(label)?;
        self.close();

        let dialog = Dialog {
            id: self.ctx.config.membership_dialog_id.clone(),
            title: format!("{tier} Membership"),
        };
        self.ctx.page.open_dialog(&dialog)?;
        log::info!("Membership dialog opened for tier {tier}");

        *self.selected.lock() = Some(tier);
        Ok(dialog)
    }

    /// Close the dialog; returns whether it was open.
    pub fn close(&self) -> bool {
        let closed = self
            .ctx
            .page
            .close_dialog(&self.ctx.config.membership_dialog_id);
        if let Some(tier) = self.selected.lock().take() {
            log::debug!("Membership dialog for {tier} closed");
        }
        closed
    }

    /// Keyboard shortcut handling; returns whether the key was consumed.
    pub fn handle_key(&self, key: &str) -> bool {
        match key {
            "Escape" | "Esc" => self.close(),
            _ => false,
        }
    }
}
