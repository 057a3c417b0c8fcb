//! 页面行为服务层

mod contact_form_service;
mod membership_service;
mod navigation_service;
mod reveal_service;
mod validation;

pub use contact_form_service::{ContactFormService, SubmissionOutcome, SubmitAttempt};
pub use membership_service::{card_transform, tier_from_label, MembershipService};
pub use navigation_service::NavigationTracker;
pub use reveal_service::RevealService;
pub use validation::{evaluate_field, INVALID_EMAIL_MESSAGE};

use std::sync::Arc;

use crate::config::PageConfig;
use crate::traits::{Page, SimulatedGateway, SubmissionGateway, Timer};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的页面、提交与计时实现。
pub struct ServiceContext {
    /// 页面访问
    pub page: Arc<dyn Page>,
    /// 表单提交
    pub gateway: Arc<dyn SubmissionGateway>,
    /// 计时器
    pub timer: Arc<dyn Timer>,
    /// 页面配置
    pub config: PageConfig,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        page: Arc<dyn Page>,
        gateway: Arc<dyn SubmissionGateway>,
        timer: Arc<dyn Timer>,
        config: PageConfig,
    ) -> Self {
        Self {
            page,
            gateway,
            timer,
            config,
        }
    }

    /// 创建使用模拟提交的服务上下文
    ///
    /// The simulated gateway waits `config.submission_delay_ms` on the given timer.
    #[must_use]
    pub fn simulated(page: Arc<dyn Page>, timer: Arc<dyn Timer>, config: PageConfig) -> Self {
        let gateway = Arc::new(SimulatedGateway::new(
            Arc::clone(&timer),
            config.submission_delay(),
        ));
        Self::new(page, gateway, timer, config)
    }
}
