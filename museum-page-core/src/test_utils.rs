//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::PageConfig;
use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{InMemoryPage, SubmissionGateway, SubmitControl, Timer, TokioTimer};
use crate::types::{
    ContactSubmission, FieldDescriptor, FieldKind, RevealTarget, SubmissionReceipt,
};

pub const FORM_ID: &str = "contactForm";
pub const SUBMIT_LABEL: &str = "Send Message";
pub const DIALOG_ID: &str = "membershipModal";

/// Sections: home [0,600), collections [600,1400), visit [1400,2000), contact [2000,2800)
pub fn museum_page() -> InMemoryPage {
    InMemoryPage::new()
        .with_navbar()
        .with_section("home", 0.0, 600.0)
        .with_section("collections", 600.0, 800.0)
        .with_section("visit", 1400.0, 600.0)
        .with_section("contact", 2000.0, 800.0)
        .with_nav_link("#home")
        .with_nav_link("#collections")
        .with_nav_link("#visit")
        .with_nav_link("#contact")
        .with_form(FORM_ID, SUBMIT_LABEL)
        .with_field(
            FORM_ID,
            FieldDescriptor::new("firstName", FieldKind::Text)
                .required()
                .with_label("First Name *"),
        )
        .with_field(
            FORM_ID,
            FieldDescriptor::new("lastName", FieldKind::Text)
                .required()
                .with_label("Last Name *"),
        )
        .with_field(
            FORM_ID,
            FieldDescriptor::new("email", FieldKind::Email)
                .required()
                .with_label("Email Address *"),
        )
        .with_field(
            FORM_ID,
            FieldDescriptor::new("phone", FieldKind::Text).with_placeholder("Phone"),
        )
        .with_field(
            FORM_ID,
            FieldDescriptor::new("message", FieldKind::Textarea)
                .required()
                .with_label("Message *"),
        )
        .with_dialog(DIALOG_ID)
        .with_reveal_target(RevealTarget::new("feature"))
        .with_reveal_target(RevealTarget::new("card-0").in_row(0))
        .with_reveal_target(RevealTarget::new("card-1").in_row(1))
        .with_reveal_target(RevealTarget::new("card-2").in_row(2))
}

/// Fill the contact form fields
pub fn fill(page: &InMemoryPage, first: &str, last: &str, email: &str, message: &str) {
    page.set_field_value("firstName", first);
    page.set_field_value("lastName", last);
    page.set_field_value("email", email);
    page.set_field_value("message", message);
}

// ===== MockGateway =====

/// Records submissions and the submit control state seen while each one is in flight.
pub struct MockGateway {
    page: InMemoryPage,
    delay: Duration,
    submissions: RwLock<Vec<ContactSubmission>>,
    observed_controls: RwLock<Vec<Option<SubmitControl>>>,
    /// 如果 Some，submit 时返回此错误
    failure: RwLock<Option<String>>,
}

impl MockGateway {
    pub fn new(page: InMemoryPage, delay: Duration) -> Self {
        Self {
            page,
            delay,
            submissions: RwLock::new(Vec::new()),
            observed_controls: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    pub async fn set_failure(&self, reason: Option<String>) {
        *self.failure.write().await = reason;
    }

    pub async fn submissions(&self) -> Vec<ContactSubmission> {
        self.submissions.read().await.clone()
    }

    pub async fn observed_controls(&self) -> Vec<Option<SubmitControl>> {
        self.observed_controls.read().await.clone()
    }
}

#[async_trait(?Send)]
impl SubmissionGateway for MockGateway {
    async fn submit(&self, submission: &ContactSubmission) -> CoreResult<SubmissionReceipt> {
        self.observed_controls
            .write()
            .await
            .push(self.page.submit_control(&submission.form_id));
        self.submissions.write().await.push(submission.clone());

        TokioTimer.sleep(self.delay).await;

        if let Some(ref reason) = *self.failure.read().await {
            return Err(CoreError::SubmissionFailed(reason.clone()));
        }
        Ok(SubmissionReceipt::issue())
    }
}

/// Context over the museum fixture page with a 2 s mock gateway
pub fn create_test_context() -> (Arc<ServiceContext>, InMemoryPage, Arc<MockGateway>) {
    let page = museum_page();
    let gateway = Arc::new(MockGateway::new(page.clone(), Duration::from_millis(2000)));
    let ctx = Arc::new(ServiceContext::new(
        Arc::new(page.clone()),
        gateway.clone(),
        Arc::new(TokioTimer),
        PageConfig::default(),
    ));
    (ctx, page, gateway)
}
