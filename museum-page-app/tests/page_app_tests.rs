#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `PageAppBuilder` and `PageApp` event dispatch.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use museum_page_app::{EventOutcome, FollowUp, PageApp, PageAppBuilder, PageEvent};
use museum_page_core::error::{CoreError, CoreResult};
use museum_page_core::traits::{InMemoryPage, Page, SubmissionGateway, TokioTimer};
use museum_page_core::types::{
    ContactSubmission, FieldDescriptor, FieldKind, FormSubmissionState, NotificationKind,
    RevealTarget, ScrollBehavior, SubmissionReceipt,
};
use museum_page_core::PageConfig;
use tokio::sync::RwLock;

const FORM_ID: &str = "contactForm";
const DIALOG_ID: &str = "membershipModal";

// ===== Fixtures =====

fn museum_page() -> InMemoryPage {
    InMemoryPage::new()
        .with_navbar()
        .with_section("home", 0.0, 700.0)
        .with_section("exhibitions", 700.0, 900.0)
        .with_section("contact", 1600.0, 800.0)
        .with_nav_link("#home")
        .with_nav_link("#exhibitions")
        .with_nav_link("#contact")
        .with_form(FORM_ID, "Send Message")
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
            FieldDescriptor::new("message", FieldKind::Textarea)
                .required()
                .with_label("Message *"),
        )
        .with_dialog(DIALOG_ID)
}

fn fill_valid(page: &InMemoryPage) {
    page.set_field_value("firstName", "Ada");
    page.set_field_value("lastName", "Lovelace");
    page.set_field_value("email", "ada@example.org");
    page.set_field_value("message", "Do you lend the Babbage engine?");
}

/// Gateway that records submissions and optionally fails after a delay.
struct RecordingGateway {
    delay: Duration,
    failure: Option<String>,
    submissions: RwLock<Vec<ContactSubmission>>,
}

impl RecordingGateway {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
            submissions: RwLock::new(Vec::new()),
        }
    }

    fn failing(delay: Duration, reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::new(delay)
        }
    }

    async fn count(&self) -> usize {
        self.submissions.read().await.len()
    }
}

#[async_trait(?Send)]
impl SubmissionGateway for RecordingGateway {
    async fn submit(&self, submission: &ContactSubmission) -> CoreResult<SubmissionReceipt> {
        self.submissions.write().await.push(submission.clone());
        tokio::time::sleep(self.delay).await;
        match &self.failure {
            Some(reason) => Err(CoreError::SubmissionFailed(reason.clone())),
            None => Ok(SubmissionReceipt::issue()),
        }
    }
}

fn build_app(page: &InMemoryPage, gateway: Option<Arc<RecordingGateway>>) -> PageApp {
    let mut builder = PageAppBuilder::new()
        .page(Arc::new(page.clone()))
        .timer(Arc::new(TokioTimer));
    if let Some(gateway) = gateway {
        builder = builder.gateway(gateway);
    }
    builder.build().expect("app should build")
}

// ===== Builder =====

#[test]
fn builder_requires_page() {
    let result = PageAppBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ConfigError(_))));
}

#[test]
fn builder_rejects_invalid_config() {
    let config = PageConfig {
        header_offset: -1.0,
        ..PageConfig::default()
    };
    let result = PageAppBuilder::new()
        .page(Arc::new(museum_page()))
        .config(config)
        .build();
    assert!(matches!(result, Err(CoreError::ConfigError(_))));
}

#[test]
fn builder_defaults() {
    let app = PageAppBuilder::new()
        .page(Arc::new(museum_page()))
        .build()
        .unwrap();
    assert_eq!(app.config(), &PageConfig::default());
    assert_eq!(
        app.contact_form.submission_state(),
        FormSubmissionState::Idle
    );
    assert_eq!(app.navigation.active_link(), None);
}

// ===== Navigation =====

#[tokio::test]
async fn scroll_event_updates_active_link_and_navbar() {
    let page = museum_page();
    let app = build_app(&page, None);

    page.set_scroll_offset(800.0);
    let outcome = app.handle(PageEvent::Scroll { timestamp_ms: 0.0 }).await;

    assert_eq!(outcome, EventOutcome::proceed());
    assert_eq!(page.active_nav_links(), vec!["#exhibitions".to_string()]);
    assert_eq!(page.navbar_scrolled(), Some(true));
}

#[tokio::test]
async fn anchor_click_is_prevented_only_when_handled() {
    let page = museum_page();
    let app = build_app(&page, None);

    let handled = app
        .handle(PageEvent::AnchorClick {
            href: "#contact".to_string(),
        })
        .await;
    assert!(handled.prevent_default);
    assert_eq!(
        page.scroll_requests(),
        vec![(1520.0, ScrollBehavior::Smooth)]
    );
    assert_eq!(page.active_nav_links(), vec!["#contact".to_string()]);

    let ignored = app
        .handle(PageEvent::AnchorClick {
            href: "#nowhere".to_string(),
        })
        .await;
    assert!(!ignored.prevent_default);
}

// ===== Visual effects =====

#[tokio::test]
async fn reveal_elements_fade_in_once_when_visible() {
    let page = museum_page()
        .with_reveal_target(RevealTarget::new("reveal-0"))
        .with_reveal_target(RevealTarget::new("reveal-1").in_row(0))
        .with_reveal_target(RevealTarget::new("reveal-2").in_row(1));
    let app = build_app(&page, None);

    let keys = app.prepare_effects();
    assert_eq!(keys, vec!["reveal-0", "reveal-1", "reveal-2"]);
    assert_eq!(
        page.reveal_element("reveal-2").unwrap().delay,
        Some(Duration::from_millis(100))
    );

    for _ in 0..2 {
        let outcome = app
            .handle(PageEvent::ElementVisible {
                key: "reveal-2".to_string(),
            })
            .await;
        assert_eq!(outcome, EventOutcome::proceed());
    }
    assert_eq!(page.reveal_element("reveal-2").unwrap().reveal_count, 1);
    assert!(page.reveal_element("reveal-0").unwrap().is_hidden());
}

// ===== Contact form =====

#[tokio::test]
async fn blur_and_input_toggle_field_error() {
    let page = museum_page();
    let app = build_app(&page, None);
    page.set_field_value("email", "not-an-email");

    app.handle(PageEvent::FieldBlur {
        field_id: "email".to_string(),
    })
    .await;
    assert!(page.is_field_invalid("email"));
    assert!(page.error_element("email-error").unwrap().visible);

    app.handle(PageEvent::FieldInput {
        field_id: "email".to_string(),
    })
    .await;
    assert!(!page.is_field_invalid("email"));
    assert!(!page.error_element("email-error").unwrap().visible);
}

#[tokio::test]
async fn handler_failure_does_not_propagate() {
    let page = museum_page();
    let app = build_app(&page, None);

    let outcome = app
        .handle(PageEvent::FieldBlur {
            field_id: "fax".to_string(),
        })
        .await;
    assert_eq!(outcome, EventOutcome::proceed());

    // The page keeps working after the failure.
    page.set_scroll_offset(0.0);
    app.handle(PageEvent::Scroll { timestamp_ms: 1.0 }).await;
    assert_eq!(page.active_nav_links(), vec!["#home".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn invalid_submit_is_prevented_without_follow_up() {
    let page = museum_page();
    let gateway = Arc::new(RecordingGateway::new(Duration::from_millis(2000)));
    let app = build_app(&page, Some(Arc::clone(&gateway)));
    page.set_field_value("lastName", "Doe");
    page.set_field_value("email", "bad");
    page.set_field_value("message", "hi");

    let outcome = app.handle(PageEvent::FormSubmit).await;

    assert_eq!(outcome, EventOutcome::prevented());
    assert_eq!(gateway.count().await, 0);
    assert!(page.is_field_invalid("firstName"));
    assert!(page.is_field_invalid("email"));
    assert!(!page.is_field_invalid("lastName"));
    assert!(!page.is_field_invalid("message"));
}

#[tokio::test(start_paused = true)]
async fn valid_submit_with_simulated_gateway_schedules_expiry() {
    let page = museum_page();
    let app = build_app(&page, None);
    fill_valid(&page);
    let start = tokio::time::Instant::now();

    let outcome = app.handle(PageEvent::FormSubmit).await;

    assert!(start.elapsed() >= Duration::from_millis(2000));
    assert!(outcome.prevent_default);
    let notifications = page.notifications(FORM_ID);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Success);
    assert_eq!(page.field_value("firstName").unwrap(), "");

    let Some(FollowUp::ExpireNotification { id, after }) = outcome.follow_up.clone() else {
        panic!("expected expiry follow-up");
    };
    assert_eq!(id, notifications[0].id);
    assert_eq!(after, Duration::from_millis(5000));

    let expired_at = tokio::time::Instant::now();
    app.run_follow_up(outcome.follow_up.unwrap()).await;
    assert!(expired_at.elapsed() >= after);
    assert!(page.notifications(FORM_ID).is_empty());
}

#[tokio::test(start_paused = true)]
async fn second_submit_during_flight_is_reported_not_sent() {
    let page = museum_page();
    let gateway = Arc::new(RecordingGateway::new(Duration::from_millis(2000)));
    let app = build_app(&page, Some(Arc::clone(&gateway)));
    fill_valid(&page);

    let (first, second) = tokio::join!(app.handle(PageEvent::FormSubmit), async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let control = page.submit_control(FORM_ID).unwrap();
        assert!(control.disabled);
        assert_eq!(control.label, "Sending...");
        app.handle(PageEvent::FormSubmit).await
    });

    assert!(first.follow_up.is_some());
    assert_eq!(second, EventOutcome::prevented());
    assert_eq!(gateway.count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn failed_submit_shows_error_and_keeps_values() {
    let page = museum_page();
    let gateway = Arc::new(RecordingGateway::failing(
        Duration::from_millis(300),
        "mailbox full",
    ));
    let app = build_app(&page, Some(gateway));
    fill_valid(&page);

    let outcome = app.handle(PageEvent::FormSubmit).await;

    assert!(outcome.follow_up.is_some());
    let notifications = page.notifications(FORM_ID);
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Error);
    assert_eq!(page.field_value("email").unwrap(), "ada@example.org");
    let control = page.submit_control(FORM_ID).unwrap();
    assert!(!control.disabled);
    assert_eq!(control.label, "Send Message");
}

#[tokio::test(start_paused = true)]
async fn optional_field_never_shows_an_error_the_form_ignores() {
    let page = museum_page().with_field(
        FORM_ID,
        FieldDescriptor::new("newsletter", FieldKind::Email).with_label("Newsletter"),
    );
    let gateway = Arc::new(RecordingGateway::new(Duration::from_millis(100)));
    let app = build_app(&page, Some(Arc::clone(&gateway)));
    fill_valid(&page);
    page.set_field_value("newsletter", "nope");

    app.handle(PageEvent::FieldBlur {
        field_id: "newsletter".to_string(),
    })
    .await;
    assert!(!page.is_field_invalid("newsletter"));
    assert!(page.error_element("newsletter-error").is_none());

    let outcome = app.handle(PageEvent::FormSubmit).await;
    assert!(outcome.follow_up.is_some());
    assert_eq!(gateway.count().await, 1);
    assert!(!page.is_field_invalid("newsletter"));
}

// ===== Membership =====

#[tokio::test]
async fn membership_dialog_opens_and_closes() {
    let page = museum_page();
    let app = build_app(&page, None);

    let outcome = app
        .handle(PageEvent::MembershipChosen {
            label: "Choose Family".to_string(),
        })
        .await;
    assert!(outcome.prevent_default);
    assert!(page.is_dialog_open(DIALOG_ID));
    assert_eq!(
        page.dialog_title(DIALOG_ID).as_deref(),
        Some("Family Membership")
    );

    app.handle(PageEvent::KeyDown {
        key: "Escape".to_string(),
    })
    .await;
    assert!(!page.is_dialog_open(DIALOG_ID));

    app.handle(PageEvent::MembershipChosen {
        label: "Choose Patron".to_string(),
    })
    .await;
    app.handle(PageEvent::DialogDismissed).await;
    assert!(!page.is_dialog_open(DIALOG_ID));
}

#[tokio::test]
async fn membership_label_without_tier_is_ignored() {
    let page = museum_page();
    let app = build_app(&page, None);

    let outcome = app
        .handle(PageEvent::MembershipChosen {
            label: "Choose".to_string(),
        })
        .await;

    assert!(outcome.prevent_default);
    assert!(!page.is_dialog_open(DIALOG_ID));
}
