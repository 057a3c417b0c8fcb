//! Page controller for the museum website.
//!
//! Provides `PageApp` (service container and event dispatch), `PageAppBuilder` (adapter
//! injection), the `PageEvent` messages and the last-resort fault reporter.

pub mod fault;
pub mod message;

use std::sync::Arc;

use museum_page_core::error::{CoreError, CoreResult};
use museum_page_core::services::{
    ContactFormService, MembershipService, NavigationTracker, RevealService, ServiceContext,
    SubmitAttempt,
};
use museum_page_core::traits::{Page, SubmissionGateway, Timer, TokioTimer};
use museum_page_core::PageConfig;

pub use message::{EventOutcome, FollowUp, PageEvent};

/// Page controller.
///
/// Holds all services and the `ServiceContext`. Every page constructs this once at load via
/// `PageAppBuilder`, then feeds it events.
pub struct PageApp {
    /// Service context (page, gateway, timer, config)
    pub ctx: Arc<ServiceContext>,
    /// Navigation tracker
    pub navigation: NavigationTracker,
    /// Contact form service
    pub contact_form: ContactFormService,
    /// Membership dialog service
    pub membership: MembershipService,
    /// Scroll-reveal effects
    pub reveal: RevealService,
}

impl PageApp {
    pub fn config(&self) -> &PageConfig {
        &self.ctx.config
    }

    /// Hide the reveal elements; returns the keys whose visibility the platform must report
    /// with [`PageEvent::ElementVisible`].
    pub fn prepare_effects(&self) -> Vec<String> {
        self.reveal.prepare()
    }

    /// Dispatch one page event.
    ///
    /// Never fails: handler errors go to the fault reporter and the event gets the outcome it
    /// would have had on success (a submit is still prevented).
    pub async fn handle(&self, event: PageEvent) -> EventOutcome {
        log::trace!("Handling {event:?}");
        let name = event.name();
        match self.dispatch(event).await {
            Ok(outcome) => outcome,
            Err((e, fallback)) => {
                fault::report(&format!("{name} handler failed"), &e);
                fallback
            }
        }
    }

    /// Run a follow-up returned by [`handle`](Self::handle) on the context timer.
    pub async fn run_follow_up(&self, follow_up: FollowUp) -> EventOutcome {
        match follow_up {
            FollowUp::ExpireNotification { id, after } => {
                self.ctx.timer.sleep(after).await;
                self.handle(PageEvent::NotificationExpired { id }).await
            }
        }
    }

    async fn dispatch(
        &self,
        event: PageEvent,
    ) -> Result<EventOutcome, (CoreError, EventOutcome)> {
        match event {
            PageEvent::Scroll { timestamp_ms } => {
                self.navigation.on_scroll(timestamp_ms);
                Ok(EventOutcome::proceed())
            }
            PageEvent::AnchorClick { href } => {
                if self.navigation.on_anchor_click(&href) {
                    Ok(EventOutcome::prevented())
                } else {
                    Ok(EventOutcome::proceed())
                }
            }
            PageEvent::FieldBlur { field_id } => self
                .contact_form
                .validate_field(&field_id)
                .map(|_| EventOutcome::proceed())
                .map_err(|e| (e, EventOutcome::proceed())),
            PageEvent::FieldInput { field_id } => self
                .contact_form
                .clear_field_error(&field_id)
                .map(|()| EventOutcome::proceed())
                .map_err(|e| (e, EventOutcome::proceed())),
            PageEvent::FormSubmit => self
                .on_submit()
                .await
                .map_err(|e| (e, EventOutcome::prevented())),
            PageEvent::MembershipChosen { label } => self
                .membership
                .choose(&label)
                .map(|_| EventOutcome::prevented())
                .map_err(|e| (e, EventOutcome::prevented())),
            PageEvent::DialogDismissed => {
                self.membership.close();
                Ok(EventOutcome::proceed())
            }
            PageEvent::KeyDown { key } => {
                self.membership.handle_key(&key);
                Ok(EventOutcome::proceed())
            }
            PageEvent::NotificationExpired { id } => {
                self.contact_form.expire_notification(&id);
                Ok(EventOutcome::proceed())
            }
            PageEvent::ElementVisible { key } => self
                .reveal
                .on_visible(&key)
                .map(|_| EventOutcome::proceed())
                .map_err(|e| (e, EventOutcome::proceed())),
        }
    }

    async fn on_submit(&self) -> CoreResult<EventOutcome> {
        let outcome = EventOutcome::prevented();
        match self.contact_form.handle_submit().await? {
            SubmitAttempt::Invalid(validation) => {
                log::info!(
                    "Contact form rejected: {} invalid field(s)",
                    validation.errors.len()
                );
                Ok(outcome)
            }
            SubmitAttempt::Submitted(result) => {
                Ok(outcome.with_follow_up(FollowUp::ExpireNotification {
                    id: result.notification_id().to_string(),
                    after: self.ctx.config.notification_ttl(),
                }))
            }
        }
    }
}

/// Builder for constructing `PageApp` with platform-specific adapters.
///
/// # Required adapters
/// - `page`: how the document is read and mutated
///
/// # Optional
/// - `timer`: defaults to `TokioTimer`
/// - `gateway`: defaults to `SimulatedGateway` on the chosen timer
/// - `config`: defaults to `PageConfig::default()`
pub struct PageAppBuilder {
    page: Option<Arc<dyn Page>>,
    gateway: Option<Arc<dyn SubmissionGateway>>,
    timer: Option<Arc<dyn Timer>>,
    config: Option<PageConfig>,
}

impl PageAppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: None,
            gateway: None,
            timer: None,
            config: None,
        }
    }

    #[must_use]
    pub fn page(mut self, page: Arc<dyn Page>) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn gateway(mut self, gateway: Arc<dyn SubmissionGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    #[must_use]
    pub fn timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = Some(timer);
        self
    }

    #[must_use]
    pub fn config(mut self, config: PageConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the `PageApp`.
    ///
    /// # Errors
    /// Returns `CoreError::ConfigError` if the page is missing or the config is invalid.
    pub fn build(self) -> CoreResult<PageApp> {
        let page = self
            .page
            .ok_or_else(|| CoreError::ConfigError("page is required".to_string()))?;
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let timer = self.timer.unwrap_or_else(|| Arc::new(TokioTimer));

        let ctx = Arc::new(match self.gateway {
            Some(gateway) => ServiceContext::new(page, gateway, timer, config),
            None => ServiceContext::simulated(page, timer, config),
        });

        let navigation = NavigationTracker::new(Arc::clone(&ctx));
        let contact_form = ContactFormService::new(Arc::clone(&ctx));
        let membership = MembershipService::new(Arc::clone(&ctx));
        let reveal = RevealService::new(Arc::clone(&ctx));

        log::info!(
            "Page controller ready (form {}, dialog {})",
            ctx.config.form_id,
            ctx.config.membership_dialog_id
        );

        Ok(PageApp {
            ctx,
            navigation,
            contact_form,
            membership,
            reveal,
        })
    }
}

impl Default for PageAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
