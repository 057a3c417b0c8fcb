//! 联系表单服务
//!
//! Per-field validity state and the submission workflow:
//! `idle → submitting → succeeded → idle`, with validation failures going straight back to idle.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::services::validation::evaluate_field;
use crate::services::ServiceContext;
use crate::types::{
    ContactSubmission, FieldDescriptor, FieldError, FieldValidity, FormSubmissionState,
    FormValidation, Notification, NotificationKind, SubmissionReceipt,
};

/// Result of a submission that reached the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Accepted; the form was reset
    Accepted {
        receipt: SubmissionReceipt,
        notification_id: String,
    },
    /// Rejected by the gateway; the values were kept
    Failed {
        reason: String,
        notification_id: String,
    },
}

impl SubmissionOutcome {
    /// Id of the notification shown for this outcome
    pub fn notification_id(&self) -> &str {
        match self {
            Self::Accepted {
                notification_id, ..
            }
            | Self::Failed {
                notification_id, ..
            } => notification_id,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Result of handling a submit event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation failed, every invalid field shows its error
    Invalid(FormValidation),
    /// Validation passed and the data went to the gateway
    Submitted(SubmissionOutcome),
}

#[derive(Default)]
struct FormState {
    submission: FormSubmissionState,
    fields: HashMap<String, FieldValidity>,
}

/// 联系表单服务
pub struct ContactFormService {
    ctx: Arc<ServiceContext>,
    state: Mutex<FormState>,
}

impl ContactFormService {
    /// 创建联系表单服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            state: Mutex::new(FormState::default()),
        }
    }

    pub fn form_id(&self) -> &str {
        &self.ctx.config.form_id
    }

    pub fn submission_state(&self) -> FormSubmissionState {
        self.state.lock().submission
    }

    /// Validity of a field as last recorded (untouched if never validated)
    pub fn field_validity(&self, field_id: &str) -> FieldValidity {
        self.state
            .lock()
            .fields
            .get(field_id)
            .cloned()
            .unwrap_or_default()
    }

    // === Validation ===

    /// 校验单个字段（失焦时）
    ///
    /// Shows or clears the field's inline error. Calling it again on an unchanged value yields
    /// the same result and reuses the same error element.
    ///
    /// Only required fields carry inline errors; an optional field stays untouched, matching
    /// what [`validate_form`](Self::validate_form) checks before submitting.
    pub fn validate_field(&self, field_id: &str) -> CoreResult<FieldValidity> {
        let field = self.descriptor(field_id)?;
        if !field.required {
            log::trace!("Skipping optional field {field_id}");
            return Ok(FieldValidity::Untouched);
        }
        self.validate_descriptor(&field)
    }

    /// 清除字段错误（输入时）
    ///
    /// Removes the invalid marker and hides the error element, which stays in the page for
    /// reuse. The field becomes untouched.
    pub fn clear_field_error(&self, field_id: &str) -> CoreResult<()> {
        let field = self.descriptor(field_id)?;
        self.clear_markers(&field)?;
        self.state
            .lock()
            .fields
            .insert(field.id, FieldValidity::Untouched);
        Ok(())
    }

    /// 校验整个表单
    ///
    /// Every required field is validated, none is skipped after a failure.
    pub fn validate_form(&self) -> CoreResult<FormValidation> {
        let mut validation = FormValidation::default();
        for field in self.fields()?.iter().filter(|f| f.required) {
            if let FieldValidity::Invalid(message) = self.validate_descriptor(field)? {
                validation.errors.push(FieldError {
                    field_id: field.id.clone(),
                    message,
                });
            }
        }

        if !validation.is_valid() {
            log::debug!(
                "Form {} invalid: {} field(s) failed",
                self.form_id(),
                validation.errors.len()
            );
        }
        Ok(validation)
    }

    /// Values of every field, keyed by field name
    pub fn collect_submission(&self) -> CoreResult<ContactSubmission> {
        let mut submission = ContactSubmission::new(self.form_id());
        for field in self.fields()? {
            let value = self.ctx.page.field_value(&field.id)?;
            submission.fields.insert(field.name, value);
        }
        Ok(submission)
    }

    // === Submission ===

    /// 处理提交事件
    ///
    /// Collects, validates and, when valid, submits the form.
    pub async fn handle_submit(&self) -> CoreResult<SubmitAttempt> {
        self.ensure_idle()?;

        let validation = self.validate_form()?;
        if !validation.is_valid() {
            return Ok(SubmitAttempt::Invalid(validation));
        }

        let submission = self.collect_submission()?;
        let outcome = self.submit_form(submission).await?;
        Ok(SubmitAttempt::Submitted(outcome))
    }

    /// 提交表单
    ///
    /// Only call with data that passed [`validate_form`](Self::validate_form). The submit control
    /// shows the sending label and stays disabled until the gateway answers. On success the form
    /// is reset; on failure the values are kept. Either way a notification is shown and the
    /// control restored.
    ///
    /// Errors only when a submission is already in flight or the page lacks the form controls.
    pub async fn submit_form(&self, submission: ContactSubmission) -> CoreResult<SubmissionOutcome> {
        {
            let mut state = self.state.lock();
            if state.submission != FormSubmissionState::Idle {
                return Err(CoreError::SubmissionInProgress(self.form_id().to_string()));
            }
            state.submission = FormSubmissionState::Submitting;
        }

        let original_label = match self.enter_sending_state() {
            Ok(label) => label,
            Err(e) => {
                self.set_submission_state(FormSubmissionState::Idle);
                return Err(e);
            }
        };

        log::info!("Submitting form {}", self.form_id());
        let result = self.ctx.gateway.submit(&submission).await;

        let finished = match result {
            Ok(receipt) => {
                self.set_submission_state(FormSubmissionState::Succeeded);
                self.finish_success(receipt)
            }
            Err(e) => {
                log::warn!("Submission of form {} failed: {e}", self.form_id());
                self.finish_failure(&e)
            }
        };

        // The control comes back even when the page refused part of the cleanup.
        let restored = self
            .ctx
            .page
            .set_submit_control(self.form_id(), &original_label, false);
        self.set_submission_state(FormSubmissionState::Idle);

        let outcome = finished?;
        restored?;
        Ok(outcome)
    }

    /// Remove a notification if it is still shown; returns whether it was.
    pub fn expire_notification(&self, notification_id: &str) -> bool {
        let removed = self.ctx.page.remove_element(notification_id);
        if removed {
            log::debug!("Notification {notification_id} expired");
        }
        removed
    }

    /// Clear every field value and validity marker.
    pub fn reset(&self) -> CoreResult<()> {
        self.ctx.page.reset_form(self.form_id())?;
        for field in self.fields()? {
            self.clear_markers(&field)?;
        }
        self.state.lock().fields.clear();
        Ok(())
    }

    // === Internals ===

    fn fields(&self) -> CoreResult<Vec<FieldDescriptor>> {
        self.ctx.page.form_fields(self.form_id())
    }

    fn descriptor(&self, field_id: &str) -> CoreResult<FieldDescriptor> {
        self.fields()?
            .into_iter()
            .find(|f| f.id == field_id)
            .ok_or_else(|| CoreError::FieldNotFound(field_id.to_string()))
    }

    fn validate_descriptor(&self, field: &FieldDescriptor) -> CoreResult<FieldValidity> {
        let value = self.ctx.page.field_value(&field.id)?;
        let validity = evaluate_field(field, &value);

        match &validity {
            FieldValidity::Invalid(message) => self.show_field_error(field, message)?,
            _ => self.clear_markers(field)?,
        }

        self.state
            .lock()
            .fields
            .insert(field.id.clone(), validity.clone());
        Ok(validity)
    }

    fn show_field_error(&self, field: &FieldDescriptor, message: &str) -> CoreResult<()> {
        let page = &self.ctx.page;
        let error_id = field.error_element_id();
        if !page.has_element(&error_id) {
            page.create_error_element(&field.id, &error_id)?;
        }
        page.set_field_invalid(&field.id, true)?;
        page.show_error_element(&error_id, message)
    }

    fn clear_markers(&self, field: &FieldDescriptor) -> CoreResult<()> {
        let page = &self.ctx.page;
        page.set_field_invalid(&field.id, false)?;
        let error_id = field.error_element_id();
        if page.has_element(&error_id) {
            page.hide_error_element(&error_id)?;
        }
        Ok(())
    }

    fn ensure_idle(&self) -> CoreResult<()> {
        if self.submission_state() == FormSubmissionState::Idle {
            Ok(())
        } else {
            Err(CoreError::SubmissionInProgress(self.form_id().to_string()))
        }
    }

    fn set_submission_state(&self, next: FormSubmissionState) {
        let mut state = self.state.lock();
        log::trace!("Form {}: {} -> {next}", self.form_id(), state.submission);
        state.submission = next;
    }

    /// Returns the label to restore afterwards.
    fn enter_sending_state(&self) -> CoreResult<String> {
        let page = &self.ctx.page;
        let original_label = page.submit_label(self.form_id())?;
        page.set_submit_control(self.form_id(), &self.ctx.config.sending_label, true)?;
        Ok(original_label)
    }

    fn finish_success(&self, receipt: SubmissionReceipt) -> CoreResult<SubmissionOutcome> {
        let notification =
            Notification::new(NotificationKind::Success, &self.ctx.config.success_message);
        self.ctx
            .page
            .insert_notification(self.form_id(), &notification)?;
        self.reset()?;
        Ok(SubmissionOutcome::Accepted {
            receipt,
            notification_id: notification.id,
        })
    }

    fn finish_failure(&self, error: &CoreError) -> CoreResult<SubmissionOutcome> {
        let notification =
            Notification::new(NotificationKind::Error, &self.ctx.config.failure_message);
        self.ctx
            .page
            .insert_notification(self.form_id(), &notification)?;
        Ok(SubmissionOutcome::Failed {
            reason: error.to_string(),
            notification_id: notification.id,
        })
    }
}
