//! Form Controller
//!
//! Create/edit drafts, synchronous validation and the submit lifecycle.
//! A draft only lives while its modal is open; closing it in any way
//! discards the values.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::api::{ApiError, RecordApi, Saved};
use crate::record::Record;

/// field name -> message
pub type FieldErrors = BTreeMap<String, String>;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ========================
// Schema
// ========================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    /// ISO `YYYY-MM-DD`
    Date,
    Number { min: Option<f64>, integer: bool },
    /// (value, label) pairs
    Select(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Value of a blank draft
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false, default: "" }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Non-negative number
    pub const fn amount(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number { min: Some(0.0), integer: false })
    }

    /// Non-negative whole number
    pub const fn count(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number { min: Some(0.0), integer: true })
    }

    pub const fn select(name: &'static str, label: &'static str, options: &'static [(&'static str, &'static str)]) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self { default, ..self }
    }
}

#[derive(Debug, PartialEq)]
pub struct FormSchema {
    pub fields: &'static [FieldSpec],
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// A draft with every field at its default
    pub fn blank(&self) -> FormDraft {
        FormDraft {
            values: self.fields.iter().map(|f| (f.name.to_string(), f.default.to_string())).collect(),
            errors: FieldErrors::new(),
        }
    }

    /// A draft prefilled from a serialized record; unknown or null fields
    /// fall back to the default
    pub fn draft_from<T: Serialize>(&self, record: &T) -> FormDraft {
        let source = serde_json::to_value(record).unwrap_or(Value::Null);
        let mut draft = self.blank();
        for spec in self.fields {
            let value = match source.get(spec.name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                _ => continue,
            };
            draft.values.insert(spec.name.to_string(), value);
        }
        draft
    }

    /// True while any required field is blank
    pub fn missing_required(&self, draft: &FormDraft) -> bool {
        self.fields.iter().any(|f| f.required && draft.get(f.name).trim().is_empty())
    }

    /// Check every field, returning messages for the ones that fail
    pub fn validate(&self, draft: &FormDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for spec in self.fields {
            if let Some(message) = validate_field(spec, draft.get(spec.name)) {
                errors.insert(spec.name.to_string(), message);
            }
        }
        errors
    }

    /// JSON body for create/update. Numbers are sent as numbers and blank
    /// optional fields as null.
    pub fn payload(&self, draft: &FormDraft) -> Value {
        let mut body = Map::new();
        for spec in self.fields {
            let raw = draft.get(spec.name).trim();
            let value = if raw.is_empty() {
                Value::Null
            } else {
                match spec.kind {
                    // validation accepts "2.0" and "1e2" as whole numbers
                    FieldKind::Number { integer: true, .. } => raw
                        .parse::<i64>()
                        .ok()
                        .or_else(|| whole_number(raw))
                        .map(Value::from)
                        .unwrap_or_else(|| Value::String(raw.to_string())),
                    FieldKind::Number { .. } => raw
                        .parse::<f64>()
                        .ok()
                        .and_then(Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::String(raw.to_string())),
                    _ => Value::String(raw.to_string()),
                }
            };
            body.insert(spec.name.to_string(), value);
        }
        Value::Object(body)
    }
}

fn whole_number(raw: &str) -> Option<i64> {
    let number = raw.parse::<f64>().ok()?;
    (number.is_finite() && number.fract() == 0.0 && number.abs() < i64::MAX as f64).then(|| number as i64)
}

fn validate_field(spec: &FieldSpec, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return spec.required.then(|| format!("{} is required", spec.label));
    }
    match spec.kind {
        FieldKind::Text | FieldKind::TextArea => None,
        FieldKind::Email => {
            let valid = value
                .split_once('@')
                .map(|(user, domain)| !user.is_empty() && domain.contains('.') && !domain.ends_with('.'))
                .unwrap_or(false);
            (!valid).then(|| format!("{} must be a valid email address", spec.label))
        }
        FieldKind::Date => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .err()
            .map(|_| format!("{} must be a date (YYYY-MM-DD)", spec.label)),
        FieldKind::Number { min, integer } => {
            let Ok(number) = value.parse::<f64>() else {
                return Some(format!("{} must be a number", spec.label));
            };
            if !number.is_finite() {
                return Some(format!("{} must be a number", spec.label));
            }
            if integer && number.fract() != 0.0 {
                return Some(format!("{} must be a whole number", spec.label));
            }
            match min {
                Some(min) if number < min && min == 0.0 => Some(format!("{} cannot be negative", spec.label)),
                Some(min) if number < min => Some(format!("{} must be at least {}", spec.label, min)),
                _ => None,
            }
        }
        FieldKind::Select(options) => {
            let known = options.iter().any(|(v, _)| *v == value);
            (!known).then(|| format!("Choose a valid {}", spec.label.to_lowercase()))
        }
    }
}

// ========================
// Draft
// ========================

/// In-progress, unsaved form values plus their validation messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    values: BTreeMap<String, String>,
    errors: FieldErrors,
}

impl FormDraft {
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Set a value and clear that field's stale error
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
        self.errors.remove(name);
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn merge_errors(&mut self, errors: &FieldErrors) {
        self.errors.extend(errors.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

// ========================
// Controller
// ========================

/// Records that can be created and edited through a form
pub trait FormModel: Record + Serialize + DeserializeOwned {
    fn schema() -> &'static FormSchema;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("no form is open")]
    Closed,
    #[error("a submission is already in flight")]
    InFlight,
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    #[error("server rejected the submission")]
    Rejected(ApiError),
}

/// What to send for a validated submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest<Id> {
    pub mode: FormMode<Id>,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq)]
struct OpenForm<Id> {
    mode: FormMode<Id>,
    draft: FormDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormController<T: FormModel> {
    open: Option<OpenForm<T::Id>>,
    submitting: bool,
    message: Option<String>,
}

impl<T: FormModel> Default for FormController<T> {
    fn default() -> Self {
        Self { open: None, submitting: false, message: None }
    }
}

impl<T: FormModel> FormController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> &'static FormSchema {
        T::schema()
    }

    /// Open a blank create form. Any previous draft is gone.
    pub fn open_create(&mut self) {
        self.open = Some(OpenForm { mode: FormMode::Create, draft: T::schema().blank() });
        self.message = None;
    }

    /// Open an edit form prefilled from `record`
    pub fn open_edit(&mut self, record: &T) {
        self.open = Some(OpenForm { mode: FormMode::Edit(record.id()), draft: T::schema().draft_from(record) });
        self.message = None;
    }

    /// Close without saving; the draft is discarded
    pub fn cancel(&mut self) {
        self.open = None;
        self.message = None;
        self.submitting = false;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn mode(&self) -> Option<&FormMode<T::Id>> {
        self.open.as_ref().map(|f| &f.mode)
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        self.open.as_ref().map(|f| &f.draft)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        if let Some(form) = self.open.as_mut() {
            form.draft.set(name, value);
        }
    }

    /// Form-level error from the last failed submission
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        match &self.open {
            Some(form) => !self.submitting && !T::schema().missing_required(&form.draft),
            None => false,
        }
    }

    /// Validate and mark the form as submitting. Nothing may be sent unless
    /// this returns `Ok`.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest<T::Id>, FormError> {
        if self.submitting {
            return Err(FormError::InFlight);
        }
        let form = self.open.as_mut().ok_or(FormError::Closed)?;
        let errors = T::schema().validate(&form.draft);
        if !errors.is_empty() {
            form.draft.set_errors(errors.clone());
            return Err(FormError::Invalid(errors));
        }
        self.submitting = true;
        self.message = None;
        Ok(SubmitRequest { mode: form.mode.clone(), body: T::schema().payload(&form.draft) })
    }

    /// Apply the server's answer. On success the form closes and the saved
    /// record is handed back; on failure the form stays open with the
    /// server's message.
    pub fn finish_submit(&mut self, result: Result<Saved<T>, ApiError>) -> Result<Saved<T>, FormError> {
        self.submitting = false;
        match result {
            Ok(saved) => {
                self.open = None;
                self.message = None;
                Ok(saved)
            }
            Err(err) => {
                log::info!("{} submission rejected: {}", T::RESOURCE, err);
                if let (Some(form), Some(fields)) = (self.open.as_mut(), err.field_errors()) {
                    form.draft.merge_errors(fields);
                }
                self.message = Some(err.user_message());
                Err(FormError::Rejected(err))
            }
        }
    }

    /// Validate, send and apply the answer in one step
    pub async fn submit<A>(&mut self, api: &A) -> Result<Saved<T>, FormError>
    where
        A: RecordApi<T> + ?Sized,
    {
        let request = self.begin_submit()?;
        let result = match &request.mode {
            FormMode::Create => api.create(&request.body).await,
            FormMode::Edit(id) => api.update(id, &request.body).await,
        };
        self.finish_submit(result)
    }
}
