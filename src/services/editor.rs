use crate::models::{edit_fragment, Document, DocumentDraft, DEFAULT_ERROR_MESSAGE};
use crate::services::availability::{
    CheckMode, CheckOutcome, CheckerSettings, SlugAvailabilityChecker,
};
use crate::services::slug::{create_slug, validate_slug, SlugError};
use crate::services::status::StatusLine;
use crate::store::{DocumentStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// What the form is told after each finished slug check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSignal {
    Accept(String),
    Reject(SlugError),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct EditorSettings {
    pub slug_prefix: String,
    pub checker: CheckerSettings,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            slug_prefix: "/blog".to_string(),
            checker: CheckerSettings::default(),
        }
    }
}

/// State of one document form, from opening it until it is closed.
///
/// New documents get a slug derived from the title unless the custom-slug
/// toggle is on. Slugs of saved documents are locked.
pub struct EditSession {
    store: Arc<dyn DocumentStore>,
    checker: SlugAvailabilityChecker<dyn DocumentStore>,
    prefix: String,
    saved: Option<Document>,
    title: String,
    slug: String,
    content: String,
    draft: bool,
    custom_slug: bool,
    slug_enabled: bool,
    slug_errored: bool,
    confirmed_slug: Option<String>,
    status: StatusLine,
    signals: Option<mpsc::UnboundedSender<FormSignal>>,
}

impl EditSession {
    pub fn new_document(store: Arc<dyn DocumentStore>, settings: &EditorSettings) -> Self {
        let checker = SlugAvailabilityChecker::new(store.clone(), settings.checker);
        Self {
            store,
            checker,
            prefix: settings.slug_prefix.clone(),
            saved: None,
            title: String::new(),
            slug: settings.slug_prefix.clone(),
            content: String::new(),
            draft: false,
            custom_slug: false,
            slug_enabled: false,
            slug_errored: false,
            confirmed_slug: None,
            status: StatusLine::new(),
            signals: None,
        }
    }

    pub fn existing(
        store: Arc<dyn DocumentStore>,
        settings: &EditorSettings,
        document: Document,
    ) -> Self {
        let mut session = Self::new_document(store, settings);
        session.load(document);
        session
    }

    fn load(&mut self, document: Document) {
        self.title = document.title.clone();
        self.slug = document.slug.clone();
        self.content = document.content.clone();
        self.draft = document.draft;
        self.custom_slug = false;
        self.slug_enabled = false;
        self.slug_errored = false;
        self.confirmed_slug = Some(document.slug.clone());
        self.saved = Some(document);
    }

    /// Receive an accept/reject signal after every finished slug check.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<FormSignal> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.signals = Some(tx);
        rx
    }

    pub fn is_new(&self) -> bool {
        self.saved.is_none()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_draft(&self) -> bool {
        self.draft
    }

    pub fn is_slug_enabled(&self) -> bool {
        self.slug_enabled
    }

    pub fn is_slug_errored(&self) -> bool {
        self.slug_errored
    }

    /// The custom-slug toggle can only be used before the first save.
    pub fn can_customize_slug(&self) -> bool {
        self.is_new()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn set_draft(&mut self, draft: bool) {
        self.draft = draft;
    }

    pub fn to_draft(&self) -> DocumentDraft {
        DocumentDraft {
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: self.content.clone(),
            draft: self.draft,
        }
    }

    /// Title edits re-derive the slug of a new document unless it is custom.
    pub async fn set_title(&mut self, title: &str) -> Option<CheckOutcome> {
        self.title = title.to_string();
        self.update_slug().await
    }

    pub async fn set_custom_slug(&mut self, custom: bool) -> Option<CheckOutcome> {
        if !self.can_customize_slug() {
            return None;
        }
        self.custom_slug = custom;
        self.update_slug().await
    }

    async fn update_slug(&mut self) -> Option<CheckOutcome> {
        if !self.is_new() {
            return None;
        }
        if self.custom_slug {
            self.slug_enabled = true;
            return None;
        }

        self.slug = create_slug(&self.prefix, &self.title);
        self.slug_enabled = false;
        self.confirmed_slug = None;
        self.clear_slug_error();

        let outcome = self.checker.check(&self.slug, CheckMode::Auto).await;
        self.apply(&outcome);
        Some(outcome)
    }

    /// A keystroke in the slug field. Ignored while the field is locked.
    pub async fn edit_slug(&mut self, value: &str) -> Option<CheckOutcome> {
        if !self.slug_enabled {
            return None;
        }
        self.slug = value.to_string();
        self.confirmed_slug = None;

        if let Err(err) = validate_slug(value) {
            self.checker.cancel();
            let outcome = CheckOutcome::Rejected(err);
            self.apply(&outcome);
            return Some(outcome);
        }

        self.clear_slug_error();
        let outcome = self.checker.check(value, CheckMode::Manual).await;
        self.apply(&outcome);
        Some(outcome)
    }

    fn clear_slug_error(&mut self) {
        self.slug_errored = false;
        self.status.clear_slug_error();
    }

    fn apply(&mut self, outcome: &CheckOutcome) {
        match outcome {
            CheckOutcome::Accepted(slug) => {
                tracing::info!("Slug {} is available", slug);
                self.slug = slug.clone();
                self.confirmed_slug = Some(slug.clone());
                self.clear_slug_error();
                self.emit(FormSignal::Accept(slug.clone()));
            }
            CheckOutcome::Rejected(err) => {
                self.slug_errored = true;
                self.status.report_error(err);
                self.emit(FormSignal::Reject(err.clone()));
            }
            CheckOutcome::Superseded => {}
        }
    }

    fn emit(&self, signal: FormSignal) {
        if let Some(tx) = &self.signals {
            // A closed receiver only means nobody is listening any more.
            let _ = tx.send(signal);
        }
    }

    /// Persist the form. A new document's slug is checked again unless the
    /// current value has already been confirmed as free.
    pub async fn save(&mut self) -> Result<Document, SaveError> {
        let is_new = self.is_new();
        if is_new {
            self.confirm_slug().await?;
        }

        let draft = self.to_draft();
        let result = match &self.saved {
            None => self.store.create(&draft).await,
            Some(saved) => self.store.update(&saved.slug, &draft).await,
        };

        match result {
            Ok(document) => {
                tracing::info!("Saved document {}", document.slug);
                self.status
                    .notify(if is_new { "Successfully created!" } else { "Saved!" });
                self.load(document.clone());
                Ok(document)
            }
            Err(e) => {
                tracing::warn!("Saving {} failed: {}", draft.slug, e);
                self.status.fail(DEFAULT_ERROR_MESSAGE);
                Err(e.into())
            }
        }
    }

    async fn confirm_slug(&mut self) -> Result<(), SlugError> {
        if let Err(err) = validate_slug(&self.slug) {
            self.apply(&CheckOutcome::Rejected(err.clone()));
            return Err(err);
        }
        if self.confirmed_slug.as_deref() == Some(self.slug.as_str()) {
            return Ok(());
        }

        let mode = if self.custom_slug {
            CheckMode::Manual
        } else {
            CheckMode::Auto
        };
        let slug = self.slug.clone();
        let outcome = self.checker.check(&slug, mode).await;
        self.apply(&outcome);
        match outcome {
            CheckOutcome::Accepted(_) => Ok(()),
            CheckOutcome::Rejected(err) => Err(err),
            CheckOutcome::Superseded => Err(SlugError::LookupFailed(
                "slug check was superseded".to_string(),
            )),
        }
    }

    /// Location to navigate to once the document has been saved.
    pub fn edit_fragment(&self) -> Option<String> {
        self.saved.as_ref().map(|doc| edit_fragment(&doc.slug))
    }
}
