//! Admin workflow: magic-link sign-in, uploads, and the reconciled item list.

use crate::{ItemForm, Upload, VitrineConfig};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use vitrine_core::{Item, ItemId, ItemPatch, object_name};
use vitrine_error::{AuthError, AuthErrorKind, ValidationError, ValidationErrorKind, VitrineResult};
use vitrine_interface::{Authenticator, ItemStore, ObjectStore, Session, SessionTokens};
use vitrine_reconciler::{Entry, Reconciler, RemotePolicy, ReorderOutcome};
use vitrine_rest::{RestAuthenticator, RestItemStore, RestObjectStore};

/// Admin panel for one site.
///
/// Every write requires a signed-in session.
pub struct AdminPanel<S, O, A>
where
    S: ItemStore + ?Sized + 'static,
    O: ObjectStore + ?Sized,
    A: Authenticator + ?Sized,
{
    reconciler: Reconciler<S>,
    objects: Arc<O>,
    auth: Arc<A>,
    policy: RemotePolicy,
}

/// Admin panel wired to the hosted backend.
pub type HostedAdminPanel = AdminPanel<RestItemStore, RestObjectStore, RestAuthenticator>;

impl HostedAdminPanel {
    /// Build the hosted stack from configuration.
    ///
    /// Row and storage requests carry the signed-in session's token.
    /// Must be called from within a tokio runtime.
    pub fn hosted(config: &VitrineConfig) -> VitrineResult<Self> {
        let rest = config.rest_config()?.clone();
        let auth = Arc::new(RestAuthenticator::new(rest.clone()));
        let items =
            Arc::new(RestItemStore::new(rest.clone()).with_session(auth.session_changes()));
        let objects = Arc::new(RestObjectStore::new(rest).with_session(auth.session_changes()));

        let reconciler =
            Reconciler::new(items, config.site.slug.clone(), config.reconciler.clone());
        Ok(Self::new(reconciler, objects, auth))
    }
}

impl<S, O, A> AdminPanel<S, O, A>
where
    S: ItemStore + ?Sized + 'static,
    O: ObjectStore + ?Sized,
    A: Authenticator + ?Sized,
{
    /// Assemble a panel from its collaborators.
    pub fn new(reconciler: Reconciler<S>, objects: Arc<O>, auth: Arc<A>) -> Self {
        let policy = RemotePolicy::from_config(reconciler.config());
        Self {
            reconciler,
            objects,
            auth,
            policy,
        }
    }

    /// Underlying reconciler.
    pub fn reconciler(&self) -> &Reconciler<S> {
        &self.reconciler
    }

    /// Ask for a login link to be emailed.
    #[instrument(skip(self))]
    pub async fn request_login(&self, email: &str) -> VitrineResult<()> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(
                ValidationError::new(ValidationErrorKind::InvalidEmail(email.to_string())).into(),
            );
        }

        self.policy
            .once("request_login", self.auth.request_passwordless_login(email))
            .await?;
        info!("Login link sent");
        Ok(())
    }

    /// Finish sign-in from the login link's URL fragment and load the items.
    #[instrument(skip(self, fragment))]
    pub async fn complete_login(&self, fragment: &str) -> VitrineResult<Session> {
        let tokens = SessionTokens::from_fragment(fragment)?;
        let session = self
            .policy
            .once("establish_session", self.auth.establish_session(&tokens))
            .await?;
        self.reconciler.load().await?;
        info!(user = %session.user.id, "Signed in");
        Ok(session)
    }

    /// Current session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.auth.current_session()
    }

    /// Observe sign-in and sign-out.
    pub fn session_changes(&self) -> watch::Receiver<Option<Session>> {
        self.auth.session_changes()
    }

    /// Current session or `NotSignedIn`.
    pub fn require_session(&self) -> VitrineResult<Session> {
        self.auth
            .current_session()
            .ok_or_else(|| AuthError::new(AuthErrorKind::NotSignedIn).into())
    }

    /// Reload every item for the site.
    pub async fn load(&self) -> VitrineResult<Vec<Item>> {
        self.require_session()?;
        self.reconciler.load().await
    }

    /// Items in display order with their sync state.
    pub async fn entries(&self) -> Vec<Entry> {
        self.reconciler.entries().await
    }

    /// Upload the form's files and create the item.
    ///
    /// The title is checked before anything is uploaded.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub async fn create(&self, form: ItemForm) -> VitrineResult<Item> {
        self.require_session()?;

        let mut draft = form.draft();
        draft.validate()?;

        let image_url = match &form.image {
            Some(upload) => Some(self.upload(upload).await?),
            None => None,
        };
        let audio_url = match &form.audio {
            Some(upload) => Some(self.upload(upload).await?),
            None => None,
        };
        draft.media = form.media(image_url, audio_url);

        self.reconciler.create(draft).await
    }

    /// Patch an item.
    pub async fn update(&self, id: &ItemId, patch: ItemPatch) -> VitrineResult<()> {
        self.require_session()?;
        self.reconciler.update(id, patch).await
    }

    /// Delete an item.
    pub async fn delete(&self, id: &ItemId) -> VitrineResult<()> {
        self.require_session()?;
        self.reconciler.delete(id).await
    }

    /// Drag an item to a new position and wait for its persistence.
    pub async fn reorder(&self, from: usize, to: usize) -> VitrineResult<ReorderOutcome> {
        self.require_session()?;
        let outcome = self.reconciler.reorder(from, to).await?;
        if let Some(warning) = outcome.warning() {
            warn!(%warning, "Reorder not fully saved");
        }
        Ok(outcome)
    }

    /// End the session.
    pub async fn sign_out(&self) -> VitrineResult<()> {
        self.auth.sign_out().await
    }

    async fn upload(&self, upload: &Upload) -> VitrineResult<String> {
        let name = object_name(self.reconciler.clock().next_millis(), &upload.filename);
        self.policy
            .once(
                "upload",
                self.objects.upload(&name, &upload.bytes, &upload.content_type),
            )
            .await?;
        Ok(self.objects.public_url(&name))
    }
}
