//! Generic action controller.

use std::{fmt, marker::PhantomData, sync::Arc};

use tracing::debug;

use crate::{
    actions::{ActionError, Resource, ResourceStore},
    auth::{Claims, RequestContext},
    policy::{Permission, PolicyEngine, Scope},
};

/// Runs Query/Find/Create/Update/Destroy for one resource type.
///
/// Create, Update and Destroy check permission before anything else and fail
/// with [`ActionError::PermissionDenied`]. Find reports a denial as
/// [`ActionError::NotFound`] so existence is never revealed to callers who
/// cannot read the record.
pub struct ActionController<R, S: ?Sized> {
    store: Arc<S>,
    policy: PolicyEngine,
    resource: PhantomData<fn() -> R>,
}

impl<R, S: ?Sized> Clone for ActionController<R, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            policy: self.policy,
            resource: PhantomData,
        }
    }
}

impl<R: Resource, S: ?Sized> fmt::Debug for ActionController<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionController")
            .field("resource_type", &R::RESOURCE_TYPE)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<R, S> ActionController<R, S>
where
    R: Resource,
    S: ResourceStore<R> + ?Sized,
{
    /// Controller over `store` with the default policy engine.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, PolicyEngine::new())
    }

    /// Controller over `store` evaluating rules with `policy`.
    #[must_use]
    pub fn with_policy(store: Arc<S>, policy: PolicyEngine) -> Self {
        Self {
            store,
            policy,
            resource: PhantomData,
        }
    }

    /// Every record the caller may read.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Internal`] if listing fails.
    pub async fn query(&self, ctx: &RequestContext) -> Result<Vec<R>, ActionError> {
        let records = ctx.run(self.store.list(ctx)).await?;

        Ok(records
            .into_iter()
            .filter(|record| self.allowed(ctx, Permission::Read, &record.scope(ctx)))
            .collect())
    }

    /// The record named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotFound`] when `name` is empty, the record is
    /// absent, or the caller may not read it.
    pub async fn find(&self, ctx: &RequestContext, name: &str) -> Result<R, ActionError> {
        if name.is_empty() {
            return Err(ActionError::NotFound);
        }

        if !self.allowed(ctx, Permission::Read, &R::scope_for(name, ctx)) {
            return Err(ActionError::NotFound);
        }

        ctx.run(self.store.get_by_name(ctx, name))
            .await?
            .ok_or(ActionError::NotFound)
    }

    /// Persist a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::PermissionDenied`], then
    /// [`ActionError::InvalidArgument`], then [`ActionError::AlreadyExists`],
    /// in that order of precedence. Store failures are
    /// [`ActionError::Internal`].
    pub async fn create(&self, ctx: &RequestContext, record: R) -> Result<(), ActionError> {
        self.authorize(ctx, Permission::Create, &record.scope(ctx))?;

        record.validate()?;

        if ctx
            .run(self.store.get_by_name(ctx, record.name()))
            .await?
            .is_some()
        {
            return Err(ActionError::AlreadyExists);
        }

        ctx.run(self.store.update(ctx, &record)).await?;

        debug!(
            resource_type = R::RESOURCE_TYPE,
            name = record.name(),
            "created"
        );

        Ok(())
    }

    /// Replace an existing record.
    ///
    /// The incoming record is validated before the store is consulted, so an
    /// invalid record is refused whether or not it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::PermissionDenied`], then
    /// [`ActionError::InvalidArgument`], then [`ActionError::NotFound`].
    /// Store failures are [`ActionError::Internal`].
    pub async fn update(&self, ctx: &RequestContext, record: R) -> Result<(), ActionError> {
        self.authorize(ctx, Permission::Update, &record.scope(ctx))?;

        record.validate()?;

        ctx.run(self.store.get_by_name(ctx, record.name()))
            .await?
            .ok_or(ActionError::NotFound)?;

        ctx.run(self.store.update(ctx, &record)).await?;

        debug!(
            resource_type = R::RESOURCE_TYPE,
            name = record.name(),
            "updated"
        );

        Ok(())
    }

    /// Delete the record named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::PermissionDenied`], then
    /// [`ActionError::NotFound`]. Store failures are
    /// [`ActionError::Internal`].
    pub async fn destroy(&self, ctx: &RequestContext, name: &str) -> Result<(), ActionError> {
        self.authorize(ctx, Permission::Delete, &R::scope_for(name, ctx))?;

        ctx.run(self.store.get_by_name(ctx, name))
            .await?
            .ok_or(ActionError::NotFound)?;

        ctx.run(self.store.delete_by_name(ctx, name)).await?;

        debug!(resource_type = R::RESOURCE_TYPE, name, "destroyed");

        Ok(())
    }

    fn allowed(&self, ctx: &RequestContext, permission: Permission, scope: &Scope) -> bool {
        // Unauthenticated requests never match a rule.
        ctx.claims().is_some()
            && self
                .policy
                .evaluate(ctx.rules(), R::RESOURCE_TYPE, permission, scope)
    }

    fn authorize(
        &self,
        ctx: &RequestContext,
        permission: Permission,
        scope: &Scope,
    ) -> Result<(), ActionError> {
        if self.allowed(ctx, permission, scope) {
            Ok(())
        } else {
            debug!(
                resource_type = R::RESOURCE_TYPE,
                %permission,
                subject = ctx.claims().map_or("", Claims::subject),
                "permission denied"
            );

            Err(ActionError::PermissionDenied)
        }
    }
}
