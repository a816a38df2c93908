//! Ephemeral remote resources for contract tests.
//!
//! A fixture creates one entity on the store, hands its handle to the test
//! body and deletes it afterwards, whatever the body did. Two shapes are
//! provided:
//!
//! - [`ResourceGuard`] for synchronous tests driving a tokio [`Runtime`]:
//!   teardown happens on `Drop`, so it also runs while a failed assertion
//!   unwinds.
//! - [`with_resource`] for async tests: the body runs as its own task and a
//!   panic inside it is re-raised only after teardown.
//!
//! Teardown is best effort. Its outcome is logged and returned as a
//! [`Teardown`], never raised.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use crate::client::{ApiResponse, PetstoreClient};
use crate::error::ContractError;
use crate::model::{Pet, User};

/// A kind of store entity that a fixture can create and delete.
#[async_trait]
pub trait EphemeralResource {
    const KIND: &'static str;

    type Descriptor: Send + Sync;
    type Handle: Clone + fmt::Display + Send + Sync + 'static;

    // anything but 200 is an error
    async fn create(
        client: &PetstoreClient,
        descriptor: &Self::Descriptor,
    ) -> Result<Self::Handle, ContractError>;

    async fn delete(
        client: &PetstoreClient,
        handle: &Self::Handle,
    ) -> Result<ApiResponse, ContractError>;
}

pub struct PetResource;

#[derive(Deserialize)]
struct CreatedPet {
    id: i64,
}

#[async_trait]
impl EphemeralResource for PetResource {
    const KIND: &'static str = "pet";

    type Descriptor = Pet;
    type Handle = i64;

    async fn create(client: &PetstoreClient, pet: &Pet) -> Result<i64, ContractError> {
        let created: CreatedPet = client.create_pet(pet).await?.expect_status(200)?.json()?;
        Ok(created.id)
    }

    async fn delete(client: &PetstoreClient, id: &i64) -> Result<ApiResponse, ContractError> {
        client.delete_pet(*id).await
    }
}

pub struct UserResource;

#[async_trait]
impl EphemeralResource for UserResource {
    const KIND: &'static str = "user";

    type Descriptor = User;
    type Handle = String;

    // The store answers with a generic message, the username is ours.
    async fn create(client: &PetstoreClient, user: &User) -> Result<String, ContractError> {
        client.create_user(user).await?.expect_status(200)?;
        Ok(user.username.clone())
    }

    async fn delete(
        client: &PetstoreClient,
        username: &String,
    ) -> Result<ApiResponse, ContractError> {
        client.delete_user(username).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureState {
    // before create succeeds; no guard exists in this state
    Uncreated,
    Created,
    Deleting,
    Deleted,
}

/// What the delete call at the end of a fixture's life amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Teardown {
    Deleted { status: u16 },
    AlreadyGone,
    Failed(String),
}

async fn teardown<R: EphemeralResource>(client: &PetstoreClient, handle: &R::Handle) -> Teardown {
    match R::delete(client, handle).await {
        Ok(resp) if resp.is_success() => {
            info!(kind = R::KIND, %handle, status = resp.status, "fixture resource deleted");
            Teardown::Deleted {
                status: resp.status,
            }
        }
        Ok(resp) if resp.status == 404 => {
            debug!(kind = R::KIND, %handle, "fixture resource already gone");
            Teardown::AlreadyGone
        }
        Ok(resp) => {
            let reason = format!("delete returned {}: {}", resp.status, resp.body);
            warn!(kind = R::KIND, %handle, %reason, "failed to clean up fixture resource");
            Teardown::Failed(reason)
        }
        Err(err) => {
            warn!(kind = R::KIND, %handle, error = %err, "failed to clean up fixture resource");
            Teardown::Failed(err.to_string())
        }
    }
}

// Runs `run` on the calling thread, or on a scoped thread when the caller is
// already inside a runtime, where `block_on` would panic. The second case
// needs a multi-thread runtime.
fn block_on_outside_async<'rt, T, F>(rt: &'rt Runtime, run: F) -> std::thread::Result<T>
where
    T: Send,
    F: FnOnce(&'rt Runtime) -> T + Send,
{
    if tokio::runtime::Handle::try_current().is_err() {
        return Ok(run(rt));
    }
    std::thread::scope(|s| s.spawn(move || run(rt)).join())
}

/// Owns one created entity for the duration of a synchronous test.
pub struct ResourceGuard<'rt, R: EphemeralResource> {
    rt: &'rt Runtime,
    client: PetstoreClient,
    handle: R::Handle,
    state: FixtureState,
}

impl<'rt, R: EphemeralResource> ResourceGuard<'rt, R> {
    pub fn acquire(
        rt: &'rt Runtime,
        client: &PetstoreClient,
        descriptor: &R::Descriptor,
    ) -> Result<Self, ContractError> {
        let created = block_on_outside_async(rt, |rt| rt.block_on(R::create(client, descriptor)));
        let handle = match created {
            Ok(created) => created?,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        info!(kind = R::KIND, %handle, "fixture resource created");

        Ok(ResourceGuard {
            rt,
            client: client.clone(),
            handle,
            state: FixtureState::Created,
        })
    }

    pub fn handle(&self) -> &R::Handle {
        &self.handle
    }

    pub fn state(&self) -> FixtureState {
        self.state
    }

    /// Deletes the entity now instead of on drop.
    pub fn release(mut self) -> Teardown {
        self.teardown()
    }

    fn teardown(&mut self) -> Teardown {
        self.state = FixtureState::Deleting;
        let (client, handle) = (&self.client, &self.handle);
        let outcome =
            block_on_outside_async(self.rt, |rt| rt.block_on(teardown::<R>(client, handle)))
                .unwrap_or_else(|_| {
                    let reason = "teardown thread panicked".to_string();
                    warn!(kind = R::KIND, %handle, %reason, "failed to clean up fixture resource");
                    Teardown::Failed(reason)
                });
        self.state = FixtureState::Deleted;
        outcome
    }
}

impl<R: EphemeralResource> Drop for ResourceGuard<'_, R> {
    fn drop(&mut self) {
        if self.state == FixtureState::Created {
            self.teardown();
        }
    }
}

/// Creates an entity, runs `body` with its handle and deletes it again.
///
/// Setup failures are returned before `body` runs. A panic in `body` is
/// resumed after teardown, so the test still fails with its own message.
pub async fn with_resource<R, F, Fut, T>(
    client: &PetstoreClient,
    descriptor: &R::Descriptor,
    body: F,
) -> Result<(T, Teardown), ContractError>
where
    R: EphemeralResource,
    F: FnOnce(PetstoreClient, R::Handle) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handle = R::create(client, descriptor).await?;
    info!(kind = R::KIND, %handle, "fixture resource created");

    let outcome = tokio::spawn(body(client.clone(), handle.clone())).await;
    let cleanup = teardown::<R>(client, &handle).await;

    match outcome {
        Ok(value) => Ok((value, cleanup)),
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(_) => Err(ContractError::Cancelled { kind: R::KIND }),
    }
}
