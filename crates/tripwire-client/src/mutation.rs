use std::sync::Arc;

use async_trait::async_trait;
use tripwire_config::{Trigger, TriggerDocument};
use uuid::Uuid;

use crate::error::ClientError;

/// Performs the create and update calls for trigger documents.
///
/// Documents passed in have already been validated; implementations only
/// move them over the wire and hand back the server's record.
#[async_trait]
pub trait MutationClient: Send + Sync {
  /// Create a trigger owned by `organization_id`.
  async fn create(
    &self,
    organization_id: Uuid,
    document: &TriggerDocument,
  ) -> Result<Trigger, ClientError>;

  /// Replace the editable fields of an existing trigger.
  async fn update(
    &self,
    trigger_id: Uuid,
    document: &TriggerDocument,
  ) -> Result<Trigger, ClientError>;
}

#[async_trait]
impl<T: MutationClient + ?Sized> MutationClient for Arc<T> {
  async fn create(
    &self,
    organization_id: Uuid,
    document: &TriggerDocument,
  ) -> Result<Trigger, ClientError> {
    (**self).create(organization_id, document).await
  }

  async fn update(
    &self,
    trigger_id: Uuid,
    document: &TriggerDocument,
  ) -> Result<Trigger, ClientError> {
    (**self).update(trigger_id, document).await
  }
}
