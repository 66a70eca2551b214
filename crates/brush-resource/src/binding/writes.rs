use serde_json::Value;
use tracing::{debug, instrument};

use brush_client::{Error, Result, Transport};

use crate::collection::{Hydrated, Payload};
use crate::object::{Attributes, Record, ResourceId, ID_KEY};

const BATCH_CREATE: &str = "batch_create";
const BATCH_UPDATE: &str = "batch_update";

impl<T: Record, X: Transport> super::ResourceBinding<T, X> {
    /// Create one object from `attributes`.
    #[instrument(skip(self, attributes))]
    pub async fn create(&self, attributes: Attributes) -> Result<T> {
        let request = self.requests.post(self.config.collection_url(), &attributes)?;
        self.fetch_one(request).await
    }

    /// Create several objects with a single request to the batch endpoint.
    ///
    /// Objects come back in response order.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn batch_create(&self, items: Vec<Attributes>) -> Result<Vec<T>> {
        let request = self.requests.post(self.config.batch_url(BATCH_CREATE), &items)?;
        let created = self.fetch_many(request).await?.into_entries();

        debug!(created = created.len(), "Batch create completed");
        Ok(created)
    }

    /// Create from a JSON value: a mapping creates one object, an array of
    /// mappings goes through the batch endpoint.
    pub async fn create_from(&self, value: Value) -> Result<Hydrated<T>> {
        match Payload::try_from(value)? {
            Payload::One(attributes) => self.create(attributes).await.map(Hydrated::One),
            Payload::Many(items) => self.batch_create(items).await.map(Hydrated::Many),
        }
    }

    /// Fetch the object named by `attributes["id"]`, merge `attributes` into
    /// it and save.
    #[instrument(skip(self, attributes))]
    pub async fn update(&self, attributes: Attributes) -> Result<T> {
        let id = attributes
            .get(ID_KEY)
            .and_then(ResourceId::from_value)
            .ok_or_else(|| Error::invalid_argument("update needs an `id` attribute"))?;

        let mut record = self.find(id).await?;
        self.update_record(&mut record, attributes).await?;
        Ok(record)
    }

    /// Update several objects with a single request to the batch endpoint.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn batch_update(&self, items: Vec<Attributes>) -> Result<Vec<T>> {
        let request = self.requests.patch(self.config.batch_url(BATCH_UPDATE), &items)?;
        let updated = self.fetch_many(request).await?.into_entries();

        debug!(updated = updated.len(), "Batch update completed");
        Ok(updated)
    }

    /// Update from a JSON value, dispatching like [`create_from`](Self::create_from).
    pub async fn update_from(&self, value: Value) -> Result<Hydrated<T>> {
        match Payload::try_from(value)? {
            Payload::One(attributes) => self.update(attributes).await.map(Hydrated::One),
            Payload::Many(items) => self.batch_update(items).await.map(Hydrated::Many),
        }
    }
}
