use serde_json::Value;
use tracing::{debug, instrument};

use brush_client::{Error, ErrorKind, Result, Transport};

use crate::collection::malformed;
use crate::object::{Attributes, Record};

impl<T: Record, X: Transport> super::ResourceBinding<T, X> {
    /// Persist `record`: PATCH when it has an id, POST to the collection
    /// otherwise. Attributes and id are replaced with the response.
    ///
    /// An empty response body leaves the local state as sent.
    #[instrument(skip(self, record))]
    pub async fn save(&self, record: &mut T) -> Result<()> {
        let object = record.remote();
        let attributes = object.attributes()?;

        let request = match object.id() {
            Some(id) => self.requests.patch(self.config.object_url(id), attributes)?,
            None => self.requests.post(self.config.collection_url(), attributes)?,
        };

        let (status, value) = self.exchange(request).await?;
        match value {
            Value::Object(attributes) => record.remote_mut().hydrate(attributes),
            Value::Null => {}
            _ => return Err(malformed(status, "expected an object")),
        }

        debug!(id = ?record.remote().id(), "Saved");
        Ok(())
    }

    /// Merge `attributes` into `record` and save it.
    pub async fn update_record(&self, record: &mut T, attributes: Attributes) -> Result<()> {
        record.remote_mut().merge(attributes)?;
        self.save(record).await
    }

    /// Delete `record` remotely. On success the local object is cleared and
    /// every later read or write fails with [`ErrorKind::Destroyed`].
    #[instrument(skip(self, record))]
    pub async fn destroy(&self, record: &mut T) -> Result<()> {
        let object = record.remote();
        if object.is_destroyed() {
            return Err(Error::new(ErrorKind::Destroyed));
        }
        let id = object.id().ok_or_else(|| {
            Error::invalid_argument("cannot destroy an object that was never saved")
        })?;

        let request = self.requests.delete(self.config.object_url(id));
        let status = self.exchange_status(request).await?;

        record.remote_mut().mark_destroyed();
        debug!(status, "Destroyed");
        Ok(())
    }

    /// Alias for [`destroy`](Self::destroy).
    pub async fn delete(&self, record: &mut T) -> Result<()> {
        self.destroy(record).await
    }
}
