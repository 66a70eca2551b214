use serde_json::Value;
use tracing::instrument;

use brush_client::{Error, ErrorKind, Result, Transport};

use crate::collection::Collection;
use crate::object::{Record, ResourceId};
use crate::query_builder::{Condition, Params, QueryBuilder};

impl<T: Record, X: Transport> super::ResourceBinding<T, X> {
    /// Fetch one object by id.
    #[instrument(skip(self, id))]
    pub async fn find(&self, id: impl Into<ResourceId>) -> Result<T> {
        let id = id.into();
        let url = self.config.object_url(&id);
        self.fetch_one(self.requests.get(url)).await
    }

    /// Re-fetch `record` in place. New objects are left untouched.
    #[instrument(skip(self, record))]
    pub async fn reload(&self, record: &mut T) -> Result<()> {
        let object = record.remote();
        if object.is_destroyed() {
            return Err(Error::new(ErrorKind::Destroyed));
        }
        let Some(id) = object.id().cloned() else {
            return Ok(());
        };

        let url = self.config.object_url(&id);
        let attributes = self.fetch_attributes(self.requests.get(url)).await?;
        record.remote_mut().hydrate(attributes);
        Ok(())
    }

    /// Every object in the collection, unpaginated.
    #[instrument(skip(self, params))]
    pub async fn all(&self, params: impl Into<Params>) -> Result<Collection<T>> {
        self.filter(Condition::None, params).await
    }

    /// Objects matching `condition`, unpaginated.
    ///
    /// A string condition is appended verbatim; field/value pairs become
    /// `q={"<field>_eq":"<value>",...}`.
    #[instrument(skip(self, condition, params))]
    pub async fn filter(
        &self,
        condition: impl Into<Condition>,
        params: impl Into<Params>,
    ) -> Result<Collection<T>> {
        let query = QueryBuilder::new()
            .condition(condition)
            .params(params)
            .includes(self.config.includes().iter().cloned())
            .build();
        let url = format!("{}{}", self.config.collection_url(), query);

        self.fetch_many(self.requests.get(url)).await
    }

    /// First object matching `condition`, if any.
    pub async fn find_by(&self, condition: impl Into<Condition>) -> Result<Option<T>> {
        let collection = self.filter(condition, Params::new()).await?;
        Ok(collection.into_iter().next())
    }

    /// First object matching `condition`, or a not-found error.
    pub async fn find_by_or_fail(&self, condition: impl Into<Condition>) -> Result<T> {
        let condition = condition.into();
        let described = format!("{:?}", condition);

        self.find_by(condition).await?.ok_or_else(|| {
            Error::new(ErrorKind::NotFound(format!(
                "no {} matches {}",
                self.requests.envelope(),
                described
            )))
        })
    }

    /// First object matching every attribute in `attributes`, created with
    /// those attributes when nothing matches.
    #[instrument(skip(self, attributes))]
    pub async fn find_or_create_by(&self, attributes: Value) -> Result<T> {
        let Value::Object(attributes) = attributes else {
            return Err(Error::invalid_argument("pass attributes as a mapping"));
        };

        if let Some(found) = self.find_by(attributes.clone()).await? {
            return Ok(found);
        }
        self.create(attributes).await
    }
}
