//! Lost & found items

use serde::Deserialize;
use url::Url;
use unifind_domain::{
    ApiRequest, RequestBody,
    resources::{ClaimReceipt, ClaimSubmission, LostItem, LostItemUpdate, NewLostItem},
};

use super::segment;
use crate::auth::AuthenticatedClient;
use crate::error::ApplicationResult;
use crate::ports::HttpTransport;

/// Access to `/lost`.
///
/// Listing, reading and claiming are public and go through the plain
/// pipeline; registering, editing and deleting need a session.
pub struct LostItemsApi<T: HttpTransport> {
    authed: AuthenticatedClient<T>,
}

#[derive(Deserialize)]
#[serde(transparent)]
struct ItemList(Option<Vec<LostItem>>);

impl<T: HttpTransport> LostItemsApi<T> {
    /// Creates the client.
    #[must_use]
    pub const fn new(authed: AuthenticatedClient<T>) -> Self {
        Self { authed }
    }

    /// Lists items, optionally filtered by a search text.
    ///
    /// # Errors
    ///
    /// Returns any pipeline error.
    pub async fn list(&self, query: Option<&str>) -> ApplicationResult<Vec<LostItem>> {
        let mut request = ApiRequest::get("/lost");
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            request = request.with_query("q", q);
        }
        let ItemList(items) = self.authed.auth().client().send_json(request).await?;
        Ok(items.unwrap_or_default())
    }

    /// Reads one item.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an unusable id, otherwise any pipeline error.
    pub async fn get(&self, id: &str) -> ApplicationResult<LostItem> {
        let path = format!("/lost/{}", segment(id)?);
        self.authed.auth().client().send_json(ApiRequest::get(path)).await
    }

    /// Returns the address of the item's photo.
    ///
    /// # Errors
    ///
    /// Returns `Domain` for an unusable id or base address.
    pub fn image_url(&self, id: &str) -> ApplicationResult<Url> {
        let request = ApiRequest::get(format!("/lost/{}/image", segment(id)?));
        Ok(request.url(self.authed.auth().client().base_url())?)
    }

    /// Files a claim with evidence. No session needed.
    ///
    /// # Errors
    ///
    /// Returns `Domain` if the submission is invalid (nothing is sent),
    /// otherwise any pipeline error.
    pub async fn claim(
        &self,
        id: &str,
        submission: ClaimSubmission,
    ) -> ApplicationResult<ClaimReceipt> {
        submission.validate()?;
        let path = format!("/lost/{}/claim", segment(id)?);
        let request = ApiRequest::post(path).with_body(RequestBody::Multipart(submission.into_form()));
        self.authed.auth().client().send_json(request).await
    }

    /// Registers a found item.
    ///
    /// # Errors
    ///
    /// Returns `Domain` if the payload is invalid, otherwise any facade error.
    pub async fn create(&self, item: &NewLostItem) -> ApplicationResult<LostItem> {
        item.validate()?;
        self.authed.post("/lost", item).await
    }

    /// Edits an item.
    ///
    /// # Errors
    ///
    /// Returns `Domain` if the payload is invalid, otherwise any facade error.
    pub async fn update(&self, id: &str, update: &LostItemUpdate) -> ApplicationResult<LostItem> {
        update.validate()?;
        self.authed.put(&format!("/lost/{}", segment(id)?), update).await
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns any facade error.
    pub async fn delete(&self, id: &str) -> ApplicationResult<()> {
        self.authed.delete(&format!("/lost/{}", segment(id)?)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, item_json};
    use crate::error::ApplicationError;
    use pretty_assertions::assert_eq;
    use unifind_domain::request::{FilePart, FormPart};

    fn submission(notes: &str, files: usize) -> ClaimSubmission {
        ClaimSubmission {
            notes: notes.to_string(),
            evidences: (0..files)
                .map(|i| FilePart::new(format!("foto{i}.jpg"), "image/jpeg", vec![0xFF, 0xD8]))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_list_sends_trimmed_query_without_token() {
        let fixture = Fixture::logged_in().await;
        fixture
            .transport
            .respond_json(200, &format!("[{}]", item_json("a1")));
        let api = LostItemsApi::new(fixture.facade());

        let items = api.list(Some("  llaves ")).await.unwrap();

        assert_eq!(items.len(), 1);
        let sent = fixture.transport.requests();
        assert_eq!(sent[0].request.query, vec![("q".to_string(), "llaves".to_string())]);
        assert_eq!(sent[0].authorization(), None);
    }

    #[tokio::test]
    async fn test_list_null_is_empty() {
        let fixture = Fixture::anonymous().await;
        fixture.transport.respond_json(200, "null");
        let api = LostItemsApi::new(fixture.facade());

        assert!(api.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_claim_is_public_multipart() {
        let fixture = Fixture::anonymous().await;
        fixture.transport.respond_json(
            200,
            r#"{"message":"Reclamo enviado","claim_id":"c9","status":"claimed"}"#,
        );
        let api = LostItemsApi::new(fixture.facade());

        let receipt = api.claim("a1", submission("Es mío", 2)).await.unwrap();

        assert_eq!(receipt.claim_id, "c9");
        let sent = fixture.transport.requests();
        assert_eq!(sent[0].url, "http://api.test/lost/a1/claim");
        let RequestBody::Multipart(form) = &sent[0].request.body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.parts().len(), 3);
        assert!(matches!(&form.parts()[2], FormPart::Text { name, .. } if name == "notes"));
    }

    #[tokio::test]
    async fn test_invalid_claim_is_not_sent() {
        let fixture = Fixture::anonymous().await;
        let api = LostItemsApi::new(fixture.facade());

        let err = api.claim("a1", submission("Es mío", 0)).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Domain(_)));
        assert!(fixture.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_session() {
        let fixture = Fixture::anonymous().await;
        let api = LostItemsApi::new(fixture.facade());
        let item = NewLostItem {
            title: "Paraguas".to_string(),
            found_location: "Aula 3".to_string(),
            description: None,
            contact_info: None,
        };

        let err = api.create(&item).await.unwrap_err();

        assert!(matches!(err, ApplicationError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_delete_sends_token() {
        let fixture = Fixture::logged_in().await;
        fixture.transport.respond_json(200, r#"{"message":"ok"}"#);
        let api = LostItemsApi::new(fixture.facade());

        api.delete("a1").await.unwrap();

        let sent = fixture.transport.requests();
        assert_eq!(sent[0].request.method, unifind_domain::HttpMethod::Delete);
        assert!(sent[0].authorization().is_some());
    }

    #[tokio::test]
    async fn test_image_url() {
        let fixture = Fixture::anonymous().await;
        let api = LostItemsApi::new(fixture.facade());
        assert_eq!(
            api.image_url("a1").unwrap().as_str(),
            "http://api.test/lost/a1/image"
        );
    }
}
