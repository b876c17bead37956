//! Product catalogue endpoints.

use nearsplit_session::{Result, SessionTransport};
use serde::{Deserialize, Serialize};

use crate::page::Page;

/// Payload for creating or updating a product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    /// Id at the external source, if imported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Where the product was imported from, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source: Option<String>,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Link to the product page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    /// Image URL, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Free-form description, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A product as served by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Product id.
    pub product_id: i64,
    /// Id at the external source, if imported.
    pub external_id: Option<String>,
    /// Where the product was imported from, if anywhere.
    pub external_source: Option<String>,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Link to the product page, if any.
    pub product_url: Option<String>,
    /// Image URL, if any.
    pub image_url: Option<String>,
    /// Free-form description, if any.
    pub description: Option<String>,
}

/// `/products` endpoints.
pub struct ProductsApi<'a> {
    transport: &'a SessionTransport,
}

impl<'a> ProductsApi<'a> {
    pub(crate) fn new(transport: &'a SessionTransport) -> Self {
        Self { transport }
    }

    /// List products, paged, newest first.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn list(&self, page: u32, size: u32) -> Result<Page<ProductResponse>> {
        self.transport
            .get(&format!("/products?page={page}&size={size}&sortBy=createdAt&direction=DESC"))
            .await
    }

    /// Search products by keyword, paged.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn search(
        &self,
        keyword: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<ProductResponse>> {
        let keyword = urlencoding::encode(keyword);
        self.transport
            .get(&format!("/products/search?keyword={keyword}&page={page}&size={size}"))
            .await
    }

    /// Fetch one product.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn get(&self, product_id: i64) -> Result<ProductResponse> {
        self.transport.get(&format!("/products/{product_id}")).await
    }

    /// Create a product.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn create(&self, request: &ProductRequest) -> Result<ProductResponse> {
        self.transport.post("/products", request).await
    }

    /// Update a product.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn update(
        &self,
        product_id: i64,
        request: &ProductRequest,
    ) -> Result<ProductResponse> {
        self.transport.patch(&format!("/products/{product_id}"), request).await
    }

    /// Delete a product.
    ///
    /// # Errors
    /// Any transport error.
    pub async fn delete(&self, product_id: i64) -> Result<()> {
        self.transport.delete(&format!("/products/{product_id}")).await
    }
}
