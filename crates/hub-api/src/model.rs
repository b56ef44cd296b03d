//! Wire models returned by the hub server

use hub_routing::Named;
use serde::{Deserialize, Serialize};

/// Server information; the schema belongs to the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerInfo(pub serde_json::Value);

impl ServerInfo {
    /// Top-level field, if the payload is an object
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name)
    }
}

/// Project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project name, used in routes
    pub name: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// SUNAT account used to send the project's documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunat_username: Option<String>,
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    /// Server-assigned id; absent on namespaces not yet created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Unique namespace name
    pub name: String,
    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Namespace {
    /// Server-assigned id, the key routes and the namespace selection use
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Named for Namespace {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Company logo as base64 PNG; `None` when the company has no logo
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyLogo(pub Option<String>);

impl CompanyLogo {
    /// Logo from a raw response body; blank means no logo
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let body = body.trim();
        Self((!body.is_empty()).then(|| body.to_string()))
    }

    /// `data:` URI ready for an `img` element
    #[must_use]
    pub fn data_uri(&self) -> Option<String> {
        self.0
            .as_ref()
            .map(|base64| format!("data:image/png;base64,{base64}"))
    }
}

/// Parsed identity of a UBL file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// Issuer's RUC
    pub ruc: String,
    /// Series and number, e.g. `F001-1`
    #[serde(rename = "documentID")]
    pub document_id: String,
    /// UBL document type, e.g. `Invoice`
    pub document_type: String,
}

/// Answer from the tax authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunatStatus {
    /// Response code
    pub code: String,
    /// Status label, e.g. `ACEPTADO`
    pub status: String,
    /// Human readable description
    pub description: String,
    /// Ticket of an asynchronous submission
    #[serde(default)]
    pub ticket: Option<String>,
    /// Whether a CDR (proof of receipt) was returned
    #[serde(default)]
    pub has_cdr: bool,
}

/// UBL document as listed on the documents page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UblDocument {
    /// Server-assigned id
    #[serde(default)]
    pub id: Option<String>,
    /// Creation time, epoch millis
    pub created_on: i64,
    /// Still being processed by the server
    pub in_progress: bool,
    /// Last processing error
    #[serde(default)]
    pub error: Option<String>,
    /// Sending attempts so far
    #[serde(default)]
    pub retry_count: u32,
    /// Identity parsed from the UBL file
    #[serde(default)]
    pub file_content: Option<FileContent>,
    /// Answer from SUNAT, once sent
    #[serde(default)]
    pub sunat: Option<SunatStatus>,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Items of this page
    pub data: Vec<T>,
    /// Total items across pages
    pub total: u64,
}

impl<T> PageResult<T> {
    /// Whether any item matches `f`
    pub fn any(&self, f: impl FnMut(&T) -> bool) -> bool {
        self.data.iter().any(f)
    }
}

impl PageResult<UblDocument> {
    /// Whether the server is still processing some document on this page
    #[must_use]
    pub fn has_in_progress(&self) -> bool {
        self.any(|document| document.in_progress)
    }
}
