use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// Users & Roles
// ============================================================================

/// Account role, as issued by the server on login/registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hr,
    Employee,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Hr => write!(f, "hr"),
            Role::Employee => write!(f, "employee"),
        }
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hr" => Ok(Role::Hr),
            "employee" => Ok(Role::Employee),
            _ => Err(ParseEnumError::new("role", s, "hr, employee")),
        }
    }
}

/// The authenticated identity returned by `/users/me`, `/users/login`,
/// `/users/register` and `/users/profile`.
///
/// Company and package fields are only populated for HR accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_employees: Option<u32>,
}

impl User {
    pub fn is_hr(&self) -> bool {
        self.role == Role::Hr
    }
}

/// Registration payload for `/users/register`.
///
/// `company_name`/`company_logo` are required for HR registrations and must
/// be absent for employees; the forms enforce this before submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

/// Partial profile update for `PUT /users/profile`. Only set fields are sent;
/// the server returns the merged identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.profile_image.is_none() && self.company_logo.is_none()
    }
}

// ============================================================================
// Assets
// ============================================================================

/// Whether an asset comes back after assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetType {
    Returnable,
    #[serde(rename = "Non-returnable")]
    NonReturnable,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Returnable => write!(f, "Returnable"),
            AssetType::NonReturnable => write!(f, "Non-returnable"),
        }
    }
}

impl FromStr for AssetType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "returnable" => Ok(AssetType::Returnable),
            "non-returnable" | "nonreturnable" => Ok(AssetType::NonReturnable),
            _ => Err(ParseEnumError::new(
                "asset type",
                s,
                "Returnable, Non-returnable",
            )),
        }
    }
}

/// An inventory item owned by an HR manager's company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub quantity: u32,
    pub available_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Asset {
    pub fn in_stock(&self) -> bool {
        self.available_quantity > 0
    }
}

/// Payload for the add-asset form (`POST /assets`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub quantity: u32,
    pub image: String,
}

// ============================================================================
// Requests
// ============================================================================

/// What the employee is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Request,
    Return,
    Repair,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Request => write!(f, "Request"),
            RequestKind::Return => write!(f, "Return"),
            RequestKind::Repair => write!(f, "Repair"),
        }
    }
}

impl FromStr for RequestKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "request" => Ok(RequestKind::Request),
            "return" => Ok(RequestKind::Return),
            "repair" => Ok(RequestKind::Repair),
            _ => Err(ParseEnumError::new("request kind", s, "Request, Return, Repair")),
        }
    }
}

/// Lifecycle state of a request; only HR transitions it out of `Pending`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(ParseEnumError::new(
                "request status",
                s,
                "pending, approved, rejected",
            )),
        }
    }
}

/// Embedded asset reference on a request row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

/// Embedded requester reference on a request row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A request as listed by `/requests` and `/requests/my-requests`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub asset: AssetRef,
    pub requester: RequesterRef,
    pub request_type: RequestKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: RequestStatus,
    pub request_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_date: Option<DateTime<Utc>>,
}

impl AssetRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// Payload for creating a request (`POST /requests`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    pub asset_id: String,
    pub request_type: RequestKind,
    pub note: String,
}

/// Payload for the HR approve/reject decision (`PUT /requests/:id`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDecision {
    pub status: RequestStatus,
}

// ============================================================================
// Assignments & Teams
// ============================================================================

/// An asset currently assigned to the calling employee (`/assigned-assets`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedAsset {
    #[serde(rename = "_id")]
    pub id: String,
    pub asset_name: String,
    pub asset_type: AssetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_image: Option<String>,
    pub company_name: String,
    pub assignment_date: DateTime<Utc>,
}

impl AssignedAsset {
    pub fn is_returnable(&self) -> bool {
        self.asset_type == AssetType::Returnable
    }
}

/// A member of an HR manager's team (`/employees/my-team`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub join_date: DateTime<Utc>,
}

/// A company affiliation of the calling employee (`/employees/team-list`).
/// Employees may belong to several companies over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub hr_id: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
}

// ============================================================================
// Packages & Payments
// ============================================================================

/// A subscription tier (`/packages`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    pub price: f64,
    pub employee_limit: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Response of `POST /payments/create-checkout-session`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Payload for `POST /payments/create-checkout-session`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub package_name: String,
}

/// Payload for finalizing the hosted checkout (`POST /payments/payment-success`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizePayload {
    pub session_id: String,
}

/// Payload for the payment-element path (`POST /payments`): the widget
/// confirms client-side and hands back an intent id the server verifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub payment_intent_id: String,
    pub package_name: String,
    pub employee_limit: u32,
}

/// Outcome envelope of `POST /payments/payment-success`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub status: String,
}

impl PaymentOutcome {
    /// The redirect route may be replayed; a second finalize for the same
    /// session reports `already_processed` and still counts as success.
    pub fn is_success(&self) -> bool {
        self.status == "success" || self.status == "already_processed"
    }
}

// ============================================================================
// Dashboard stats
// ============================================================================

/// Aggregates behind the HR dashboard (`/stats/hr`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrStats {
    pub total_assets: u64,
    pub total_requests: u64,
    pub pending_requests: u64,
    pub employee_count: u32,
    pub employee_limit: u32,
    #[serde(default)]
    pub returnable_assets: u64,
    #[serde(default)]
    pub non_returnable_assets: u64,
    #[serde(default)]
    pub top_requested: Vec<TopRequested>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRequested {
    pub name: String,
    pub count: u64,
}

// ============================================================================
// Envelopes
// ============================================================================

/// The one canonical list shape. List endpoints answer either with a
/// paginated envelope or a bare array; both fold into this at the HTTP
/// boundary so view code never branches on response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub pages: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            pages: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Normalize a list response. A bare array is a single full page.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match value {
            serde_json::Value::Array(_) => {
                let items: Vec<T> = serde_json::from_value(value)?;
                Ok(Self {
                    total: items.len() as u64,
                    pages: 1,
                    items,
                })
            }
            other => serde_json::from_value(other),
        }
    }
}

/// Mutation result envelope; error bodies carry `message` for display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiMessage {
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.message.as_deref().unwrap_or(fallback)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failed to parse an enum-valued CLI flag or wire string
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid {field} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    field: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseEnumError {
    fn new(field: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_strings() {
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"hr\"");
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"employee\"");

        let role: Role = serde_json::from_str("\"hr\"").unwrap();
        assert_eq!(role, Role::Hr);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("hr".parse::<Role>().unwrap(), Role::Hr);
        assert_eq!("Employee".parse::<Role>().unwrap(), Role::Employee);
        assert!("manager".parse::<Role>().is_err());
    }

    #[test]
    fn test_asset_type_wire_strings() {
        assert_eq!(
            serde_json::to_string(&AssetType::Returnable).unwrap(),
            "\"Returnable\""
        );
        assert_eq!(
            serde_json::to_string(&AssetType::NonReturnable).unwrap(),
            "\"Non-returnable\""
        );

        let t: AssetType = serde_json::from_str("\"Non-returnable\"").unwrap();
        assert_eq!(t, AssetType::NonReturnable);
    }

    #[test]
    fn test_asset_type_from_str() {
        assert_eq!("returnable".parse::<AssetType>().unwrap(), AssetType::Returnable);
        assert_eq!(
            "Non-returnable".parse::<AssetType>().unwrap(),
            AssetType::NonReturnable
        );
        assert!("consumable".parse::<AssetType>().is_err());
    }

    #[test]
    fn test_request_status_wire_strings() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Rejected).unwrap(),
            "\"rejected\""
        );

        let s: RequestStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(s, RequestStatus::Pending);
    }

    #[test]
    fn test_request_kind_wire_strings() {
        assert_eq!(serde_json::to_string(&RequestKind::Request).unwrap(), "\"Request\"");
        assert_eq!(serde_json::to_string(&RequestKind::Return).unwrap(), "\"Return\"");
        assert_eq!(serde_json::to_string(&RequestKind::Repair).unwrap(), "\"Repair\"");
    }

    #[test]
    fn test_user_deserialization() {
        let json = r#"{
            "_id": "u-1",
            "name": "Amina",
            "email": "amina@example.com",
            "role": "hr",
            "companyName": "Acme",
            "companyLogo": "https://img.example/logo.png",
            "employeeLimit": 5,
            "currentEmployees": 3
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u-1");
        assert!(user.is_hr());
        assert_eq!(user.company_name.as_deref(), Some("Acme"));
        assert_eq!(user.employee_limit, Some(5));
        assert_eq!(user.date_of_birth, None);
    }

    #[test]
    fn test_user_serialization_skips_absent_fields() {
        let user = User {
            id: "u-2".to_string(),
            name: "Omar".to_string(),
            email: "omar@example.com".to_string(),
            role: Role::Employee,
            date_of_birth: None,
            profile_image: None,
            company_name: None,
            company_logo: None,
            package_name: None,
            employee_limit: None,
            current_employees: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"_id\":\"u-2\""));
        assert!(json.contains("\"role\":\"employee\""));
        assert!(!json.contains("companyName"));
        assert!(!json.contains("employeeLimit"));
    }

    #[test]
    fn test_asset_round_trip() {
        let json = r#"{
            "_id": "a-1",
            "name": "Laptop",
            "type": "Returnable",
            "quantity": 10,
            "availableQuantity": 4,
            "image": "https://img.example/laptop.png",
            "companyName": "Acme",
            "createdAt": "2026-01-15T09:30:00Z"
        }"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.name, "Laptop");
        assert_eq!(asset.asset_type, AssetType::Returnable);
        assert!(asset.in_stock());

        let back = serde_json::to_string(&asset).unwrap();
        assert!(back.contains("\"type\":\"Returnable\""));
        assert!(back.contains("\"availableQuantity\":4"));
    }

    #[test]
    fn test_new_asset_serialization() {
        let payload = NewAsset {
            name: "Chair".to_string(),
            asset_type: AssetType::NonReturnable,
            quantity: 5,
            image: "https://img.example/chair.png".to_string(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"type\":\"Non-returnable\""));
        assert!(json.contains("\"quantity\":5"));
    }

    #[test]
    fn test_request_deserialization() {
        let json = r#"{
            "_id": "r-1",
            "asset": {"_id": "a-1", "name": "Laptop", "type": "Returnable"},
            "requester": {"_id": "u-2", "name": "Omar", "email": "omar@example.com"},
            "requestType": "Request",
            "note": "Working from home",
            "status": "pending",
            "requestDate": "2026-02-01T10:00:00Z"
        }"#;
        let req: AssetRequest = serde_json::from_str(json).unwrap();
        assert!(req.is_pending());
        assert_eq!(req.asset.name, "Laptop");
        assert_eq!(req.requester.email, "omar@example.com");
        assert_eq!(req.request_type, RequestKind::Request);
        assert_eq!(req.approval_date, None);
    }

    #[test]
    fn test_new_request_serialization() {
        let payload = NewRequest {
            asset_id: "a-1".to_string(),
            request_type: RequestKind::Return,
            note: "Back to inventory".to_string(),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"assetId\":\"a-1\""));
        assert!(json.contains("\"requestType\":\"Return\""));
    }

    #[test]
    fn test_decision_serialization() {
        let json = serde_json::to_string(&RequestDecision {
            status: RequestStatus::Approved,
        })
        .unwrap();
        assert_eq!(json, "{\"status\":\"approved\"}");
    }

    #[test]
    fn test_page_from_envelope() {
        let value = serde_json::json!({
            "items": [{"_id": "a-1", "name": "Laptop", "type": "Returnable",
                       "quantity": 1, "availableQuantity": 1,
                       "createdAt": "2026-01-15T09:30:00Z"}],
            "total": 23,
            "pages": 3
        });
        let page: Page<Asset> = Page::from_value(value).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 23);
        assert_eq!(page.pages, 3);
    }

    #[test]
    fn test_page_from_bare_array() {
        let value = serde_json::json!([
            {"_id": "a-1", "name": "Laptop", "type": "Returnable",
             "quantity": 1, "availableQuantity": 0,
             "createdAt": "2026-01-15T09:30:00Z"}
        ]);
        let page: Page<Asset> = Page::from_value(value).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.pages, 1);
        assert!(!page.items[0].in_stock());
    }

    #[test]
    fn test_page_empty() {
        let page: Page<Asset> = Page::empty();
        assert!(page.is_empty());
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn test_api_message_fallback() {
        let msg: ApiMessage = serde_json::from_str("{}").unwrap();
        assert_eq!(msg.message_or("fallback"), "fallback");

        let msg: ApiMessage =
            serde_json::from_str("{\"success\":false,\"message\":\"Asset not found\"}").unwrap();
        assert_eq!(msg.message_or("fallback"), "Asset not found");
    }

    #[test]
    fn test_payment_outcome() {
        let done: PaymentOutcome = serde_json::from_str("{\"status\":\"success\"}").unwrap();
        assert!(done.is_success());

        let replay: PaymentOutcome =
            serde_json::from_str("{\"status\":\"already_processed\"}").unwrap();
        assert!(replay.is_success());

        let failed: PaymentOutcome = serde_json::from_str("{\"status\":\"failed\"}").unwrap();
        assert!(!failed.is_success());
    }

    #[test]
    fn test_hr_stats_defaults() {
        let json = r#"{
            "totalAssets": 12,
            "totalRequests": 30,
            "pendingRequests": 4,
            "employeeCount": 3,
            "employeeLimit": 5
        }"#;
        let stats: HrStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_assets, 12);
        assert_eq!(stats.returnable_assets, 0);
        assert!(stats.top_requested.is_empty());
    }

    #[test]
    fn test_assigned_asset_returnable() {
        let json = r#"{
            "_id": "as-1",
            "assetName": "Laptop",
            "assetType": "Returnable",
            "companyName": "Acme",
            "assignmentDate": "2026-03-01T08:00:00Z"
        }"#;
        let assigned: AssignedAsset = serde_json::from_str(json).unwrap();
        assert!(assigned.is_returnable());
        assert_eq!(assigned.asset_image, None);
    }
}
