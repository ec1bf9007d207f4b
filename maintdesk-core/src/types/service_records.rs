//! Installed machines and their service history

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use maintdesk_client::EntityId;

use super::entity::{Entity, field_access};
use super::master_data::PRODUCTS;
use super::reference::Reference;
use super::schema::{FieldKind, FieldSchema, FieldSpec, RefSource};

pub const CLIENTS: RefSource = RefSource {
    collection: "clients",
    label_field: "clientName",
};

pub const ENGINEERS: RefSource = RefSource {
    collection: "service-engineers",
    label_field: "engineerName",
};

pub const MACHINES: RefSource = RefSource {
    collection: "machine-entries",
    label_field: "serialNumber",
};

pub const SERVICE_REQUESTS: RefSource = RefSource {
    collection: "service-requests",
    label_field: "complaint",
};

pub const SPARES: RefSource = RefSource {
    collection: "spares",
    label_field: "spareName",
};

pub const REQUEST_STATUSES: &[&str] = &["Open", "In Progress", "Closed"];

// ============ MachineEntry ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineEntry {
    pub id: EntityId,
    pub serial_number: String,
    pub client: Reference,
    pub product: Reference,
    #[serde(with = "crate::utils::datetime::option")]
    pub installation_date: Option<NaiveDate>,
    #[serde(with = "crate::utils::datetime::option")]
    pub warranty_expiry: Option<NaiveDate>,
    pub under_warranty: bool,
    pub remarks: String,
}

field_access!(MachineEntry {
    "serialNumber" => serial_number,
    "client" => client,
    "product" => product,
    "installationDate" => installation_date,
    "warrantyExpiry" => warranty_expiry,
    "underWarranty" => under_warranty,
    "remarks" => remarks,
});

impl Entity for MachineEntry {
    const COLLECTION: &'static str = "machine-entries";
    const TITLE: &'static str = "Machines";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new("serialNumber", "Serial Number", FieldKind::Text)
                    .required()
                    .column(),
                FieldSpec::new("client", "Client", FieldKind::Select(CLIENTS))
                    .required()
                    .column(),
                FieldSpec::new("product", "Product", FieldKind::Select(PRODUCTS))
                    .required()
                    .column(),
                FieldSpec::new("installationDate", "Installation Date", FieldKind::Date)
                    .required()
                    .column(),
                FieldSpec::new("warrantyExpiry", "Warranty Expiry", FieldKind::Date),
                FieldSpec::new("underWarranty", "Under Warranty", FieldKind::Checkbox).column(),
                FieldSpec::new("remarks", "Remarks", FieldKind::TextArea),
            ])
        });
        &SCHEMA
    }
}

// ============ ServiceRequest ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceRequest {
    pub id: EntityId,
    pub machine: Reference,
    #[serde(with = "crate::utils::datetime::option")]
    pub request_date: Option<NaiveDate>,
    pub complaint: String,
    pub status: String,
    pub engineer: Reference,
}

field_access!(ServiceRequest {
    "machine" => machine,
    "requestDate" => request_date,
    "complaint" => complaint,
    "status" => status,
    "engineer" => engineer,
});

impl Entity for ServiceRequest {
    const COLLECTION: &'static str = "service-requests";
    const TITLE: &'static str = "Requests";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new("machine", "Machine", FieldKind::Select(MACHINES))
                    .required()
                    .column(),
                FieldSpec::new("requestDate", "Request Date", FieldKind::Date)
                    .required()
                    .column(),
                FieldSpec::new("complaint", "Complaint", FieldKind::TextArea)
                    .required()
                    .column(),
                FieldSpec::new("status", "Status", FieldKind::Choice(REQUEST_STATUSES))
                    .required()
                    .column(),
                FieldSpec::new("engineer", "Engineer", FieldKind::Select(ENGINEERS)).column(),
            ])
        });
        &SCHEMA
    }
}

// ============ ServiceEntry ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceEntry {
    pub id: EntityId,
    pub service_request: Reference,
    #[serde(with = "crate::utils::datetime::option")]
    pub service_date: Option<NaiveDate>,
    pub engineer: Reference,
    pub spares_used: Vec<Reference>,
    pub work_done: String,
    pub chargeable: bool,
}

field_access!(ServiceEntry {
    "serviceRequest" => service_request,
    "serviceDate" => service_date,
    "engineer" => engineer,
    "sparesUsed" => spares_used,
    "workDone" => work_done,
    "chargeable" => chargeable,
});

impl Entity for ServiceEntry {
    const COLLECTION: &'static str = "service-entries";
    const TITLE: &'static str = "Service Log";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new(
                    "serviceRequest",
                    "Service Request",
                    FieldKind::Select(SERVICE_REQUESTS),
                )
                .required()
                .column(),
                FieldSpec::new("serviceDate", "Service Date", FieldKind::Date)
                    .required()
                    .column(),
                FieldSpec::new("engineer", "Engineer", FieldKind::Select(ENGINEERS))
                    .required()
                    .column(),
                FieldSpec::new("sparesUsed", "Spares Used", FieldKind::MultiSelect(SPARES)),
                FieldSpec::new("workDone", "Work Done", FieldKind::TextArea).required(),
                FieldSpec::new("chargeable", "Chargeable", FieldKind::Checkbox).column(),
            ])
        });
        &SCHEMA
    }
}
