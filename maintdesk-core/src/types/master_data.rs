//! Master data: clients, vendors, products, spares, engineers, employees

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use maintdesk_client::EntityId;

use super::entity::{Entity, field_access};
use super::reference::Reference;
use super::schema::{
    CONTACT_NUMBER_HINT, CONTACT_NUMBER_PATTERN, EMAIL_HINT, EMAIL_PATTERN, FieldKind,
    FieldSchema, FieldSpec, RefSource,
};

pub const VENDORS: RefSource = RefSource {
    collection: "vendors",
    label_field: "vendorName",
};

pub const PRODUCTS: RefSource = RefSource {
    collection: "products",
    label_field: "productName",
};

fn contact_number() -> FieldSpec {
    FieldSpec::new("contactNumber", "Contact Number", FieldKind::Text)
        .required()
        .column()
        .pattern(CONTACT_NUMBER_PATTERN, CONTACT_NUMBER_HINT)
}

fn email() -> FieldSpec {
    FieldSpec::new("email", "Email", FieldKind::Text).pattern(EMAIL_PATTERN, EMAIL_HINT)
}

// ============ Client ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    pub id: EntityId,
    pub client_name: String,
    pub contact_person: String,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    pub gst_number: String,
}

field_access!(Client {
    "clientName" => client_name,
    "contactPerson" => contact_person,
    "contactNumber" => contact_number,
    "email" => email,
    "address" => address,
    "gstNumber" => gst_number,
});

impl Entity for Client {
    const COLLECTION: &'static str = "clients";
    const TITLE: &'static str = "Clients";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new("clientName", "Client Name", FieldKind::Text)
                    .required()
                    .column(),
                FieldSpec::new("contactPerson", "Contact Person", FieldKind::Text).column(),
                contact_number(),
                email().column(),
                FieldSpec::new("address", "Address", FieldKind::TextArea),
                FieldSpec::new("gstNumber", "GST Number", FieldKind::Text)
                    .pattern(r"^[0-9A-Za-z]{15}$", "must be 15 letters or digits"),
            ])
        });
        &SCHEMA
    }
}

// ============ Vendor ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vendor {
    pub id: EntityId,
    pub vendor_name: String,
    pub contact_person: String,
    pub contact_number: String,
    pub email: String,
    pub address: String,
}

field_access!(Vendor {
    "vendorName" => vendor_name,
    "contactPerson" => contact_person,
    "contactNumber" => contact_number,
    "email" => email,
    "address" => address,
});

impl Entity for Vendor {
    const COLLECTION: &'static str = "vendors";
    const TITLE: &'static str = "Vendors";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new("vendorName", "Vendor Name", FieldKind::Text)
                    .required()
                    .column(),
                FieldSpec::new("contactPerson", "Contact Person", FieldKind::Text).column(),
                contact_number(),
                email().column(),
                FieldSpec::new("address", "Address", FieldKind::TextArea),
            ])
        });
        &SCHEMA
    }
}

// ============ Product ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: EntityId,
    pub product_name: String,
    pub model_number: String,
    pub vendor: Reference,
    pub description: String,
}

field_access!(Product {
    "productName" => product_name,
    "modelNumber" => model_number,
    "vendor" => vendor,
    "description" => description,
});

impl Entity for Product {
    const COLLECTION: &'static str = "products";
    const TITLE: &'static str = "Products";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new("productName", "Product Name", FieldKind::Text)
                    .required()
                    .column(),
                FieldSpec::new("modelNumber", "Model Number", FieldKind::Text)
                    .required()
                    .column(),
                FieldSpec::new("vendor", "Vendor", FieldKind::Select(VENDORS))
                    .required()
                    .column(),
                FieldSpec::new("description", "Description", FieldKind::TextArea),
            ])
        });
        &SCHEMA
    }
}

// ============ Spare ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spare {
    pub id: EntityId,
    pub spare_name: String,
    pub part_number: String,
    pub quantity: Option<i64>,
    pub compatible_products: Vec<Reference>,
}

field_access!(Spare {
    "spareName" => spare_name,
    "partNumber" => part_number,
    "quantity" => quantity,
    "compatibleProducts" => compatible_products,
});

impl Entity for Spare {
    const COLLECTION: &'static str = "spares";
    const TITLE: &'static str = "Spares";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new("spareName", "Spare Name", FieldKind::Text)
                    .required()
                    .column(),
                FieldSpec::new("partNumber", "Part Number", FieldKind::Text)
                    .required()
                    .column(),
                FieldSpec::new("quantity", "Quantity", FieldKind::Number)
                    .required()
                    .column(),
                FieldSpec::new(
                    "compatibleProducts",
                    "Compatible Products",
                    FieldKind::MultiSelect(PRODUCTS),
                ),
            ])
        });
        &SCHEMA
    }
}

// ============ ServiceEngineer ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceEngineer {
    pub id: EntityId,
    pub engineer_name: String,
    pub contact_number: String,
    pub email: String,
    pub skills: String,
    pub active: bool,
}

field_access!(ServiceEngineer {
    "engineerName" => engineer_name,
    "contactNumber" => contact_number,
    "email" => email,
    "skills" => skills,
    "active" => active,
});

impl Entity for ServiceEngineer {
    const COLLECTION: &'static str = "service-engineers";
    const TITLE: &'static str = "Engineers";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new("engineerName", "Engineer Name", FieldKind::Text)
                    .required()
                    .column(),
                contact_number(),
                email(),
                FieldSpec::new("skills", "Skills", FieldKind::TextArea),
                FieldSpec::new("active", "Active", FieldKind::Checkbox).column(),
            ])
        });
        &SCHEMA
    }
}

// ============ Employee ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: EntityId,
    pub employee_name: String,
    pub designation: String,
    pub contact_number: String,
    pub email: String,
    #[serde(with = "crate::utils::datetime::option")]
    pub joining_date: Option<NaiveDate>,
    pub address: String,
}

field_access!(Employee {
    "employeeName" => employee_name,
    "designation" => designation,
    "contactNumber" => contact_number,
    "email" => email,
    "joiningDate" => joining_date,
    "address" => address,
});

impl Entity for Employee {
    const COLLECTION: &'static str = "employees";
    const TITLE: &'static str = "Employees";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema() -> &'static FieldSchema {
        static SCHEMA: LazyLock<FieldSchema> = LazyLock::new(|| {
            FieldSchema::new(vec![
                FieldSpec::new("employeeName", "Employee Name", FieldKind::Text)
                    .required()
                    .column(),
                FieldSpec::new("designation", "Designation", FieldKind::Text)
                    .required()
                    .column(),
                contact_number(),
                email(),
                FieldSpec::new("joiningDate", "Joining Date", FieldKind::Date).column(),
                FieldSpec::new("address", "Address", FieldKind::TextArea),
            ])
        });
        &SCHEMA
    }
}
