//! Type definition module

pub(crate) mod entity;
mod field;
mod master_data;
mod reference;
mod schema;
mod service_records;

pub use entity::{Entity, FieldAccess};
pub use field::{DATE_FORMAT, FieldCodec, FieldValue};
pub use master_data::{Client, Employee, PRODUCTS, Product, ServiceEngineer, Spare, VENDORS, Vendor};
pub use reference::Reference;
pub use schema::{
    CONTACT_NUMBER_HINT, CONTACT_NUMBER_PATTERN, EMAIL_HINT, EMAIL_PATTERN, FieldError,
    FieldKind, FieldPattern, FieldProblem, FieldSchema, FieldSpec, RefSource,
};
pub use service_records::{
    CLIENTS, ENGINEERS, MACHINES, MachineEntry, REQUEST_STATUSES, SERVICE_REQUESTS, SPARES,
    ServiceEntry, ServiceRequest,
};

// Re-export transport types
pub use maintdesk_client::{EntityId, PageQuery, PaginatedResponse};
