//! String identifiers shared by the dataset and the code that consumes it.

/// Type name carried in the `TypeFullName` field of a definitions document.
pub const PERMISSION_GROUP_TYPE: &str = "CommandCentral.Authorization.PermissionGroup";

// Chains of command (modules with scoped access levels).
pub const MAIN: &str = "Main";
pub const MUSTER: &str = "Muster";
pub const QUARTERDECK_WATCHBILL: &str = "QuarterdeckWatchbill";
pub const COMMAND_FINANCIAL_SPECIALIST: &str = "CommandFinancialSpecialist";

// Submodules referenced by the stock dataset.
pub const CREATE_PERSON: &str = "CreatePerson";
pub const ADMIN_TOOLS: &str = "AdminTools";
pub const EDIT_NEWS: &str = "EditNews";
pub const EDIT_FAQ: &str = "EditFAQ";
