//! Form field names.

// Personal info
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const COUNTRY: &str = "country";

// Business info
pub const BUSINESS_NAME: &str = "businessName";
pub const BUSINESS_TYPE: &str = "businessType";
pub const REGISTRATION_NUMBER: &str = "registrationNumber";
pub const FOUNDED_YEAR: &str = "foundedYear";
pub const WEBSITE: &str = "website";

// Login
pub const IDENTIFIER: &str = "identifier";
pub const SECRET: &str = "secret";
